//! Lint command implementation.
//!
//! The `elfshoe lint` command checks iPXE scripts using the lint rule system.

use std::path::Path;

use crate::cli::args::LintArgs;
use crate::error::{ElfshoeError, Result};
use crate::lint::{
    is_failure, HumanFormatter, JsonFormatter, LintDiagnostic, LintFormatter, OutputFormat,
    RuleRegistry, ScriptSource,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_FAILURE, EXIT_MISSING_INPUT};

/// The lint command implementation.
pub struct LintCommand {
    args: LintArgs,
}

impl LintCommand {
    /// Create a new lint command.
    pub fn new(args: LintArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &LintArgs {
        &self.args
    }

    fn format_output(
        &self,
        format: OutputFormat,
        diagnostics: &[LintDiagnostic],
        use_color: bool,
    ) -> Result<String> {
        let mut output = Vec::new();
        match format {
            OutputFormat::Json => JsonFormatter::new().format(diagnostics, &mut output)?,
            OutputFormat::Human => HumanFormatter::new(use_color).format(diagnostics, &mut output)?,
        }
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

fn load_script(path: &Path) -> Result<Option<ScriptSource>> {
    match ScriptSource::load(path) {
        Ok(script) => Ok(Some(script)),
        Err(ElfshoeError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

impl Command for LintCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let format: OutputFormat = self
            .args
            .format
            .parse()
            .map_err(|e: String| ElfshoeError::Other(anyhow::anyhow!(e)))?;
        let registry = RuleRegistry::with_builtins();

        let mut diagnostics = Vec::new();
        for path in &self.args.files {
            let Some(script) = load_script(path)? else {
                ui.error(&format!("File not found: {}", path.display()));
                return Ok(CommandResult::failure(EXIT_MISSING_INPUT));
            };
            tracing::debug!(path = %path.display(), lines = script.lines.len(), "Linting script");
            diagnostics.extend(registry.check(&script));
        }

        if diagnostics.is_empty() && format == OutputFormat::Human {
            ui.success(&format!(
                "{} script(s) checked, no problems found",
                self.args.files.len()
            ));
        } else {
            let output = self.format_output(format, &diagnostics, ui.use_color())?;
            ui.output(&output);
        }

        if is_failure(&diagnostics, self.args.strict) {
            Ok(CommandResult::failure(EXIT_FAILURE))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const CLEAN: &str = "#!ipxe\ndhcp\n:start\nmenu Boot\nitem shell Shell\nchoose target && goto ${target}\n:shell\nshell\ngoto start\n";

    fn script(temp: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = temp.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn lint(files: Vec<PathBuf>, format: &str, strict: bool) -> (CommandResult, MockUI) {
        let mut ui = MockUI::new();
        let result = LintCommand::new(LintArgs {
            files,
            format: format.to_string(),
            strict,
        })
        .execute(&mut ui)
        .unwrap();
        (result, ui)
    }

    #[test]
    fn clean_script_passes() {
        let temp = TempDir::new().unwrap();
        let (result, ui) = lint(vec![script(&temp, "a.ipxe", CLEAN)], "human", false);

        assert!(result.success);
        assert!(ui.successes()[0].contains("no problems found"));
    }

    #[test]
    fn undefined_label_fails() {
        let temp = TempDir::new().unwrap();
        let path = script(&temp, "a.ipxe", "#!ipxe\ngoto nowhere\n");
        let (result, ui) = lint(vec![path], "human", false);

        assert_eq!(result.exit_code, 1);
        assert!(ui.output_text().contains("error[undefined-label]"));
        assert!(ui.output_text().contains("a.ipxe:2"));
    }

    #[test]
    fn warnings_fail_only_in_strict_mode() {
        let temp = TempDir::new().unwrap();
        let path = script(&temp, "a.ipxe", "#!ipxe\nmenu Boot\n");

        let (relaxed, _) = lint(vec![path.clone()], "human", false);
        let (strict, _) = lint(vec![path], "human", true);

        assert!(relaxed.success);
        assert_eq!(strict.exit_code, 1);
    }

    #[test]
    fn json_output_is_parseable() {
        let temp = TempDir::new().unwrap();
        let path = script(&temp, "a.ipxe", "dhcp\n");
        let (result, ui) = lint(vec![path], "json", false);

        assert!(!result.success);
        let value: serde_json::Value = serde_json::from_str(ui.output_text()).unwrap();
        assert_eq!(value["summary"]["errors"], 1);
        assert_eq!(value["diagnostics"][0]["rule_id"], "shebang");
    }

    #[test]
    fn json_output_for_clean_script() {
        let temp = TempDir::new().unwrap();
        let (result, ui) = lint(vec![script(&temp, "a.ipxe", CLEAN)], "json", false);

        assert!(result.success);
        let value: serde_json::Value = serde_json::from_str(ui.output_text()).unwrap();
        assert_eq!(value["summary"]["total"], 0);
    }

    #[test]
    fn missing_file_exits_with_two() {
        let temp = TempDir::new().unwrap();
        let (result, ui) = lint(vec![temp.path().join("absent.ipxe")], "human", false);

        assert_eq!(result.exit_code, 2);
        assert!(ui.errors()[0].contains("absent.ipxe"));
    }
}
