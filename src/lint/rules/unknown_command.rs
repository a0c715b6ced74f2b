//! Unknown command check.

use crate::lint::{LintDiagnostic, LintRule, RuleId, ScriptSource, Severity, Span};

/// Commands recognised by this check.
pub const KNOWN_COMMANDS: &[&str] = &[
    "menu", "item", "choose", "goto", "chain", "kernel", "initrd", "boot", "set", "echo", "dhcp",
    "shell", "exit", "sleep", "sanboot", "imgfree", "imgload", "prompt", "read", "isset", "iseq",
    "inc", "dec",
];

/// Flags lines whose first word is not a known iPXE command.
pub struct UnknownCommandRule;

impl LintRule for UnknownCommandRule {
    fn id(&self) -> RuleId {
        RuleId::new("unknown-command")
    }

    fn name(&self) -> &str {
        "Unknown Command"
    }

    fn description(&self) -> &str {
        "Lines start with a known iPXE command"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, script: &ScriptSource) -> Vec<LintDiagnostic> {
        script
            .commands()
            .filter_map(|(line_no, line)| {
                let command = line.split_whitespace().next()?;
                (!KNOWN_COMMANDS.contains(&command)).then(|| {
                    LintDiagnostic::new(
                        self.id(),
                        self.default_severity(),
                        format!("Unknown or potentially misspelled command: '{}'", command),
                    )
                    .with_span(Span::line(&script.path, line_no))
                })
            })
            .collect()
    }
}
