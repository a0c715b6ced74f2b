//! Generate command implementation.
//!
//! The `elfshoe generate` command loads the configuration, resolves every
//! distribution and writes the rendered iPXE menu.

use std::fs;
use std::time::Duration;

use crate::cli::args::GenerateArgs;
use crate::config::{load_config_file, Settings};
use crate::error::{ElfshoeError, Result};
use crate::generator::{generate, GenerationReport};
use crate::render::{IpxeRenderer, Renderer};
use crate::resolver::RunOptions;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_MISSING_INPUT};

/// The generate command implementation.
pub struct GenerateCommand {
    args: GenerateArgs,
}

impl GenerateCommand {
    /// Create a new generate command.
    pub fn new(args: GenerateArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &GenerateArgs {
        &self.args
    }

    /// Combine file settings with command-line overrides.
    pub fn run_options(&self, settings: &Settings) -> RunOptions {
        let mut options = RunOptions::from(settings);
        if self.args.no_validate {
            options.validate_urls = false;
        }
        if let Some(seconds) = self.args.timeout {
            options.timeout = Duration::from_secs(seconds);
        }
        if let Some(jobs) = self.args.jobs {
            options.max_parallel = usize::try_from(jobs).unwrap_or(usize::MAX);
        }
        options
    }

    fn report(&self, report: &GenerationReport, ui: &mut dyn UserInterface) {
        for menu in &report.model.distributions {
            ui.detail(&format!(
                "{}: {} entr{}",
                menu.label,
                menu.entries.len(),
                if menu.entries.len() == 1 { "y" } else { "ies" }
            ));
            for entry in &menu.entries {
                ui.detail(&format!("  {} -> {}", entry.id, entry.kernel_url));
            }
        }
        for warning in &report.warnings {
            ui.warning(&warning.to_string());
        }
    }
}

impl Command for GenerateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match load_config_file(&self.args.config) {
            Ok(config) => config,
            Err(ElfshoeError::ConfigNotFound { path }) => {
                ui.error(&format!("Configuration file not found: {}", path.display()));
                return Ok(CommandResult::failure(EXIT_MISSING_INPUT));
            }
            Err(e) => return Err(e),
        };

        let options = self.run_options(&config.settings);
        if !options.validate_urls {
            ui.detail("URL validation disabled");
        }
        ui.show_header(&config.menu.title);

        let report = generate(&config, options)?;
        self.report(&report, ui);

        let script = IpxeRenderer::new().render(&report.model);
        if self.args.writes_to_stdout() {
            ui.output(&script);
        } else {
            fs::write(&self.args.output, &script)?;
            ui.success(&format!(
                "Wrote {} ({} boot entries, {} warning(s))",
                self.args.output.display(),
                report.model.entry_count(),
                report.warnings.len()
            ));
        }

        Ok(CommandResult::success())
    }
}
