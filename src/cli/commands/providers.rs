//! Providers command implementation.
//!
//! The `elfshoe providers` command lists the metadata providers that a
//! `type: dynamic` distribution can name in `metadata_provider`.

use crate::error::Result;
use crate::provider::{ProviderRegistry, DEFAULT_TIMEOUT};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The providers command implementation.
#[derive(Debug, Default)]
pub struct ProvidersCommand;

impl ProvidersCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ProvidersCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = ProviderRegistry::with_builtins(DEFAULT_TIMEOUT)?;
        let width = registry.names().iter().map(|n| n.len()).max().unwrap_or(0);

        for fetcher in registry.iter() {
            ui.output(&format!(
                "{:<width$}  {}\n",
                fetcher.name(),
                fetcher.description(),
                width = width
            ));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn lists_builtin_providers() {
        let mut ui = MockUI::new();
        let result = ProvidersCommand::new().execute(&mut ui).unwrap();

        assert!(result.success);
        let first = ui.output_text().lines().next().unwrap();
        assert!(first.starts_with("fedora  "));
    }
}
