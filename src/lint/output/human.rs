//! Human-readable output formatter.

use super::{count, LintFormatter};
use crate::lint::{LintDiagnostic, Severity};
use console::style;
use std::io::Write;

/// Formats lint output for terminal display.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn severity_prefix(&self, severity: Severity) -> String {
        if !self.use_color {
            return severity.to_string();
        }
        let styled = match severity {
            Severity::Hint => style(severity.as_str()).cyan(),
            Severity::Warning => style(severity.as_str()).yellow(),
            Severity::Error => style(severity.as_str()).red(),
        };
        styled.bold().force_styling(true).to_string()
    }
}

impl LintFormatter for HumanFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[LintDiagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        for diag in diagnostics {
            // Header line: error[rule-id]: message
            writeln!(
                writer,
                "{}[{}]: {}",
                self.severity_prefix(diag.severity),
                diag.rule_id,
                diag.message
            )?;

            if let Some(ref span) = diag.span {
                writeln!(writer, "  --> {}", span)?;
            }

            if let Some(ref suggestion) = diag.suggestion {
                writeln!(writer, "   = help: {}", suggestion)?;
            }

            writeln!(writer)?;
        }

        let errors = count(diagnostics, Severity::Error);
        let warnings = count(diagnostics, Severity::Warning);
        if errors > 0 || warnings > 0 {
            writeln!(
                writer,
                "Found {} error(s) and {} warning(s)",
                errors, warnings
            )?;
        }

        Ok(())
    }
}
