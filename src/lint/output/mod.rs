//! Lint output formatters.

pub mod human;
pub mod json;

use crate::lint::{LintDiagnostic, Severity};
use std::io::Write;
use std::str::FromStr;

/// Output format for lint results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown lint format: {}", s)),
        }
    }
}

/// Trait for formatting lint output.
pub trait LintFormatter {
    /// Format diagnostics to the given writer.
    fn format<W: Write>(
        &self,
        diagnostics: &[LintDiagnostic],
        writer: &mut W,
    ) -> std::io::Result<()>;
}

/// Count diagnostics of one severity.
pub fn count(diagnostics: &[LintDiagnostic], severity: Severity) -> usize {
    diagnostics.iter().filter(|d| d.severity == severity).count()
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formats() {
        assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("sarif".parse::<OutputFormat>().is_err());
    }
}
