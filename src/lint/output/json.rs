//! JSON output formatter.

use super::{count, LintFormatter};
use crate::lint::{LintDiagnostic, Severity};
use serde::Serialize;
use std::io::Write;

/// Formats lint output as JSON.
#[derive(Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<JsonDiagnostic<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    rule_id: &'a str,
    severity: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    errors: usize,
    warnings: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[LintDiagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let output = JsonOutput {
            diagnostics: diagnostics
                .iter()
                .map(|d| JsonDiagnostic {
                    rule_id: &d.rule_id.0,
                    severity: d.severity.as_str(),
                    message: &d.message,
                    file: d.span.as_ref().map(|s| s.file.display().to_string()),
                    line: d.span.as_ref().map(|s| s.line),
                    suggestion: d.suggestion.as_deref(),
                })
                .collect(),
            summary: JsonSummary {
                total: diagnostics.len(),
                errors: count(diagnostics, Severity::Error),
                warnings: count(diagnostics, Severity::Warning),
            },
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)
    }
}
