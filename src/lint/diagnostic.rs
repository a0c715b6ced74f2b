//! Lint diagnostic messages.

use super::rule::{RuleId, Severity};
use super::span::Span;

/// A diagnostic message produced by a lint rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintDiagnostic {
    /// The rule that produced this diagnostic.
    pub rule_id: RuleId,
    pub severity: Severity,
    pub message: String,
    /// Offending line, when the problem has one.
    pub span: Option<Span>,
    /// Optional suggestion for fixing the issue.
    pub suggestion: Option<String>,
}

impl LintDiagnostic {
    /// Create a new diagnostic.
    pub fn new(rule_id: RuleId, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            severity,
            message: message.into(),
            span: None,
            suggestion: None,
        }
    }

    /// Add a source span to this diagnostic.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Add a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Line number for sorting; file-level diagnostics sort first.
    pub fn line(&self) -> usize {
        self.span.as_ref().map(|s| s.line).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_parts() {
        let diag = LintDiagnostic::new(RuleId::new("undefined-label"), Severity::Error, "bad goto")
            .with_span(Span::line("menu.ipxe", 4))
            .with_suggestion("define :missing");

        assert_eq!(diag.line(), 4);
        assert_eq!(diag.suggestion.as_deref(), Some("define :missing"));
    }

    #[test]
    fn file_level_diagnostic_has_line_zero() {
        let diag = LintDiagnostic::new(RuleId::new("menu-balance"), Severity::Warning, "x");
        assert_eq!(diag.line(), 0);
        assert!(diag.span.is_none());
    }
}
