//! Shebang check.
//!
//! iPXE only executes a downloaded file as a script when its first line
//! starts with `#!ipxe`.

use crate::lint::{LintDiagnostic, LintRule, RuleId, ScriptSource, Severity, Span};

/// Requires the `#!ipxe` header.
pub struct ShebangRule;

impl LintRule for ShebangRule {
    fn id(&self) -> RuleId {
        RuleId::new("shebang")
    }

    fn name(&self) -> &str {
        "Shebang"
    }

    fn description(&self) -> &str {
        "Script must start with #!ipxe"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, script: &ScriptSource) -> Vec<LintDiagnostic> {
        match script.lines.first() {
            None => vec![LintDiagnostic::new(
                self.id(),
                self.default_severity(),
                "Empty file",
            )],
            Some(first) if !first.trim().starts_with("#!ipxe") => vec![LintDiagnostic::new(
                self.id(),
                self.default_severity(),
                "Missing or invalid #!ipxe shebang",
            )
            .with_span(Span::line(&script.path, 1))
            .with_suggestion("Add #!ipxe as the first line")],
            Some(_) => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(content: &str) -> Vec<LintDiagnostic> {
        ShebangRule.check(&ScriptSource::new("menu.ipxe", content))
    }

    #[test]
    fn accepts_shebang() {
        assert!(check("#!ipxe\ndhcp\n").is_empty());
    }

    #[test]
    fn rejects_missing_shebang() {
        let diags = check("dhcp\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
    }

    #[test]
    fn rejects_empty_file() {
        let diags = check("");
        assert_eq!(diags[0].message, "Empty file");
    }
}
