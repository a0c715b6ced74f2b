//! Undefined goto target check.

use crate::lint::{LintDiagnostic, LintRule, RuleId, ScriptSource, Severity, Span};

/// Every literal `goto` target must be defined as a label.
pub struct UndefinedLabelRule;

impl LintRule for UndefinedLabelRule {
    fn id(&self) -> RuleId {
        RuleId::new("undefined-label")
    }

    fn name(&self) -> &str {
        "Undefined Label"
    }

    fn description(&self) -> &str {
        "goto targets reference labels defined in the script"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, script: &ScriptSource) -> Vec<LintDiagnostic> {
        let labels = script.labels();
        let mut diagnostics = Vec::new();

        for (line_no, line) in script.commands() {
            let mut tokens = line.split_whitespace();
            while let Some(token) = tokens.next() {
                if token != "goto" {
                    continue;
                }
                let Some(target) = tokens.next() else {
                    break;
                };
                // Runtime variables like ${target} resolve at boot time.
                if target.contains('$') || target.contains('{') {
                    continue;
                }
                if !labels.contains(target) {
                    diagnostics.push(
                        LintDiagnostic::new(
                            self.id(),
                            self.default_severity(),
                            format!("Reference to undefined label: '{}'", target),
                        )
                        .with_span(Span::line(&script.path, line_no))
                        .with_suggestion(format!("Define :{} or fix the goto target", target)),
                    );
                }
            }
        }

        diagnostics
    }
}
