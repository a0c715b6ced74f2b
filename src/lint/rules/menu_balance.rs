//! Menu/choose balance check.

use crate::lint::{LintDiagnostic, LintRule, RuleId, ScriptSource, Severity};

/// Every `menu` should be answered by a `choose`.
pub struct MenuBalanceRule;

impl LintRule for MenuBalanceRule {
    fn id(&self) -> RuleId {
        RuleId::new("menu-balance")
    }

    fn name(&self) -> &str {
        "Menu Balance"
    }

    fn description(&self) -> &str {
        "Each menu statement has a matching choose statement"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, script: &ScriptSource) -> Vec<LintDiagnostic> {
        let count = |command: &str| {
            script
                .commands()
                .filter(|(_, line)| line.split_whitespace().next() == Some(command))
                .count()
        };
        let menus = count("menu");
        let chooses = count("choose");

        if menus == chooses {
            return vec![];
        }
        vec![LintDiagnostic::new(
            self.id(),
            self.default_severity(),
            format!(
                "Unbalanced menus: {} menu statements, {} choose statements",
                menus, chooses
            ),
        )]
    }
}
