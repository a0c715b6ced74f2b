//! Rule registry for managing lint rules.
//!
//! The [`RuleRegistry`] stores all available lint rules and runs them
//! against a script.

use std::collections::BTreeMap;

use super::diagnostic::LintDiagnostic;
use super::rule::{LintRule, RuleId};
use super::rules::{MenuBalanceRule, ShebangRule, UndefinedLabelRule, UnknownCommandRule};
use super::script::ScriptSource;

/// Registry of all available lint rules.
pub struct RuleRegistry {
    rules: BTreeMap<RuleId, Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Create a registry with all built-in rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ShebangRule));
        registry.register(Box::new(MenuBalanceRule));
        registry.register(Box::new(UndefinedLabelRule));
        registry.register(Box::new(UnknownCommandRule));
        registry
    }

    /// Register a lint rule.
    pub fn register(&mut self, rule: Box<dyn LintRule>) {
        self.rules.insert(rule.id(), rule);
    }

    /// Get a rule by ID.
    pub fn get(&self, id: &RuleId) -> Option<&dyn LintRule> {
        self.rules.get(id).map(|r| r.as_ref())
    }

    /// Iterate over all rules.
    pub fn iter(&self) -> impl Iterator<Item = &dyn LintRule> {
        self.rules.values().map(|r| r.as_ref())
    }

    /// Run every rule, returning diagnostics ordered by line.
    pub fn check(&self, script: &ScriptSource) -> Vec<LintDiagnostic> {
        let mut diagnostics: Vec<_> = self.iter().flat_map(|rule| rule.check(script)).collect();
        diagnostics.sort_by(|a, b| {
            a.line()
                .cmp(&b.line())
                .then_with(|| b.severity.cmp(&a.severity))
        });
        diagnostics
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
