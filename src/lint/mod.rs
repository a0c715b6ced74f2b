//! iPXE script linting.
//!
//! Generated (or hand-written) scripts can be checked with a small
//! rule-based linter before they are served to clients.
//!
//! - **Rules** - Individual checks ([`LintRule`] trait)
//! - **Registry** - Collection of all available rules ([`RuleRegistry`])
//! - **Diagnostics** - Issue reports with severity and suggestions ([`LintDiagnostic`])
//!
//! # Example
//!
//! ```
//! use elfshoe::lint::{RuleRegistry, ScriptSource, Severity};
//!
//! let script = ScriptSource::new("menu.ipxe", "#!ipxe\n:start\ngoto missing\n");
//! let diagnostics = RuleRegistry::with_builtins().check(&script);
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].severity, Severity::Error);
//! ```

pub mod diagnostic;
pub mod output;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod script;
pub mod span;

pub use diagnostic::LintDiagnostic;
pub use output::{HumanFormatter, JsonFormatter, LintFormatter, OutputFormat};
pub use registry::RuleRegistry;
pub use rule::{LintRule, RuleId, Severity};
pub use rules::{MenuBalanceRule, ShebangRule, UndefinedLabelRule, UnknownCommandRule};
pub use script::ScriptSource;
pub use span::Span;

/// Whether a set of diagnostics fails the check.
///
/// Errors always fail; warnings fail only in strict mode.
pub fn is_failure(diagnostics: &[LintDiagnostic], strict: bool) -> bool {
    diagnostics.iter().any(|d| match d.severity {
        Severity::Error => true,
        Severity::Warning => strict,
        Severity::Hint => false,
    })
}
