//! Terminal user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal usage
//! - [`MockUI`] for capturing output in tests
//!
//! Status messages go to stderr; [`UserInterface::output`] is reserved for
//! the data a command produces (a script, JSON, completions) and goes to
//! stdout so it can be piped.
//!
//! # Example
//!
//! ```
//! use elfshoe::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("Wrote elfshoe.ipxe");
//! assert_eq!(ui.successes(), ["Wrote elfshoe.ipxe"]);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, ElfshoeTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a message only in verbose mode.
    fn detail(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Always shown.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Write command output to stdout, regardless of output mode.
    fn output(&mut self, text: &str);

    /// Whether colored output is enabled.
    fn use_color(&self) -> bool;
}
