//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{ElfshoeTheme, OutputMode, UserInterface};

/// Terminal UI implementation.
///
/// Status goes to stderr, command output to stdout.
pub struct TerminalUI {
    status: Term,
    out: Term,
    theme: ElfshoeTheme,
    color: bool,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, color: bool) -> Self {
        let theme = if color {
            ElfshoeTheme::new()
        } else {
            ElfshoeTheme::plain()
        };

        Self {
            status: Term::stderr(),
            out: Term::stdout(),
            theme,
            color,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.status, "{}", msg).ok();
        }
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_detail() {
            writeln!(self.status, "  {}", self.theme.dim.apply_to(msg)).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.status, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.status, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.status, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.status, "{}", self.theme.format_header(title)).ok();
        }
    }

    fn output(&mut self, text: &str) {
        write!(self.out, "{}", text).ok();
        self.out.flush().ok();
    }

    fn use_color(&self) -> bool {
        self.color
    }
}
