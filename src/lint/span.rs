//! Script locations.

use std::path::PathBuf;

/// A line in a script file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// File path.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
}

impl Span {
    /// Create a span covering a single line.
    pub fn line(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}
