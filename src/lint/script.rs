//! Parsed iPXE script source.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Lines of one iPXE script, ready for rule checks.
#[derive(Debug, Clone)]
pub struct ScriptSource {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl ScriptSource {
    /// Wrap in-memory script text.
    pub fn new(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// Read a script from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::new(path, &content))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Command lines with their 1-indexed line numbers.
    ///
    /// Blank lines, comments (`#...`) and label definitions (`:name`) are
    /// skipped; the returned text is trimmed.
    pub fn commands(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| {
                !line.is_empty() && !line.starts_with('#') && !line.starts_with(':')
            })
    }

    /// Labels defined with `:name`.
    pub fn labels(&self) -> HashSet<&str> {
        self.lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| line.starts_with(':') && !line.starts_with("::"))
            .filter_map(|line| line[1..].split_whitespace().next())
            .collect()
    }
}
