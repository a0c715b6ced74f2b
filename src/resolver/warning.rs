//! Non-fatal problems recorded during resolution.

use std::fmt;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// `metadata_provider` names no registered provider.
    UnknownProvider { provider: String },
    /// The metadata source could not be fetched or parsed.
    MetadataFetch { url: String },
    /// Boot artifacts failed their existence check; the entry was dropped.
    ValidationFailure { urls: Vec<String> },
    /// A provider reported an architecture outside the canonical set.
    UnsupportedArchitecture { architecture: String },
    /// A provider reported a release without a version.
    BlankVersion,
    /// An entry's label was already taken; the entry was dropped.
    DuplicateEntry { id: String },
}

/// A warning attached to one distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub distribution: String,
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(distribution: impl Into<String>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            distribution: distribution.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.distribution, self.message)
    }
}
