//! Canonical architectures and provider remapping.
//!
//! Boot entries always carry a canonical [`Arch`] (the values iPXE reports
//! in `${buildarch}`). Mirrors and metadata sources often use their own
//! names, so each distribution has an [`ArchMap`] translating between the
//! two vocabularies.

use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// Canonical CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arch {
    X86_64,
    I386,
    Arm64,
    Arm,
}

impl Arch {
    /// Every canonical architecture.
    pub const ALL: [Arch; 4] = [Arch::X86_64, Arch::I386, Arch::Arm64, Arch::Arm];

    /// Token used in configuration files and `${buildarch}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::I386 => "i386",
            Arch::Arm64 => "arm64",
            Arch::Arm => "arm",
        }
    }

    /// Canonical tokens joined for error messages.
    pub fn known_list() -> String {
        Self::ALL
            .iter()
            .map(Arch::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_64" => Ok(Self::X86_64),
            "i386" => Ok(Self::I386),
            "arm64" => Ok(Self::Arm64),
            "arm" => Ok(Self::Arm),
            _ => Err(format!(
                "unknown architecture '{}' (expected one of: {})",
                s,
                Self::known_list()
            )),
        }
    }
}

/// Canonical to provider architecture names for one distribution.
///
/// Architectures without an entry pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchMap {
    entries: IndexMap<Arch, String>,
}

impl ArchMap {
    /// Create an empty (identity) map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in map for well-known distribution families.
    pub fn default_for(distribution: &str) -> Self {
        let pairs: &[(Arch, &str)] = match distribution {
            "fedora" | "centos" | "rocky" | "almalinux" => &[(Arch::Arm64, "aarch64")],
            "debian" | "ubuntu" => &[(Arch::X86_64, "amd64")],
            _ => &[],
        };
        pairs
            .iter()
            .fold(Self::new(), |map, (arch, token)| map.with(*arch, *token))
    }

    /// Add a mapping.
    pub fn with(mut self, arch: Arch, provider: impl Into<String>) -> Self {
        self.entries.insert(arch, provider.into());
        self
    }

    /// Provider token for a canonical architecture.
    pub fn to_provider(&self, arch: Arch) -> &str {
        self.entries
            .get(&arch)
            .map(String::as_str)
            .unwrap_or_else(|| arch.as_str())
    }

    /// Canonical architecture for a provider token.
    ///
    /// Mapped tokens are reversed first; anything else must already be a
    /// canonical token.
    pub fn from_provider(&self, token: &str) -> Option<Arch> {
        self.entries
            .iter()
            .find(|(_, provider)| provider.as_str() == token)
            .map(|(arch, _)| *arch)
            .or_else(|| token.parse().ok())
    }

    /// Translate a requested token to the provider vocabulary.
    ///
    /// Canonical tokens are mapped; unknown tokens are assumed to already be
    /// provider names and pass through.
    pub fn request_token(&self, token: &str) -> String {
        match token.parse::<Arch>() {
            Ok(arch) => self.to_provider(arch).to_string(),
            Err(_) => token.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
