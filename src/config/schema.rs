//! Configuration schema definitions for elfshoe.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format. Fields that are required by the domain are
//! still optional here so that [`crate::config::validator`] can report every
//! missing field with its full path instead of stopping at the first serde
//! error.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Root configuration structure for `config.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElfshoeConfig {
    /// Main menu presentation.
    pub menu: MenuConfig,

    /// Run settings.
    pub settings: Settings,

    /// Distribution definitions, in menu order.
    #[serde(default)]
    pub distributions: IndexMap<String, DistributionConfig>,

    /// Static entries appended after the distributions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_items: Vec<AdditionalItemConfig>,
}

/// Main menu presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Menu title shown by iPXE.
    pub title: String,

    /// Item selected when the timeout expires.
    pub default_item: String,

    /// Menu timeout in milliseconds.
    pub timeout: u64,

    /// Prompt timeout after a failed boot, in milliseconds (defaults to `timeout`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_timeout: Option<u64>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            default_item: default_item(),
            timeout: default_timeout(),
            error_timeout: None,
        }
    }
}

fn default_title() -> String {
    "Network Boot Menu".to_string()
}

fn default_item() -> String {
    "shell".to_string()
}

fn default_timeout() -> u64 {
    30000
}

/// Settings that control a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Probe kernel and initrd URLs before adding entries.
    #[serde(default = "default_true")]
    pub validate_urls: bool,

    /// Timeout for every metadata fetch and artifact probe, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Maximum concurrent network workers.
    #[serde(default = "default_max_parallel")]
    pub max_parallel: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            validate_urls: true,
            request_timeout: default_request_timeout(),
            max_parallel: default_max_parallel(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_parallel() -> usize {
    8
}

fn is_true(v: &bool) -> bool {
    *v
}

/// How a distribution discovers its versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionType {
    /// Versions listed in the configuration.
    #[default]
    Static,
    /// Versions fetched from a metadata provider.
    Dynamic,
}

/// Configuration for one distribution family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Disabled distributions are skipped entirely.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub enabled: bool,

    /// Display label for the distribution submenu.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Static or dynamic version discovery.
    #[serde(rename = "type")]
    pub kind: DistributionType,

    /// Canonical architecture to provider architecture names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch_map: Option<IndexMap<String, String>>,

    /// Architectures offered for every version, optionally with overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architectures: Option<ArchitecturesConfig>,

    /// Static version list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<VersionConfig>,

    /// Registered metadata provider name (dynamic only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_provider: Option<String>,

    /// Metadata source URL (dynamic only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_url: Option<String>,

    /// Release filter passed to the provider (dynamic only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_filter: Option<MetadataFilterConfig>,

    /// Base URL template with `{version}` and `{arch}` placeholders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,

    /// Kernel and initrd paths relative to the base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_files: Option<BootFilesConfig>,

    /// Kernel command line template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_params: Option<String>,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            label: None,
            kind: DistributionType::Static,
            arch_map: None,
            architectures: None,
            versions: Vec::new(),
            metadata_provider: None,
            metadata_url: None,
            metadata_filter: None,
            url_template: None,
            boot_files: None,
            boot_params: None,
        }
    }
}

/// Distribution-level architectures: a plain list, or a map with overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArchitecturesConfig {
    /// `architectures: [x86_64, arm64]`
    List(Vec<String>),
    /// `architectures: {arm64: {boot_params: ...}}`
    PerArch(IndexMap<String, ArchOverrideConfig>),
}

impl ArchitecturesConfig {
    /// Architecture names in declaration order.
    pub fn names(&self) -> Vec<String> {
        match self {
            Self::List(names) => names.clone(),
            Self::PerArch(map) => map.keys().cloned().collect(),
        }
    }
}

/// Per-architecture overrides of distribution-level fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchOverrideConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_files: Option<BootFilesConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_params: Option<String>,
}

/// One entry of a static version list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// Version identifier substituted into `{version}`.
    #[serde(deserialize_with = "string_or_number")]
    pub version: String,

    /// Display name, e.g. a release codename.
    #[serde(alias = "display_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Architectures for this version only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architectures: Option<Vec<String>>,
}

/// Kernel and initrd locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BootFilesConfig {
    pub kernel: String,
    pub initrd: String,
}

/// Filter applied to provider metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataFilterConfig {
    /// Release classification, e.g. `Server`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// Requested architectures, in preference order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architectures: Option<Vec<String>>,

    /// Keep only the newest N releases.
    #[serde(alias = "limit", skip_serializing_if = "Option::is_none")]
    pub recency_limit: Option<usize>,
}

/// Kind of a static menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Chainload another script.
    Chain,
    /// Drop to the iPXE shell.
    Shell,
    /// Leave iPXE and continue the firmware boot order.
    Exit,
}

/// A menu entry not tied to any distribution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditionalItemConfig {
    pub id: String,

    pub label: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ItemKind>,

    /// Chain target (required for `type: chain`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Accept `version: 41` as well as `version: "41"`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::String(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}
