//! Resolved boot entries and per-distribution menus.

use crate::distribution::Arch;

/// One bootable (distribution, version, architecture) combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootEntry {
    /// Unique iPXE label, e.g. `fedora_41_arm64`.
    pub id: String,
    pub label: String,
    pub version: String,
    pub variant: Option<String>,
    /// Canonical architecture, matched against `${buildarch}`.
    pub architecture: Arch,
    /// Architecture name as used in the mirror URL.
    pub provider_arch: String,
    pub base_url: String,
    pub kernel_url: String,
    pub initrd_url: String,
    /// Kernel command line; empty when the distribution sets none.
    pub boot_params: String,
}

impl BootEntry {
    /// File name of the initrd, as referenced by `initrd=` on the kernel line.
    pub fn initrd_name(&self) -> &str {
        let path = self.initrd_url.split(['?', '#']).next().unwrap_or_default();
        path.rsplit('/').next().unwrap_or(path)
    }
}

/// The entries of one distribution, in menu order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionMenu {
    /// Submenu label, `{name}_menu`.
    pub id: String,
    pub name: String,
    pub label: String,
    pub entries: Vec<BootEntry>,
}

impl DistributionMenu {
    pub fn new(id: impl Into<String>, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            label: label.into(),
            entries: Vec::new(),
        }
    }

    /// Distinct architectures present, in first-seen order.
    pub fn architectures(&self) -> Vec<Arch> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.architecture) {
                seen.push(entry.architecture);
            }
        }
        seen
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
