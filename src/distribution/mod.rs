//! Typed distribution specifications.
//!
//! [`DistributionSpec`] is the validated, typed form of a
//! [`DistributionConfig`](crate::config::DistributionConfig). Conversion
//! happens once, before resolution, so the resolver never deals with
//! missing fields or unparsed architecture names.

pub mod arch;
pub mod version;

pub use arch::{Arch, ArchMap};
pub use version::{compare_versions, sort_descending, ResolvedVersion};

use crate::config::schema::{
    ArchitecturesConfig, BootFilesConfig, DistributionConfig, DistributionType,
    MetadataFilterConfig,
};
use crate::error::{ElfshoeError, Result};
use crate::provider::MetadataFilter;
use indexmap::IndexMap;

/// Kernel and initrd paths relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootFiles {
    pub kernel: String,
    pub initrd: String,
}

impl From<&BootFilesConfig> for BootFiles {
    fn from(config: &BootFilesConfig) -> Self {
        Self {
            kernel: config.kernel.clone(),
            initrd: config.initrd.clone(),
        }
    }
}

/// Templates used to build the entries of one architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLayout {
    pub url_template: String,
    pub boot_files: BootFiles,
    pub boot_params: Option<String>,
}

/// Fields an architecture may override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutOverride {
    pub url_template: Option<String>,
    pub boot_files: Option<BootFiles>,
    pub boot_params: Option<String>,
}

/// One version of a static distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticVersion {
    pub version: String,
    pub name: Option<String>,
    pub architectures: Vec<Arch>,
}

/// Where a distribution's versions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// Versions listed in the configuration, kept in declaration order.
    Static(Vec<StaticVersion>),
    /// Versions fetched from a registered metadata provider.
    Dynamic {
        provider: String,
        metadata_url: String,
        filter: MetadataFilter,
    },
}

/// A distribution ready for resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionSpec {
    pub name: String,
    pub label: String,
    pub enabled: bool,
    pub arch_map: ArchMap,
    /// Distribution-level architectures (static default, dynamic request).
    pub architectures: Option<Vec<Arch>>,
    pub layout: EntryLayout,
    pub overrides: IndexMap<Arch, LayoutOverride>,
    pub source: VersionSource,
}

impl DistributionSpec {
    /// Convert a raw configuration block.
    ///
    /// # Errors
    ///
    /// Returns `InvalidField` naming the first unusable field. Run
    /// [`crate::config::validate`] first to collect every problem at once.
    pub fn from_config(name: &str, config: &DistributionConfig) -> Result<Self> {
        let prefix = format!("distributions.{}", name);
        let field = |suffix: &str| format!("{}.{}", prefix, suffix);

        let url_template = config
            .url_template
            .clone()
            .ok_or_else(|| missing(field("url_template")))?;
        let boot_files = config
            .boot_files
            .as_ref()
            .map(BootFiles::from)
            .ok_or_else(|| missing(field("boot_files")))?;

        let arch_map = match &config.arch_map {
            Some(map) => {
                let mut arch_map = ArchMap::new();
                for (token, provider) in map {
                    let arch = parse_arch(token, &field(&format!("arch_map.{}", token)))?;
                    arch_map = arch_map.with(arch, provider.clone());
                }
                arch_map
            }
            None => ArchMap::default_for(name),
        };

        let mut overrides = IndexMap::new();
        let architectures = match &config.architectures {
            None => None,
            Some(ArchitecturesConfig::List(names)) => Some(
                names
                    .iter()
                    .enumerate()
                    .map(|(i, n)| parse_arch(n, &field(&format!("architectures[{}]", i))))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Some(ArchitecturesConfig::PerArch(map)) => {
                let mut archs = Vec::new();
                for (token, cfg) in map {
                    let arch = parse_arch(token, &field(&format!("architectures.{}", token)))?;
                    overrides.insert(
                        arch,
                        LayoutOverride {
                            url_template: cfg.url_template.clone(),
                            boot_files: cfg.boot_files.as_ref().map(BootFiles::from),
                            boot_params: cfg.boot_params.clone(),
                        },
                    );
                    archs.push(arch);
                }
                Some(archs)
            }
        };

        let source = match config.kind {
            DistributionType::Static => {
                let default_archs = architectures.clone().unwrap_or_else(|| vec![Arch::X86_64]);
                let mut versions = Vec::with_capacity(config.versions.len());
                for (i, v) in config.versions.iter().enumerate() {
                    if v.version.trim().is_empty() {
                        return Err(missing(field(&format!("versions[{}].version", i))));
                    }
                    let archs = match &v.architectures {
                        Some(names) => names
                            .iter()
                            .enumerate()
                            .map(|(j, n)| {
                                parse_arch(
                                    n,
                                    &field(&format!("versions[{}].architectures[{}]", i, j)),
                                )
                            })
                            .collect::<Result<Vec<_>>>()?,
                        None => default_archs.clone(),
                    };
                    versions.push(StaticVersion {
                        version: v.version.clone(),
                        name: v.name.clone(),
                        architectures: archs,
                    });
                }
                VersionSource::Static(versions)
            }
            DistributionType::Dynamic => VersionSource::Dynamic {
                provider: config
                    .metadata_provider
                    .clone()
                    .ok_or_else(|| missing(field("metadata_provider")))?,
                metadata_url: config
                    .metadata_url
                    .clone()
                    .ok_or_else(|| missing(field("metadata_url")))?,
                filter: config
                    .metadata_filter
                    .as_ref()
                    .map(MetadataFilter::from)
                    .unwrap_or_default(),
            },
        };

        Ok(Self {
            name: name.to_string(),
            label: config.label.clone().unwrap_or_else(|| name.to_string()),
            enabled: config.enabled,
            arch_map,
            architectures,
            layout: EntryLayout {
                url_template,
                boot_files,
                boot_params: config.boot_params.clone(),
            },
            overrides,
            source,
        })
    }

    /// Identifier of this distribution's submenu.
    pub fn menu_id(&self) -> String {
        menu_id(&self.name)
    }

    /// Entry layout for one architecture, with its overrides applied.
    pub fn layout_for(&self, arch: Arch) -> EntryLayout {
        let mut layout = self.layout.clone();
        if let Some(o) = self.overrides.get(&arch) {
            if let Some(url) = &o.url_template {
                layout.url_template = url.clone();
            }
            if let Some(files) = &o.boot_files {
                layout.boot_files = files.clone();
            }
            if let Some(params) = &o.boot_params {
                layout.boot_params = Some(params.clone());
            }
        }
        layout
    }
}

impl From<&MetadataFilterConfig> for MetadataFilter {
    fn from(config: &MetadataFilterConfig) -> Self {
        Self {
            variant: config.variant.clone(),
            architectures: config.architectures.clone(),
            recency_limit: config.recency_limit,
        }
    }
}

/// Submenu label of a distribution.
pub fn menu_id(distribution: &str) -> String {
    format!("{}_menu", distribution)
}

/// Boot failure handler label of a submenu.
pub fn menu_error_label(menu_id: &str) -> String {
    format!("{}_error", menu_id)
}

/// Label of a submenu's "back to main menu" item.
pub fn menu_back_label(menu_id: &str) -> String {
    format!("back_{}", menu_id)
}

/// Every label the rendered script defines for one submenu.
pub fn menu_labels(menu_id: &str) -> [String; 3] {
    [
        menu_id.to_string(),
        menu_error_label(menu_id),
        menu_back_label(menu_id),
    ]
}

/// Build a boot entry identifier safe for iPXE labels.
pub fn entry_id(distribution: &str, version: &str, arch: Arch) -> String {
    format!("{}_{}_{}", distribution, version, arch)
        .chars()
        .map(|c| match c {
            '-' | '.' | ' ' => '_',
            c => c,
        })
        .collect()
}

fn parse_arch(token: &str, field: &str) -> Result<Arch> {
    token.parse().map_err(|message| ElfshoeError::InvalidField {
        field: field.to_string(),
        message,
    })
}

fn missing(field: String) -> ElfshoeError {
    ElfshoeError::InvalidField {
        field,
        message: "missing required field".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ElfshoeConfig;

    fn spec(yaml: &str, name: &str) -> Result<DistributionSpec> {
        let config: ElfshoeConfig = serde_yaml::from_str(yaml).unwrap();
        DistributionSpec::from_config(name, &config.distributions[name])
    }

    #[test]
    fn static_versions_default_to_x86_64() {
        let s = spec(
            r#"
distributions:
  debian:
    label: Debian
    versions: [{version: bookworm}, {version: trixie, name: Trixie}]
    url_template: http://mirror/{version}/os
    boot_files: {kernel: linux, initrd: initrd.gz}
"#,
            "debian",
        )
        .unwrap();

        match s.source {
            VersionSource::Static(ref versions) => {
                assert_eq!(versions.len(), 2);
                assert_eq!(versions[0].version, "bookworm");
                assert_eq!(versions[0].architectures, vec![Arch::X86_64]);
                assert_eq!(versions[1].name.as_deref(), Some("Trixie"));
            }
            VersionSource::Dynamic { .. } => panic!("expected static source"),
        }
        assert_eq!(s.menu_id(), "debian_menu");
    }

    #[test]
    fn distribution_architectures_feed_versions() {
        let s = spec(
            r#"
distributions:
  centos:
    architectures: [x86_64, arm64]
    versions: [{version: "9"}, {version: "10", architectures: [x86_64]}]
    url_template: http://m/{version}/{arch}
    boot_files: {kernel: k, initrd: i}
"#,
            "centos",
        )
        .unwrap();
        let VersionSource::Static(versions) = s.source else {
            panic!("expected static source");
        };
        assert_eq!(versions[0].architectures, vec![Arch::X86_64, Arch::Arm64]);
        assert_eq!(versions[1].architectures, vec![Arch::X86_64]);
        assert_eq!(s.arch_map.to_provider(Arch::Arm64), "aarch64");
    }

    #[test]
    fn dynamic_requires_metadata_url() {
        let err = spec(
            r#"
distributions:
  fedora:
    type: dynamic
    metadata_provider: fedora
    url_template: http://m/{version}
    boot_files: {kernel: k, initrd: i}
"#,
            "fedora",
        )
        .unwrap_err();
        assert!(err.to_string().contains("distributions.fedora.metadata_url"));
    }

    #[test]
    fn unknown_architecture_names_field() {
        let err = spec(
            r#"
distributions:
  debian:
    versions: [{version: "12", architectures: [sparc]}]
    url_template: http://m/{version}
    boot_files: {kernel: k, initrd: i}
"#,
            "debian",
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("distributions.debian.versions[0].architectures[0]"));
    }

    #[test]
    fn explicit_arch_map_replaces_default() {
        let s = spec(
            r#"
distributions:
  fedora:
    arch_map: {x86_64: x64}
    versions: [{version: "41"}]
    url_template: http://m/{version}/{arch}
    boot_files: {kernel: k, initrd: i}
"#,
            "fedora",
        )
        .unwrap();
        assert_eq!(s.arch_map.to_provider(Arch::X86_64), "x64");
        assert_eq!(s.arch_map.to_provider(Arch::Arm64), "arm64");
    }

    #[test]
    fn per_arch_overrides_apply_to_one_arch() {
        let s = spec(
            r#"
distributions:
  ubuntu:
    architectures:
      x86_64: {}
      arm64:
        url_template: http://ports/{version}/{arch}
        boot_params: console=ttyAMA0
    versions: [{version: "24.04"}]
    url_template: http://archive/{version}/{arch}
    boot_files: {kernel: linux, initrd: initrd.gz}
    boot_params: quiet
"#,
            "ubuntu",
        )
        .unwrap();

        let x86 = s.layout_for(Arch::X86_64);
        assert_eq!(x86.url_template, "http://archive/{version}/{arch}");
        assert_eq!(x86.boot_params.as_deref(), Some("quiet"));

        let arm = s.layout_for(Arch::Arm64);
        assert_eq!(arm.url_template, "http://ports/{version}/{arch}");
        assert_eq!(arm.boot_params.as_deref(), Some("console=ttyAMA0"));
        assert_eq!(arm.boot_files.kernel, "linux");
    }

    #[test]
    fn label_defaults_to_name() {
        let s = spec(
            r#"
distributions:
  alpine:
    versions: [{version: "3.20"}]
    url_template: http://m/{version}
    boot_files: {kernel: k, initrd: i}
"#,
            "alpine",
        )
        .unwrap();
        assert_eq!(s.label, "alpine");
    }

    #[test]
    fn entry_ids_are_label_safe() {
        assert_eq!(entry_id("ubuntu", "24.04", Arch::X86_64), "ubuntu_24_04_x86_64");
        assert_eq!(entry_id("my-distro", "1.0-rc1", Arch::Arm64), "my_distro_1_0_rc1_arm64");
    }
}
