//! Configuration validation rules.
//!
//! Validation runs before any network work and reports every problem at
//! once, each tagged with the dotted path of the offending field:
//!
//! - Required fields for each distribution kind are present
//! - Architecture names are canonical
//! - Templates only use supported placeholders
//! - Static version and architecture lists have no repeats
//! - Menu labels are unique across the generated script
//! - Additional items are complete
//!
//! Disabled distributions are not validated; they never reach resolution.

use std::collections::HashSet;

use crate::config::schema::{
    ArchitecturesConfig, BootFilesConfig, DistributionConfig, DistributionType, ElfshoeConfig,
    ItemKind,
};
use crate::config::template::{unknown_placeholders, BOOT_PARAM_PLACEHOLDERS, URL_PLACEHOLDERS};
use crate::distribution::{entry_id, menu_id, menu_labels, Arch};
use crate::error::{ElfshoeError, Result};
use crate::render::RESERVED_LABELS;

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Dotted path of the offending field, e.g. `distributions.fedora.metadata_url`
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            field: field.into(),
            message: message.into(),
        }
    }

    fn missing(field: impl Into<String>) -> Self {
        Self::new("missing-field", field, "missing required field")
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &ElfshoeConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_settings(config));
    for (name, dist) in &config.distributions {
        if dist.enabled {
            errors.extend(validate_distribution(name, dist));
        }
    }
    errors.extend(validate_additional_items(config));
    errors.extend(validate_unique_ids(config));

    errors
}

fn validate_settings(config: &ElfshoeConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if config.settings.request_timeout == 0 {
        errors.push(ValidationError::new(
            "invalid-value",
            "settings.request_timeout",
            "must be at least 1 second",
        ));
    }
    if config.settings.max_parallel == 0 {
        errors.push(ValidationError::new(
            "invalid-value",
            "settings.max_parallel",
            "must be at least 1",
        ));
    }
    if config.menu.default_item.trim().is_empty() {
        errors.push(ValidationError::missing("menu.default_item"));
    }
    errors
}

fn validate_distribution(name: &str, dist: &DistributionConfig) -> Vec<ValidationError> {
    let prefix = format!("distributions.{}", name);
    let field = |suffix: &str| format!("{}.{}", prefix, suffix);
    let mut errors = Vec::new();

    match &dist.url_template {
        None => errors.push(ValidationError::missing(field("url_template"))),
        Some(template) => {
            check_placeholders(&mut errors, &field("url_template"), template, URL_PLACEHOLDERS)
        }
    }
    match &dist.boot_files {
        None => errors.push(ValidationError::missing(field("boot_files"))),
        Some(files) => check_boot_files(&mut errors, &field("boot_files"), files),
    }
    if let Some(params) = &dist.boot_params {
        check_placeholders(&mut errors, &field("boot_params"), params, BOOT_PARAM_PLACEHOLDERS);
    }

    if let Some(map) = &dist.arch_map {
        for (token, provider) in map {
            let path = field(&format!("arch_map.{}", token));
            check_arch(&mut errors, &path, token);
            if provider.trim().is_empty() {
                errors.push(ValidationError::new(
                    "invalid-value",
                    path,
                    "provider architecture cannot be empty",
                ));
            }
        }
    }

    match &dist.architectures {
        None => {}
        Some(ArchitecturesConfig::List(names)) => {
            check_arch_list(&mut errors, &field("architectures"), names);
        }
        Some(ArchitecturesConfig::PerArch(map)) => {
            for (arch, overrides) in map {
                let path = field(&format!("architectures.{}", arch));
                check_arch(&mut errors, &path, arch);
                if let Some(template) = &overrides.url_template {
                    check_placeholders(
                        &mut errors,
                        &format!("{}.url_template", path),
                        template,
                        URL_PLACEHOLDERS,
                    );
                }
                if let Some(files) = &overrides.boot_files {
                    check_boot_files(&mut errors, &format!("{}.boot_files", path), files);
                }
                if let Some(params) = &overrides.boot_params {
                    check_placeholders(
                        &mut errors,
                        &format!("{}.boot_params", path),
                        params,
                        BOOT_PARAM_PLACEHOLDERS,
                    );
                }
            }
        }
    }

    match dist.kind {
        DistributionType::Static => {
            if dist.versions.is_empty() {
                errors.push(ValidationError::missing(field("versions")));
            }
            let mut seen = HashSet::new();
            for (i, version) in dist.versions.iter().enumerate() {
                let path = field(&format!("versions[{}]", i));
                if version.version.trim().is_empty() {
                    errors.push(ValidationError::missing(format!("{}.version", path)));
                } else if !seen.insert(version.version.as_str()) {
                    errors.push(ValidationError::new(
                        "duplicate-version",
                        format!("{}.version", path),
                        format!("version '{}' is listed more than once", version.version),
                    ));
                }
                if let Some(archs) = &version.architectures {
                    check_arch_list(&mut errors, &format!("{}.architectures", path), archs);
                }
            }
            let dynamic_only = [
                ("metadata_provider", dist.metadata_provider.is_some()),
                ("metadata_url", dist.metadata_url.is_some()),
                ("metadata_filter", dist.metadata_filter.is_some()),
            ];
            for (key, present) in dynamic_only {
                if present {
                    errors.push(ValidationError::new(
                        "unexpected-field",
                        field(key),
                        "only valid for type: dynamic",
                    ));
                }
            }
        }
        DistributionType::Dynamic => {
            if dist.metadata_provider.as_deref().map_or(true, str::is_empty) {
                errors.push(ValidationError::missing(field("metadata_provider")));
            }
            if dist.metadata_url.as_deref().map_or(true, str::is_empty) {
                errors.push(ValidationError::missing(field("metadata_url")));
            }
            if !dist.versions.is_empty() {
                errors.push(ValidationError::new(
                    "unexpected-field",
                    field("versions"),
                    "only valid for type: static",
                ));
            }
            if let Some(filter) = &dist.metadata_filter {
                if filter.recency_limit == Some(0) {
                    errors.push(ValidationError::new(
                        "invalid-value",
                        field("metadata_filter.recency_limit"),
                        "must be at least 1",
                    ));
                }
                if let Some(archs) = &filter.architectures {
                    if archs.is_empty() {
                        errors.push(ValidationError::new(
                            "invalid-value",
                            field("metadata_filter.architectures"),
                            "cannot be empty",
                        ));
                    }
                    let mut seen = HashSet::new();
                    for (i, arch) in archs.iter().enumerate() {
                        if !seen.insert(arch.as_str()) {
                            errors.push(ValidationError::new(
                                "duplicate-architecture",
                                field(&format!("metadata_filter.architectures[{}]", i)),
                                format!("architecture '{}' is listed more than once", arch),
                            ));
                        }
                    }
                }
            }
        }
    }

    errors
}

fn validate_additional_items(config: &ElfshoeConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (i, item) in config.additional_items.iter().enumerate() {
        let field = |name: &str| format!("additional_items[{}].{}", i, name);

        if item.id.trim().is_empty() {
            errors.push(ValidationError::missing(field("id")));
        }
        match item.kind {
            None => errors.push(ValidationError::missing(field("type"))),
            Some(ItemKind::Chain) => {
                if item.url.as_deref().map_or(true, str::is_empty) {
                    errors.push(ValidationError::missing(field("url")));
                }
            }
            Some(_) => {
                if item.url.is_some() {
                    errors.push(ValidationError::new(
                        "unexpected-field",
                        field("url"),
                        "only valid for type: chain",
                    ));
                }
            }
        }
    }

    errors
}

/// Menu labels share one namespace in the generated script.
fn validate_unique_ids(config: &ElfshoeConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<String> = RESERVED_LABELS.iter().map(|s| s.to_string()).collect();

    let mut claim = |id: String, field: String, errors: &mut Vec<ValidationError>| {
        if !seen.insert(id.clone()) {
            errors.push(ValidationError::new(
                "duplicate-id",
                field,
                format!("menu label '{}' is already used", id),
            ));
        }
    };

    for (name, dist) in config.distributions.iter().filter(|(_, d)| d.enabled) {
        for label in menu_labels(&menu_id(name)) {
            claim(label, format!("distributions.{}", name), &mut errors);
        }
        if dist.kind != DistributionType::Static {
            continue;
        }
        let default_archs: Vec<String> = dist
            .architectures
            .as_ref()
            .map(ArchitecturesConfig::names)
            .unwrap_or_else(|| vec![Arch::X86_64.to_string()]);
        // Repeated (version, arch) pairs are reported as duplicate-version or
        // duplicate-architecture. Distinct pairs can still share an id, e.g.
        // "12.1" and "12_1".
        let mut pairs = HashSet::new();
        for (i, version) in dist.versions.iter().enumerate() {
            let archs = version.architectures.as_ref().unwrap_or(&default_archs);
            for arch in archs.iter().filter_map(|a| a.parse::<Arch>().ok()) {
                if !pairs.insert((version.version.as_str(), arch)) {
                    continue;
                }
                claim(
                    entry_id(name, &version.version, arch),
                    format!("distributions.{}.versions[{}]", name, i),
                    &mut errors,
                );
            }
        }
    }

    for (i, item) in config.additional_items.iter().enumerate() {
        if !item.id.trim().is_empty() {
            claim(
                item.id.clone(),
                format!("additional_items[{}].id", i),
                &mut errors,
            );
        }
    }

    errors
}

fn check_arch_list(errors: &mut Vec<ValidationError>, field: &str, names: &[String]) {
    let mut seen = HashSet::new();
    for (i, arch) in names.iter().enumerate() {
        let path = format!("{}[{}]", field, i);
        check_arch(errors, &path, arch);
        if !seen.insert(arch.as_str()) {
            errors.push(ValidationError::new(
                "duplicate-architecture",
                path,
                format!("architecture '{}' is listed more than once", arch),
            ));
        }
    }
}

fn check_arch(errors: &mut Vec<ValidationError>, field: &str, token: &str) {
    if let Err(message) = token.parse::<Arch>() {
        errors.push(ValidationError::new("unknown-architecture", field, message));
    }
}

fn check_boot_files(errors: &mut Vec<ValidationError>, field: &str, files: &BootFilesConfig) {
    if files.kernel.trim().is_empty() {
        errors.push(ValidationError::missing(format!("{}.kernel", field)));
    } else {
        check_placeholders(errors, &format!("{}.kernel", field), &files.kernel, URL_PLACEHOLDERS);
    }
    if files.initrd.trim().is_empty() {
        errors.push(ValidationError::missing(format!("{}.initrd", field)));
    } else {
        check_placeholders(errors, &format!("{}.initrd", field), &files.initrd, URL_PLACEHOLDERS);
    }
}

fn check_placeholders(
    errors: &mut Vec<ValidationError>,
    field: &str,
    template: &str,
    allowed: &[&str],
) {
    for name in unknown_placeholders(template, allowed) {
        errors.push(ValidationError::new(
            "unknown-placeholder",
            field,
            format!(
                "unknown placeholder '{{{}}}' (supported: {})",
                name,
                allowed
                    .iter()
                    .map(|p| format!("{{{}}}", p))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ));
    }
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` listing every failed rule as
/// `field: message`, joined with `; `.
pub fn validate(config: &ElfshoeConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(ToString::to_string).collect();
        Err(ElfshoeError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(yaml: &str) -> Vec<ValidationError> {
        let config: ElfshoeConfig = serde_yaml::from_str(yaml).unwrap();
        validate_config(&config)
    }

    fn has(errors: &[ValidationError], rule: &str, field: &str) -> bool {
        errors.iter().any(|e| e.rule == rule && e.field == field)
    }

    const VALID: &str = r#"
menu:
  default_item: fedora_menu
distributions:
  fedora:
    label: Fedora
    type: dynamic
    metadata_provider: fedora
    metadata_url: https://fedoraproject.org/releases.json
    metadata_filter: {variant: Server, architectures: [x86_64, arm64], recency_limit: 2}
    url_template: http://mirror/fedora/releases/{version}/Server/{arch}/os
    boot_files: {kernel: images/pxeboot/vmlinuz, initrd: images/pxeboot/initrd.img}
    boot_params: inst.repo={base_url} console=${console}
  debian:
    label: Debian
    versions: [{version: bookworm}, {version: trixie}]
    url_template: http://mirror/{version}/os
    boot_files: {kernel: linux, initrd: initrd.gz}
additional_items:
  - {id: netboot, label: netboot.xyz, type: chain, url: "http://boot.netboot.xyz"}
  - {id: shell, label: iPXE Shell, type: shell}
"#;

    #[test]
    fn valid_config_returns_no_errors() {
        assert_eq!(errors(VALID), vec![]);
    }

    #[test]
    fn dynamic_requires_metadata_fields() {
        let errs = errors(
            r#"
distributions:
  fedora:
    type: dynamic
    url_template: http://m/{version}
    boot_files: {kernel: k, initrd: i}
"#,
        );
        assert!(has(&errs, "missing-field", "distributions.fedora.metadata_url"));
        assert!(has(&errs, "missing-field", "distributions.fedora.metadata_provider"));
    }

    #[test]
    fn static_requires_versions_and_templates() {
        let errs = errors("distributions:\n  debian:\n    label: Debian\n");
        assert!(has(&errs, "missing-field", "distributions.debian.versions"));
        assert!(has(&errs, "missing-field", "distributions.debian.url_template"));
        assert!(has(&errs, "missing-field", "distributions.debian.boot_files"));
    }

    #[test]
    fn rejects_unknown_architecture() {
        let errs = errors(
            r#"
distributions:
  debian:
    architectures: [x86_64, aarch64]
    versions: [{version: "12"}]
    url_template: http://m/{version}/{arch}
    boot_files: {kernel: k, initrd: i}
"#,
        );
        assert!(has(
            &errs,
            "unknown-architecture",
            "distributions.debian.architectures[1]"
        ));
    }

    #[test]
    fn rejects_unknown_placeholders() {
        let errs = errors(
            r#"
distributions:
  debian:
    versions: [{version: "12"}]
    url_template: http://m/{release}/{arch}
    boot_files: {kernel: k, initrd: i}
    boot_params: url={base_url} x={flavor} console=${console}
"#,
        );
        assert!(has(&errs, "unknown-placeholder", "distributions.debian.url_template"));
        assert!(has(&errs, "unknown-placeholder", "distributions.debian.boot_params"));
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn rejects_duplicate_static_versions() {
        let errs = errors(
            r#"
distributions:
  debian:
    versions: [{version: "12"}, {version: "12"}]
    url_template: http://m/{version}
    boot_files: {kernel: k, initrd: i}
"#,
        );
        assert!(has(
            &errs,
            "duplicate-version",
            "distributions.debian.versions[1].version"
        ));
        assert!(!errs.iter().any(|e| e.rule == "duplicate-id"));
    }

    #[test]
    fn rejects_colliding_entry_ids() {
        // "1.0" and "1-0" both normalize to debian_1_0_x86_64.
        let errs = errors(
            r#"
distributions:
  debian:
    versions: [{version: "1.0"}, {version: "1-0"}]
    url_template: http://m/{version}
    boot_files: {kernel: k, initrd: i}
"#,
        );
        assert!(has(&errs, "duplicate-id", "distributions.debian.versions[1]"));
    }

    #[test]
    fn rejects_item_id_clashing_with_menu() {
        let errs = errors(
            r#"
distributions:
  debian:
    versions: [{version: "12"}]
    url_template: http://m/{version}
    boot_files: {kernel: k, initrd: i}
additional_items:
  - {id: debian_menu, label: Oops, type: shell}
"#,
        );
        assert!(has(&errs, "duplicate-id", "additional_items[0].id"));
    }

    #[test]
    fn rejects_repeated_architectures() {
        let errs = errors(
            r#"
distributions:
  debian:
    architectures: [x86_64, x86_64]
    versions: [{version: "12"}, {version: "13", architectures: [arm64, x86_64, arm64]}]
    url_template: http://m/{version}/{arch}
    boot_files: {kernel: k, initrd: i}
"#,
        );
        assert!(has(
            &errs,
            "duplicate-architecture",
            "distributions.debian.architectures[1]"
        ));
        assert!(has(
            &errs,
            "duplicate-architecture",
            "distributions.debian.versions[1].architectures[2]"
        ));
        assert!(!errs.iter().any(|e| e.rule == "duplicate-id"));
    }

    #[test]
    fn rejects_repeated_filter_architectures() {
        let errs = errors(
            r#"
distributions:
  fedora:
    type: dynamic
    metadata_provider: fedora
    metadata_url: http://meta/releases.json
    metadata_filter: {architectures: [aarch64, aarch64]}
    url_template: http://m/{version}/{arch}
    boot_files: {kernel: k, initrd: i}
"#,
        );
        assert!(has(
            &errs,
            "duplicate-architecture",
            "distributions.fedora.metadata_filter.architectures[1]"
        ));
    }

    #[test]
    fn rejects_item_id_clashing_with_submenu_labels() {
        let errs = errors(
            r#"
distributions:
  debian:
    versions: [{version: "12"}]
    url_template: http://m/{version}
    boot_files: {kernel: k, initrd: i}
additional_items:
  - {id: back_debian_menu, label: Back, type: exit}
  - {id: debian_menu_error, label: Error, type: shell}
  - {id: start, label: Start, type: shell}
"#,
        );
        assert!(has(&errs, "duplicate-id", "additional_items[0].id"));
        assert!(has(&errs, "duplicate-id", "additional_items[1].id"));
        assert!(has(&errs, "duplicate-id", "additional_items[2].id"));
    }

    #[test]
    fn chain_item_requires_url() {
        let errs = errors("additional_items:\n  - {id: nb, label: NB, type: chain}\n");
        assert!(has(&errs, "missing-field", "additional_items[0].url"));
    }

    #[test]
    fn disabled_distributions_are_not_validated() {
        let errs = errors("distributions:\n  broken:\n    enabled: false\n    type: dynamic\n");
        assert!(errs.is_empty());
    }

    #[test]
    fn zero_settings_are_rejected() {
        let errs = errors("settings: {max_parallel: 0, request_timeout: 0}\n");
        assert!(has(&errs, "invalid-value", "settings.max_parallel"));
        assert!(has(&errs, "invalid-value", "settings.request_timeout"));
    }

    #[test]
    fn validate_joins_field_paths() {
        let config: ElfshoeConfig = serde_yaml::from_str(
            r#"
distributions:
  fedora:
    type: dynamic
    metadata_provider: fedora
    url_template: http://m/{version}
    boot_files: {kernel: k, initrd: i}
"#,
        )
        .unwrap();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("distributions.fedora.metadata_url: missing required field"));
    }
}
