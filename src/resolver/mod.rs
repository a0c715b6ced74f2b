//! Distribution resolution.
//!
//! The [`DistributionResolver`] turns typed [`DistributionSpec`]s into
//! [`DistributionMenu`]s in three phases:
//!
//! 1. **Expand** every enabled distribution concurrently: obtain its
//!    versions (configuration or metadata provider), then build one
//!    [`BootEntry`] per version and architecture.
//! 2. **Validate** every candidate entry on the same bounded pool when
//!    URL validation is enabled. Entries whose kernel or initrd is not
//!    reachable are dropped.
//! 3. **Join** the results in configuration order.
//!
//! Problems that only affect one distribution (unknown provider, failed
//! fetch, unreachable artifact) become [`Warning`]s; they never abort the
//! run.

pub mod entry;
pub mod pool;
pub mod warning;

pub use entry::{BootEntry, DistributionMenu};
pub use pool::parallel_map;
pub use warning::{Warning, WarningKind};

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::artifact::ArtifactCheck;
use crate::config::schema::Settings;
use crate::config::template::{join_url, substitute};
use crate::distribution::{entry_id, menu_labels, Arch, DistributionSpec, VersionSource};
use crate::provider::{MetadataFilter, ProviderRegistry};

/// Options fixed for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Probe kernel and initrd URLs before keeping an entry.
    pub validate_urls: bool,
    /// Timeout used for metadata fetches and artifact probes.
    pub timeout: Duration,
    /// Upper bound on concurrent network workers.
    pub max_parallel: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            validate_urls: true,
            timeout: crate::provider::DEFAULT_TIMEOUT,
            max_parallel: 8,
        }
    }
}

impl From<&Settings> for RunOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            validate_urls: settings.validate_urls,
            timeout: Duration::from_secs(settings.request_timeout),
            max_parallel: settings.max_parallel,
        }
    }
}

/// Result of resolving a set of distributions.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub menus: Vec<DistributionMenu>,
    pub warnings: Vec<Warning>,
}

impl Resolution {
    /// Drop entries whose label is already taken.
    ///
    /// `reserved` holds labels owned by the rest of the script (fixed
    /// labels and additional item ids). Submenu labels are claimed next,
    /// then entries in menu order; every dropped entry is recorded as a
    /// [`WarningKind::DuplicateEntry`] warning.
    pub fn claim_labels<I>(&mut self, reserved: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut taken: HashSet<String> = reserved.into_iter().collect();
        for menu in &self.menus {
            taken.extend(menu_labels(&menu.id));
        }

        for menu in &mut self.menus {
            let entries = std::mem::take(&mut menu.entries);
            for entry in entries {
                if taken.insert(entry.id.clone()) {
                    menu.entries.push(entry);
                    continue;
                }
                let message = format!(
                    "{} dropped: menu label '{}' is already used",
                    entry.label, entry.id
                );
                record(
                    &mut self.warnings,
                    Warning::new(
                        &menu.name,
                        WarningKind::DuplicateEntry { id: entry.id },
                        message,
                    ),
                );
            }
        }
    }
}

/// A version together with one of its canonical architectures.
struct Candidate {
    version: String,
    detail: Option<String>,
    variant: Option<String>,
    arch: Arch,
}

/// Resolves distributions into boot entries.
pub struct DistributionResolver<'a> {
    registry: &'a ProviderRegistry,
    checker: &'a dyn ArtifactCheck,
    options: RunOptions,
}

impl<'a> DistributionResolver<'a> {
    pub fn new(
        registry: &'a ProviderRegistry,
        checker: &'a dyn ArtifactCheck,
        options: RunOptions,
    ) -> Self {
        Self {
            registry,
            checker,
            options,
        }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Resolve every enabled distribution, preserving input order.
    pub fn resolve_all(&self, specs: &[DistributionSpec]) -> Resolution {
        let enabled: Vec<&DistributionSpec> = specs.iter().filter(|s| s.enabled).collect();

        let mut expanded = parallel_map(&enabled, self.options.max_parallel, |spec| {
            self.expand(spec)
        });

        if self.options.validate_urls {
            self.validate(&mut expanded);
        } else {
            debug!("URL validation disabled");
        }

        let mut resolution = Resolution::default();
        for (menu, warnings) in expanded {
            info!(
                distribution = %menu.name,
                entries = menu.entries.len(),
                "resolved distribution"
            );
            resolution.menus.push(menu);
            resolution.warnings.extend(warnings);
        }
        resolution
    }

    /// Resolve a single distribution.
    pub fn resolve(&self, spec: &DistributionSpec) -> (DistributionMenu, Vec<Warning>) {
        let mut resolution = self.resolve_all(std::slice::from_ref(spec));
        match resolution.menus.pop() {
            Some(menu) => (menu, resolution.warnings),
            None => (
                DistributionMenu::new(spec.menu_id(), &spec.name, &spec.label),
                resolution.warnings,
            ),
        }
    }

    /// Build unvalidated entries for one distribution.
    fn expand(&self, spec: &DistributionSpec) -> (DistributionMenu, Vec<Warning>) {
        let mut warnings = Vec::new();
        let candidates = self.candidates(spec, &mut warnings);

        let mut menu = DistributionMenu::new(spec.menu_id(), &spec.name, &spec.label);
        menu.entries = candidates
            .into_iter()
            .map(|candidate| build_entry(spec, candidate))
            .collect();
        debug!(
            distribution = %spec.name,
            candidates = menu.entries.len(),
            "expanded distribution"
        );
        (menu, warnings)
    }

    fn candidates(&self, spec: &DistributionSpec, warnings: &mut Vec<Warning>) -> Vec<Candidate> {
        match &spec.source {
            VersionSource::Static(versions) => versions
                .iter()
                .flat_map(|v| {
                    v.architectures.iter().map(move |arch| Candidate {
                        version: v.version.clone(),
                        detail: v.name.clone(),
                        variant: None,
                        arch: *arch,
                    })
                })
                .collect(),
            VersionSource::Dynamic {
                provider,
                metadata_url,
                filter,
            } => self.fetch_candidates(spec, provider, metadata_url, filter, warnings),
        }
    }

    fn fetch_candidates(
        &self,
        spec: &DistributionSpec,
        provider: &str,
        metadata_url: &str,
        filter: &MetadataFilter,
        warnings: &mut Vec<Warning>,
    ) -> Vec<Candidate> {
        let fetcher = match self.registry.resolve(provider) {
            Ok(fetcher) => fetcher,
            Err(e) => {
                record(
                    warnings,
                    Warning::new(
                        &spec.name,
                        WarningKind::UnknownProvider {
                            provider: provider.to_string(),
                        },
                        e.to_string(),
                    ),
                );
                return Vec::new();
            }
        };

        let requested: Option<Vec<String>> = filter.architectures.clone().or_else(|| {
            spec.architectures
                .as_ref()
                .map(|archs| archs.iter().map(|a| a.as_str().to_string()).collect())
        });
        let provider_filter = MetadataFilter {
            architectures: requested.map(|tokens| {
                tokens
                    .iter()
                    .map(|t| spec.arch_map.request_token(t))
                    .collect()
            }),
            ..filter.clone()
        };

        let versions = match fetcher.fetch(metadata_url, &provider_filter) {
            Ok(versions) => versions,
            Err(e) => {
                record(
                    warnings,
                    Warning::new(
                        &spec.name,
                        WarningKind::MetadataFetch {
                            url: metadata_url.to_string(),
                        },
                        e.to_string(),
                    ),
                );
                return Vec::new();
            }
        };

        let mut unsupported: Vec<String> = Vec::new();
        let mut blank = 0;
        let mut seen: HashSet<(String, Arch)> = HashSet::new();
        let mut candidates = Vec::new();
        for v in versions {
            if v.version.trim().is_empty() {
                blank += 1;
                continue;
            }
            for token in &v.architectures {
                let Some(arch) = spec.arch_map.from_provider(token) else {
                    if !unsupported.contains(token) {
                        unsupported.push(token.clone());
                    }
                    continue;
                };
                // Several provider tokens (or variants) can map to one entry.
                if !seen.insert((v.version.clone(), arch)) {
                    record(
                        warnings,
                        Warning::new(
                            &spec.name,
                            WarningKind::DuplicateEntry {
                                id: entry_id(&spec.name, &v.version, arch),
                            },
                            format!(
                                "version {} for {} listed again as '{}'; keeping the first",
                                v.version, arch, token
                            ),
                        ),
                    );
                    continue;
                }
                candidates.push(Candidate {
                    version: v.version.clone(),
                    detail: v.name.clone().or_else(|| v.variant.clone()),
                    variant: v.variant.clone(),
                    arch,
                });
            }
        }

        if blank > 0 {
            record(
                warnings,
                Warning::new(
                    &spec.name,
                    WarningKind::BlankVersion,
                    format!("{} release(s) without a version skipped", blank),
                ),
            );
        }

        for token in unsupported {
            let message = format!(
                "provider architecture '{}' has no canonical equivalent; skipped",
                token
            );
            record(
                warnings,
                Warning::new(
                    &spec.name,
                    WarningKind::UnsupportedArchitecture {
                        architecture: token,
                    },
                    message,
                ),
            );
        }
        candidates
    }

    /// Probe every entry across all distributions on one bounded pool.
    fn validate(&self, expanded: &mut [(DistributionMenu, Vec<Warning>)]) {
        let jobs: Vec<(usize, usize)> = expanded
            .iter()
            .enumerate()
            .flat_map(|(d, (menu, _))| (0..menu.entries.len()).map(move |e| (d, e)))
            .collect();

        // Both artifacts are checked so the warning names every missing file.
        let failures = parallel_map(&jobs, self.options.max_parallel, |&(d, e)| {
            let entry = &expanded[d].0.entries[e];
            [&entry.kernel_url, &entry.initrd_url]
                .into_iter()
                .filter(|url| !self.checker.check(url))
                .cloned()
                .collect::<Vec<String>>()
        });

        let mut failed: Vec<Vec<Vec<String>>> = expanded
            .iter()
            .map(|(menu, _)| vec![Vec::new(); menu.entries.len()])
            .collect();
        for ((d, e), failure) in jobs.into_iter().zip(failures) {
            failed[d][e] = failure;
        }

        for ((menu, warnings), failed) in expanded.iter_mut().zip(failed) {
            let entries = std::mem::take(&mut menu.entries);
            for (entry, urls) in entries.into_iter().zip(failed) {
                if urls.is_empty() {
                    menu.entries.push(entry);
                    continue;
                }
                let message = format!(
                    "{} dropped: artifact not reachable at {}",
                    entry.label,
                    urls.join(", ")
                );
                record(
                    warnings,
                    Warning::new(&menu.name, WarningKind::ValidationFailure { urls }, message),
                );
            }
        }
    }
}

fn record(warnings: &mut Vec<Warning>, warning: Warning) {
    warn!(distribution = %warning.distribution, "{}", warning.message);
    warnings.push(warning);
}

fn build_entry(spec: &DistributionSpec, candidate: Candidate) -> BootEntry {
    let layout = spec.layout_for(candidate.arch);
    let provider_arch = spec.arch_map.to_provider(candidate.arch).to_string();
    let vars = [
        ("version", candidate.version.as_str()),
        ("arch", provider_arch.as_str()),
    ];

    let base_url = substitute(&layout.url_template, &vars);
    let kernel_url = join_url(&base_url, &substitute(&layout.boot_files.kernel, &vars));
    let initrd_url = join_url(&base_url, &substitute(&layout.boot_files.initrd, &vars));
    let boot_params = layout
        .boot_params
        .as_deref()
        .map(|params| {
            substitute(
                params,
                &[
                    ("base_url", base_url.as_str()),
                    ("version", candidate.version.as_str()),
                    ("arch", provider_arch.as_str()),
                ],
            )
        })
        .unwrap_or_default();

    let label = match &candidate.detail {
        Some(detail) => format!(
            "{} {} {} ({})",
            spec.label, candidate.version, detail, provider_arch
        ),
        None => format!("{} {} ({})", spec.label, candidate.version, provider_arch),
    };

    BootEntry {
        id: entry_id(&spec.name, &candidate.version, candidate.arch),
        label,
        version: candidate.version,
        variant: candidate.variant,
        architecture: candidate.arch,
        provider_arch,
        base_url,
        kernel_url,
        initrd_url,
        boot_params,
    }
}
