//! Metadata providers for dynamic distributions.
//!
//! A [`MetadataFetcher`] knows one distribution family's release feed. It
//! downloads the feed, turns each release into a [`ResolvedVersion`] and
//! hands the list to [`apply_filter`], so every provider filters, orders and
//! truncates the same way:
//!
//! 1. drop releases whose variant differs from the requested one
//! 2. intersect each release's architectures with the requested list,
//!    dropping releases left with none
//! 3. sort newest first with [`compare_versions`](crate::distribution::compare_versions)
//! 4. keep at most `recency_limit` releases
//!
//! Providers are looked up by name through the [`ProviderRegistry`].

pub mod fedora;
pub mod registry;

pub use fedora::FedoraFetcher;
pub use registry::ProviderRegistry;

use crate::distribution::{sort_descending, ResolvedVersion};
use crate::error::{ElfshoeError, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Default timeout for metadata requests and artifact probes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Release filter from `metadata_filter`.
///
/// Architecture names here are provider tokens; the resolver translates
/// canonical names through the distribution's arch map before fetching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFilter {
    pub variant: Option<String>,
    pub architectures: Option<Vec<String>>,
    pub recency_limit: Option<usize>,
}

/// Fetches the release list of one distribution family.
pub trait MetadataFetcher: Send + Sync {
    /// Registry key, e.g. `fedora`.
    fn name(&self) -> &str;

    /// One-line description for `elfshoe providers`.
    fn description(&self) -> &str;

    /// Fetch and filter releases from `metadata_url`.
    ///
    /// # Errors
    ///
    /// Returns `MetadataFetch` when the source cannot be reached, answers
    /// with a non-success status, or cannot be parsed.
    fn fetch(&self, metadata_url: &str, filter: &MetadataFilter) -> Result<Vec<ResolvedVersion>>;
}

/// Apply the shared filter steps to a provider's raw release list.
pub fn apply_filter(
    releases: Vec<ResolvedVersion>,
    filter: &MetadataFilter,
) -> Vec<ResolvedVersion> {
    let mut kept: Vec<ResolvedVersion> = releases
        .into_iter()
        .filter(|release| match &filter.variant {
            Some(wanted) => release.variant.as_deref() == Some(wanted.as_str()),
            None => true,
        })
        .filter_map(|mut release| {
            if let Some(requested) = &filter.architectures {
                release.architectures = requested
                    .iter()
                    .filter(|arch| release.architectures.contains(arch))
                    .cloned()
                    .collect();
            }
            (!release.architectures.is_empty()).then_some(release)
        })
        .collect();

    sort_descending(&mut kept);

    if let Some(limit) = filter.recency_limit {
        kept.truncate(limit);
    }
    kept
}

/// Build the blocking HTTP client shared by providers and the artifact validator.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(concat!("elfshoe/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| ElfshoeError::Other(anyhow::Error::new(e).context("Failed to build HTTP client")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(version: &str, variant: &str, archs: &[&str]) -> ResolvedVersion {
        ResolvedVersion::new(version, archs.iter().map(|a| a.to_string()).collect())
            .with_variant(variant)
    }

    fn versions(releases: &[ResolvedVersion]) -> Vec<&str> {
        releases.iter().map(|r| r.version.as_str()).collect()
    }

    #[test]
    fn empty_filter_only_sorts() {
        let out = apply_filter(
            vec![
                release("9", "Server", &["x86_64"]),
                release("10", "Server", &["x86_64"]),
                release("41", "Server", &["x86_64"]),
                release("5", "Server", &["x86_64"]),
            ],
            &MetadataFilter::default(),
        );
        assert_eq!(versions(&out), vec!["41", "10", "9", "5"]);
    }

    #[test]
    fn variant_filter_excludes_other_variants() {
        let out = apply_filter(
            vec![
                release("41", "Server", &["x86_64"]),
                release("41", "Workstation", &["x86_64"]),
            ],
            &MetadataFilter {
                variant: Some("Server".into()),
                ..Default::default()
            },
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].variant.as_deref(), Some("Server"));
    }

    #[test]
    fn architecture_filter_intersects_and_keeps_requested_order() {
        let out = apply_filter(
            vec![
                release("41", "Server", &["x86_64", "aarch64", "ppc64le"]),
                release("40", "Server", &["ppc64le"]),
            ],
            &MetadataFilter {
                architectures: Some(vec!["aarch64".into(), "x86_64".into()]),
                ..Default::default()
            },
        );
        assert_eq!(versions(&out), vec!["41"]);
        assert_eq!(out[0].architectures, vec!["aarch64", "x86_64"]);
    }

    #[test]
    fn architecture_filter_never_adds_unrequested_arch() {
        let out = apply_filter(
            vec![release("41", "Server", &["x86_64", "aarch64"])],
            &MetadataFilter {
                architectures: Some(vec!["x86_64".into()]),
                ..Default::default()
            },
        );
        assert_eq!(out[0].architectures, vec!["x86_64"]);
    }

    #[test]
    fn recency_limit_applies_after_sorting() {
        let out = apply_filter(
            vec![
                release("39", "Server", &["x86_64"]),
                release("41", "Server", &["x86_64"]),
                release("40", "Server", &["x86_64"]),
            ],
            &MetadataFilter {
                recency_limit: Some(2),
                ..Default::default()
            },
        );
        assert_eq!(versions(&out), vec!["41", "40"]);
    }

    #[test]
    fn variant_filter_runs_before_recency_limit() {
        let out = apply_filter(
            vec![
                release("42", "Workstation", &["x86_64"]),
                release("41", "Server", &["x86_64"]),
                release("40", "Server", &["x86_64"]),
            ],
            &MetadataFilter {
                variant: Some("Server".into()),
                recency_limit: Some(1),
                ..Default::default()
            },
        );
        assert_eq!(versions(&out), vec!["41"]);
    }

    #[test]
    fn http_client_builds() {
        assert!(http_client(DEFAULT_TIMEOUT).is_ok());
    }
}
