//! Fedora release feed (`releases.json`).
//!
//! The feed is a flat JSON array with one record per downloadable image:
//!
//! ```json
//! [{"version": "41", "arch": "aarch64", "variant": "Server", "link": "..."}]
//! ```
//!
//! Records are grouped by version and variant before filtering.

use indexmap::IndexMap;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{apply_filter, http_client, MetadataFetcher, MetadataFilter};
use crate::distribution::ResolvedVersion;
use crate::error::{ElfshoeError, Result};

/// Variant used when the filter does not name one.
pub const DEFAULT_VARIANT: &str = "Server";

#[derive(Debug, Deserialize)]
struct FedoraRelease {
    version: String,
    arch: String,
    #[serde(default)]
    variant: Option<String>,
}

/// Fetches Fedora releases.
pub struct FedoraFetcher {
    client: Client,
}

impl FedoraFetcher {
    /// Create a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
        })
    }

    fn download(&self, url: &str) -> anyhow::Result<Vec<FedoraRelease>> {
        use anyhow::{bail, Context};

        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("request to {} failed", url))?;

        if !response.status().is_success() {
            bail!("HTTP {}", response.status());
        }

        response
            .json::<Vec<FedoraRelease>>()
            .context("invalid releases.json")
    }
}

/// Group feed records into one release per (version, variant).
fn group_releases(records: Vec<FedoraRelease>) -> Vec<ResolvedVersion> {
    let mut grouped: IndexMap<(String, Option<String>), Vec<String>> = IndexMap::new();
    for record in records {
        let archs = grouped
            .entry((record.version, record.variant))
            .or_default();
        if !archs.contains(&record.arch) {
            archs.push(record.arch);
        }
    }

    grouped
        .into_iter()
        .map(|((version, variant), mut archs)| {
            archs.sort();
            let release = ResolvedVersion::new(version, archs);
            match variant {
                Some(v) => release.with_variant(v),
                None => release,
            }
        })
        .collect()
}

impl MetadataFetcher for FedoraFetcher {
    fn name(&self) -> &str {
        "fedora"
    }

    fn description(&self) -> &str {
        "Fedora releases.json feed (variant defaults to Server)"
    }

    fn fetch(&self, metadata_url: &str, filter: &MetadataFilter) -> Result<Vec<ResolvedVersion>> {
        let records = self
            .download(metadata_url)
            .map_err(|e| ElfshoeError::MetadataFetch {
                url: metadata_url.to_string(),
                message: format!("{:#}", e),
            })?;
        debug!(url = metadata_url, records = records.len(), "fetched fedora metadata");

        let filter = MetadataFilter {
            variant: Some(
                filter
                    .variant
                    .clone()
                    .unwrap_or_else(|| DEFAULT_VARIANT.to_string()),
            ),
            ..filter.clone()
        };
        Ok(apply_filter(group_releases(records), &filter))
    }
}
