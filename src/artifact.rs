//! Boot artifact existence checks.
//!
//! Before an entry is added to the menu its kernel and initrd URLs can be
//! probed with a `HEAD` request. Every failure mode (timeout, refused
//! connection, 404, 5xx) reports the artifact as unavailable; only building
//! the HTTP client can fail hard.

use reqwest::blocking::Client;
use reqwest::redirect::{Attempt, Policy};
use std::time::Duration;
use tracing::debug;

use crate::error::{ElfshoeError, Result};

const MAX_REDIRECTS: usize = 10;

/// Something that can tell whether a URL points at a fetchable artifact.
pub trait ArtifactCheck: Send + Sync {
    /// `true` when the artifact is reachable.
    fn check(&self, url: &str) -> bool;
}

/// HTTP `HEAD` prober with a bounded timeout.
pub struct UrlValidator {
    client: Client,
    timeout: Duration,
}

impl UrlValidator {
    /// Create a validator whose probes time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("elfshoe/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .redirect(Policy::custom(reject_https_upgrade))
            .build()
            .map_err(|e| {
                ElfshoeError::Other(anyhow::Error::new(e).context("Failed to build HTTP client"))
            })?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe `url`, returning the reason on failure.
    pub fn probe(&self, url: &str) -> std::result::Result<(), String> {
        let response = self
            .client
            .head(url)
            .send()
            .map_err(|e| format!("{:#}", anyhow::Error::new(e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(format!("HTTP {}", status))
        }
    }
}

impl ArtifactCheck for UrlValidator {
    fn check(&self, url: &str) -> bool {
        match self.probe(url) {
            Ok(()) => true,
            Err(reason) => {
                debug!(url, %reason, "artifact probe failed");
                false
            }
        }
    }
}

/// Stock iPXE builds cannot follow an `http://` URL that upgrades to `https://`.
fn reject_https_upgrade(attempt: Attempt) -> reqwest::redirect::Action {
    let upgraded = attempt.url().scheme() == "https"
        && attempt
            .previous()
            .last()
            .is_some_and(|prev| prev.scheme() == "http");

    if upgraded {
        let target = attempt.url().to_string();
        attempt.error(format!(
            "redirects to HTTPS ({}); iPXE cannot boot over HTTPS",
            target
        ))
    } else if attempt.previous().len() > MAX_REDIRECTS {
        attempt.error("too many redirects")
    } else {
        attempt.follow()
    }
}
