//! Provider registry.
//!
//! The [`ProviderRegistry`] maps `metadata_provider` names to fetchers.
//! It is built once per run and only read afterwards, so it can be shared
//! across resolver workers by reference.

use std::collections::BTreeMap;
use std::time::Duration;

use super::{FedoraFetcher, MetadataFetcher};
use crate::error::{ElfshoeError, Result};

/// Registry of metadata fetchers keyed by provider name.
pub struct ProviderRegistry {
    providers: BTreeMap<String, Box<dyn MetadataFetcher>>,
}

impl ProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            providers: BTreeMap::new(),
        }
    }

    /// Create a registry with every built-in provider.
    ///
    /// # Errors
    ///
    /// Fails only if an HTTP client cannot be constructed.
    pub fn with_builtins(timeout: Duration) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(FedoraFetcher::new(timeout)?));
        Ok(registry)
    }

    /// Register a fetcher under its own name, replacing any previous one.
    pub fn register(&mut self, fetcher: Box<dyn MetadataFetcher>) {
        self.providers.insert(fetcher.name().to_string(), fetcher);
    }

    /// Look up a fetcher by name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProvider` listing the registered names.
    pub fn resolve(&self, name: &str) -> Result<&dyn MetadataFetcher> {
        self.providers
            .get(name)
            .map(|p| p.as_ref())
            .ok_or_else(|| ElfshoeError::UnknownProvider {
                name: name.to_string(),
                available: self.available(),
            })
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    /// Iterate over all fetchers, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &dyn MetadataFetcher> {
        self.providers.values().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn available(&self) -> String {
        if self.providers.is_empty() {
            "none".to_string()
        } else {
            self.names().join(", ")
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::ResolvedVersion;
    use crate::provider::MetadataFilter;

    struct StubFetcher {
        name: &'static str,
    }

    impl MetadataFetcher for StubFetcher {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "stub"
        }

        fn fetch(&self, _url: &str, _filter: &MetadataFilter) -> Result<Vec<ResolvedVersion>> {
            Ok(vec![ResolvedVersion::new("1", vec!["x86_64".into()])])
        }
    }

    #[test]
    fn builtins_include_fedora() {
        let registry = ProviderRegistry::with_builtins(Duration::from_secs(1)).unwrap();
        assert!(registry.resolve("fedora").is_ok());
        assert_eq!(registry.names(), vec!["fedora"]);
    }

    #[test]
    fn unknown_provider_lists_available() {
        let registry = ProviderRegistry::with_builtins(Duration::from_secs(1)).unwrap();
        let err = match registry.resolve("gentoo") {
            Err(e) => e.to_string(),
            Ok(_) => panic!("gentoo should not resolve"),
        };
        assert!(err.contains("gentoo"));
        assert!(err.contains("available: fedora"));
    }

    #[test]
    fn empty_registry_reports_none() {
        let registry = ProviderRegistry::new();
        assert!(registry.is_empty());
        let err = registry.resolve("fedora").err().unwrap();
        assert!(err.to_string().contains("available: none"));
    }

    #[test]
    fn register_adds_provider() {
        let mut registry = ProviderRegistry::new();
        registry.register(Box::new(StubFetcher { name: "alpine" }));
        registry.register(Box::new(StubFetcher { name: "arch" }));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["alpine", "arch"]);
        let versions = registry
            .resolve("arch")
            .unwrap()
            .fetch("http://unused", &MetadataFilter::default())
            .unwrap();
        assert_eq!(versions[0].version, "1");
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = ProviderRegistry::new();
        registry.register(Box::new(StubFetcher { name: "x" }));
        registry.register(Box::new(StubFetcher { name: "x" }));
        assert_eq!(registry.len(), 1);
    }
}
