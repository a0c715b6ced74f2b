//! End-to-end menu generation.
//!
//! Ties the pieces together for one run: validate the configuration,
//! convert it into typed specs, resolve every distribution, drop entries
//! whose label is already taken and assemble the [`MenuModel`]. Rendering is left to the caller so the model can be
//! inspected or rendered by any [`Renderer`](crate::render::Renderer).

use tracing::{debug, info};

use crate::artifact::{ArtifactCheck, UrlValidator};
use crate::config::schema::ElfshoeConfig;
use crate::config::validate;
use crate::distribution::DistributionSpec;
use crate::error::Result;
use crate::menu::{assemble, AdditionalItem, MenuModel, MenuSettings};
use crate::provider::ProviderRegistry;
use crate::render::RESERVED_LABELS;
use crate::resolver::{DistributionResolver, RunOptions, Warning};

/// Outcome of a successful generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub model: MenuModel,
    /// Non-fatal problems, in distribution order.
    pub warnings: Vec<Warning>,
}

impl GenerationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Generate a menu model using the built-in providers and a live URL validator.
///
/// # Errors
///
/// Returns a configuration error before any network access if the
/// configuration is invalid. Per-distribution failures are reported as
/// warnings instead.
pub fn generate(config: &ElfshoeConfig, options: RunOptions) -> Result<GenerationReport> {
    let registry = ProviderRegistry::with_builtins(options.timeout)?;
    let validator = UrlValidator::new(options.timeout)?;
    generate_with(config, &registry, &validator, options)
}

/// Generate a menu model with caller-supplied providers and artifact checker.
pub fn generate_with(
    config: &ElfshoeConfig,
    registry: &ProviderRegistry,
    checker: &dyn ArtifactCheck,
    options: RunOptions,
) -> Result<GenerationReport> {
    validate(config)?;

    // Disabled distributions are not validated, so they are never converted.
    let specs = config
        .distributions
        .iter()
        .filter(|(name, dist)| {
            if !dist.enabled {
                debug!(distribution = %name, "Skipping disabled distribution");
            }
            dist.enabled
        })
        .map(|(name, dist)| DistributionSpec::from_config(name, dist))
        .collect::<Result<Vec<_>>>()?;
    let items = config
        .additional_items
        .iter()
        .enumerate()
        .map(|(i, item)| AdditionalItem::from_config(i, item))
        .collect::<Result<Vec<_>>>()?;

    info!(
        distributions = specs.len(),
        validate_urls = options.validate_urls,
        max_parallel = options.max_parallel,
        "Generating boot menu"
    );

    let resolver = DistributionResolver::new(registry, checker, options);
    let mut resolution = resolver.resolve_all(&specs);
    // Provider data is only known now, so entry ids are checked here.
    resolution.claim_labels(
        RESERVED_LABELS
            .iter()
            .map(|label| label.to_string())
            .chain(items.iter().map(|item| item.id.clone())),
    );

    let model = assemble(
        MenuSettings::from(&config.menu),
        resolution.menus,
        items,
    );
    Ok(GenerationReport {
        model,
        warnings: resolution.warnings,
    })
}
