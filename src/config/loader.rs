//! Configuration file loading.
//!
//! A menu is generated from exactly one YAML file; there is no discovery
//! or layering.

use crate::config::schema::ElfshoeConfig;
use crate::config::validator::validate;
use crate::error::{ElfshoeError, Result};
use std::fs;
use std::path::Path;

/// File read when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Load a single config file and parse it into ElfshoeConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ElfshoeConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ElfshoeError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ElfshoeError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into ElfshoeConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<ElfshoeConfig> {
    serde_yaml::from_str(content).map_err(|e| ElfshoeError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file and reject it unless every validation rule passes.
pub fn load_and_validate(path: &Path) -> Result<ElfshoeConfig> {
    let config = load_config_file(path)?;
    validate(&config)?;
    tracing::debug!(
        path = %path.display(),
        distributions = config.distributions.len(),
        items = config.additional_items.len(),
        "Loaded configuration"
    );
    Ok(config)
}
