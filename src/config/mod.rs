//! Configuration loading, parsing, and validation for elfshoe.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Validation in [`validator`]
//! - Placeholder templates in [`template`]
//!
//! # Example
//!
//! ```
//! use elfshoe::config::{load_config_file, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yaml");
//! fs::write(&path, "menu:\n  title: Lab\n").unwrap();
//!
//! let config = load_config_file(&path).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.menu.title, "Lab");
//! ```

pub mod loader;
pub mod schema;
pub mod template;
pub mod validator;

// Schema re-exports
pub use schema::{
    AdditionalItemConfig, ArchOverrideConfig, ArchitecturesConfig, BootFilesConfig,
    DistributionConfig, DistributionType, ElfshoeConfig, ItemKind, MenuConfig,
    MetadataFilterConfig, Settings, VersionConfig,
};

// Loader re-exports
pub use loader::{load_and_validate, load_config_file, parse_config, DEFAULT_CONFIG_FILE};

// Validator re-exports
pub use validator::{validate, validate_config, ValidationError};
