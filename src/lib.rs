//! elfshoe - iPXE boot menu generator.
//!
//! elfshoe reads a YAML description of Linux distributions and writes an
//! iPXE script offering a submenu per distribution with one boot entry per
//! version and architecture. Versions come either from the configuration
//! or from a metadata provider, and kernel/initrd URLs can be probed
//! before an entry is kept.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`distribution`] - Typed distribution specs, architectures, versions
//! - [`provider`] - Metadata fetchers and the provider registry
//! - [`artifact`] - Kernel/initrd reachability checks
//! - [`resolver`] - Concurrent resolution of distributions into boot entries
//! - [`menu`] - Menu model and assembly
//! - [`render`] - iPXE script rendering
//! - [`generator`] - End-to-end generation pipeline
//! - [`lint`] - iPXE script linting
//! - [`error`] - Error types and result aliases
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use elfshoe::config::parse_config;
//! use elfshoe::generator::generate;
//! use elfshoe::render::{IpxeRenderer, Renderer};
//! use elfshoe::resolver::RunOptions;
//! use std::path::Path;
//!
//! let config = parse_config(
//!     r#"
//! distributions:
//!   debian:
//!     label: Debian
//!     versions: [{version: bookworm}]
//!     url_template: http://mirror/{version}/{arch}
//!     boot_files: {kernel: linux, initrd: initrd.gz}
//! "#,
//!     Path::new("config.yaml"),
//! )
//! .unwrap();
//!
//! let options = RunOptions {
//!     validate_urls: false,
//!     ..RunOptions::default()
//! };
//! let report = generate(&config, options).unwrap();
//! let script = IpxeRenderer::new().render(&report.model);
//!
//! assert!(script.contains("chain http://mirror/bookworm/amd64/linux"));
//! ```

pub mod artifact;
pub mod cli;
pub mod config;
pub mod distribution;
pub mod error;
pub mod generator;
pub mod lint;
pub mod menu;
pub mod provider;
pub mod render;
pub mod resolver;
pub mod ui;

pub use error::{ElfshoeError, Result};
