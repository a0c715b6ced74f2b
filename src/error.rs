//! Error types for elfshoe operations.
//!
//! This module defines [`ElfshoeError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration errors are fatal and abort a run before any resolution
//! - Provider and metadata errors are fatal for one distribution only; the
//!   resolver turns them into warnings (see [`crate::resolver::Warning`])
//! - Use `anyhow::Error` (via `ElfshoeError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for elfshoe operations.
#[derive(Debug, Error)]
pub enum ElfshoeError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A single configuration field holds an unusable value.
    #[error("Invalid configuration at '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// Dynamic distribution references an unregistered metadata provider.
    #[error("Unknown metadata provider '{name}' (available: {available})")]
    UnknownProvider { name: String, available: String },

    /// Metadata source could not be reached or parsed.
    #[error("Failed to fetch metadata from {url}: {message}")]
    MetadataFetch { url: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for elfshoe operations.
pub type Result<T> = std::result::Result<T, ElfshoeError>;
