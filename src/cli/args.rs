//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// Default path of the generated menu.
pub const DEFAULT_OUTPUT_FILE: &str = "elfshoe.ipxe";

/// elfshoe - iPXE boot menu generator.
#[derive(Debug, Parser)]
#[command(name = "elfshoe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the boot menu (default if no command specified)
    Generate(GenerateArgs),

    /// Check iPXE scripts for common mistakes
    Lint(LintArgs),

    /// List available metadata providers
    Providers,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `generate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct GenerateArgs {
    /// Configuration file
    #[arg(short, long, env = "ELFSHOE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Where to write the menu; `-` writes to stdout
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Skip probing kernel and initrd URLs
    #[arg(long)]
    pub no_validate: bool,

    /// Per-request timeout in seconds (overrides settings.request_timeout)
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Maximum concurrent network workers (overrides settings.max_parallel)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub jobs: Option<u64>,
}

impl GenerateArgs {
    /// Whether the menu should go to stdout instead of a file.
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}

impl Default for GenerateArgs {
    fn default() -> Self {
        let config = std::env::var_os("ELFSHOE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self {
            config,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            no_validate: false,
            timeout: None,
            jobs: None,
        }
    }
}

/// Arguments for the `lint` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LintArgs {
    /// iPXE scripts to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format: human, json
    #[arg(long, default_value = "human", value_parser = ["human", "json"])]
    pub format: String,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
