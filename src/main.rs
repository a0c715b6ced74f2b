//! elfshoe CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use elfshoe::cli::{Cli, CommandDispatcher};
use elfshoe::ui::{should_use_colors, OutputMode, TerminalUI, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so a menu written to stdout stays clean.
fn init_tracing(debug: bool, color: bool) {
    let filter = if debug {
        EnvFilter::new("elfshoe=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("elfshoe=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(color)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let color = !cli.no_color && should_use_colors();
    init_tracing(cli.debug, color);

    tracing::debug!("elfshoe starting with args: {:?}", cli);

    let mut ui = TerminalUI::new(OutputMode::from_flags(cli.quiet, cli.verbose), color);

    match CommandDispatcher::new().dispatch(&cli, &mut ui) {
        Ok(result) => ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1)),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
