//! `kmp` binary entry point.
//!
//! Parses arguments, initializes logging and dispatches to a subcommand.

mod commands;
mod config;

use anyhow::Result;
use config::{CliConfig, Command, default_sheet_path};

fn main() -> Result<()> {
    let config = CliConfig::from_args();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(config.filter_directives()))
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config.command, "starting");

    match &config.command {
        Command::Dump {
            input,
            output,
            overwrite,
        } => {
            let output = output.clone().unwrap_or_else(|| default_sheet_path(input));
            commands::dump(input, &output, *overwrite)
        }
        Command::Build {
            input,
            output,
            overwrite,
        } => commands::build(input, output, *overwrite),
        Command::Inspect { input, json } => commands::inspect(input, *json, &mut std::io::stdout()),
    }
}
