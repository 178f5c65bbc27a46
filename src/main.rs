//! Darth Waydr - Waydroid installer
//!
//! Validates the host platform, installs dependencies, registers the
//! Waydroid package repository and installs the packages matching the
//! host architecture, then the application itself.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod error;
mod installer;
mod operator;
mod package_manager;
mod platform;
mod repository;
mod shell;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use commands::install::InstallOptions;

/// Log level when `RUST_LOG` is not set
fn default_log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose))),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = InstallOptions {
        non_interactive: cli.non_interactive,
        assume_yes: cli.yes,
    };
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        None | Some(Commands::Install) => commands::install::run(config_path, options)
            .map(|outcome| ExitCode::from(outcome.exit_code())),
        Some(Commands::Config(args)) => {
            commands::config::run(config_path, &args).map(|()| ExitCode::SUCCESS)
        }
        Some(Commands::Completions(args)) => {
            commands::completions::run(args).map(|()| ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
