//! CLI definitions using clap derive API
//!
//! Running without a subcommand performs the install. Submodules hold the
//! argument types of the other commands:
//! - config: Config command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod config;

pub use completions::CompletionsArgs;
pub use config::{ConfigArgs, ConfigFormat};

use crate::config::CONFIG_ENV;

/// Darth Waydr - Waydroid installer
///
/// Checks the host, installs dependencies, registers the package repository
/// and installs Waydroid with the packages it needs.
#[derive(Parser, Debug)]
#[command(
    name = "darth-waydr",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Environment-aware Waydroid installer for Debian and Ubuntu hosts",
    long_about = "Darth Waydr verifies the cpu architecture, distribution codename and display \
                  session, installs base dependencies, registers the Waydroid repository, installs \
                  the matching repository packages and Waydroid itself, then offers convenience aliases.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  darth-waydr                          \x1b[90m# Run the full install\x1b[0m\n   \
                  darth-waydr --non-interactive --yes  \x1b[90m# Unattended install\x1b[0m\n   \
                  darth-waydr config --format json     \x1b[90m# Show effective configuration\x1b[0m\n   \
                  darth-waydr completions bash         \x1b[90m# Generate bash completions\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/darth-waydr/config.yaml)
    #[arg(long, short = 'c', global = true, env = CONFIG_ENV, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Never prompt; implied when stdout is not a terminal
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Answer yes to confirmations and pass -y to apt-get
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full install sequence (the default)
    Install,

    /// Print the effective configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
