//! Command-line interface definitions.
//!
//! Defines the CLI structure for arbhunter using `clap`: a long-running
//! `run` command and `check` diagnostics.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Crypto spot-price arbitrage detector
#[derive(Parser, Debug)]
#[command(name = "arbhunter")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll exchanges and record arbitrage opportunities
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `arbhunter check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file.
    Config(ConfigPathArg),
    /// Open the database, apply migrations and run the probe write.
    Database(ConfigPathArg),
    /// Fetch prices once from every enabled exchange.
    Exchanges(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Run a single detection cycle and exit.
    #[arg(long)]
    pub once: bool,

    /// Log results instead of writing them to the database.
    #[arg(long)]
    pub no_db: bool,

    /// Seconds between detection cycles (overrides config).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Skip the startup banner.
    #[arg(long)]
    pub no_banner: bool,
}
