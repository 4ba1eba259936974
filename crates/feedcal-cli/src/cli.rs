//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use feedcal_server::CONFIG_ENV;

/// feedcal - publish a scraped event list as an iCalendar feed
#[derive(Debug, Parser)]
#[command(name = "feedcal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Refresh the feed once and exit
    Run {
        /// Write the feed to stdout instead of the output path
        #[arg(long)]
        stdout: bool,
    },

    /// Refresh the feed every day at the scheduled time
    Serve,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Dump the effective configuration
    Dump,

    /// Validate the configuration
    Validate,

    /// Show configuration file path
    Path,
}
