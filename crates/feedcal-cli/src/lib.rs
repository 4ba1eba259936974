//! CLI, config loading, command dispatch
//!
//! This crate provides the `feedcal` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
