//! Configuration loading for the command.
//!
//! Lookup order for the file: `--config`, then `$FEEDCAL_CONFIG` (both via
//! clap), then `~/.config/feedcal/config.toml`. Environment overrides are
//! applied on top in every case.

use std::path::{Path, PathBuf};

use feedcal_server::FeedConfig;
use tracing::debug;

use crate::error::ClientResult;

/// Returns the config file that will be read.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(FeedConfig::default_path)
}

/// Loads the configuration and applies environment overrides.
///
/// An explicit path must exist; the default path may be absent.
pub fn load(explicit: Option<&Path>) -> ClientResult<FeedConfig> {
    let config = match explicit {
        Some(path) => {
            debug!(path = %path.display(), "Loading config");
            FeedConfig::load_from(path)?
        }
        None => FeedConfig::load()?,
    };
    Ok(config.with_env_overrides())
}
