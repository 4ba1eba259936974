//! Configuration commands.

use std::path::Path;

use feedcal_server::FeedConfig;

use crate::config::config_path;
use crate::error::{ClientError, ClientResult};

/// Dump the effective configuration (file plus environment) to stdout.
pub fn dump(config: &FeedConfig, explicit: Option<&Path>) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", config_path(explicit).display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &FeedConfig) -> ClientResult<()> {
    let settings = config.resolve()?;
    settings.source_config()?;

    println!("calendar:  {}", settings.calendar_name);
    println!("zone:      {}", settings.zone.name());
    println!("source:    {}", settings.source_url);
    println!("namespace: {}", settings.namespace);
    match settings.output_path {
        Some(ref path) => println!("output:    {}", path.display()),
        None => println!("output:    (not set, only `run --stdout` will work)"),
    }
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(explicit: Option<&Path>) -> ClientResult<()> {
    println!("config: {}", config_path(explicit).display());
    Ok(())
}
