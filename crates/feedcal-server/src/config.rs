//! Feed configuration.
//!
//! All settings live in a single `config.toml`, by default at
//! `~/.config/feedcal/config.toml`. A handful of environment variables
//! override the file:
//!
//! | Variable | Key |
//! |---|---|
//! | `FEEDCAL_CALENDAR_NAME` | `calendar_name` |
//! | `FEEDCAL_LOCAL_TIMEZONE` | `local_timezone` |
//! | `FEEDCAL_SOURCE_URL` | `source_url` |
//! | `FEEDCAL_UID_NAMESPACE` | `uid_namespace` |
//! | `FEEDCAL_OUTPUT_PATH` | `output.path` |
//!
//! [`FeedConfig`] is the raw, serializable form. [`FeedConfig::resolve`]
//! validates it into [`FeedSettings`], which is what a run consumes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveTime;
use feedcal_core::{Tz, WindowPolicy, parse_zone};
use feedcal_providers::fullcalendar::FullCalendarConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{ServerError, ServerResult};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FEEDCAL_CONFIG";

// ---------------------------------------------------------------------------
// FeedConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the feed as read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Display name of the published calendar.
    pub calendar_name: Option<String>,

    /// IANA zone the source's wall-clock times are read in.
    pub local_timezone: Option<String>,

    /// Event endpoint of the source.
    pub source_url: Option<String>,

    /// UID namespace; defaults to the host of `source_url`.
    pub uid_namespace: Option<String>,

    /// Where the rendered feed is written.
    pub output: OutputSettings,

    /// How far back and ahead events are fetched.
    pub window: WindowPolicy,

    /// When the service runs.
    pub schedule: ScheduleSettings,

    /// HTTP settings for the source.
    pub source: SourceSettings,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Path of the published `.ics` file.
    pub path: Option<PathBuf>,
}

/// Schedule settings for the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    /// Local time of the daily run, in the configured zone.
    pub run_at: NaiveTime,

    /// Also run once as soon as the service starts.
    pub run_on_startup: bool,
}

impl ScheduleSettings {
    /// Default time of the daily run.
    pub const DEFAULT_RUN_AT: NaiveTime = match NaiveTime::from_hms_opt(6, 0, 0) {
        Some(t) => t,
        None => NaiveTime::MIN,
    };
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            run_at: Self::DEFAULT_RUN_AT,
            run_on_startup: false,
        }
    }
}

/// HTTP settings for the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent override.
    pub user_agent: Option<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            timeout_secs: FullCalendarConfig::DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl FeedConfig {
    /// Loads configuration from the default path, or defaults if it does not
    /// exist.
    pub fn load() -> ServerResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ServerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServerError::config(format!("failed to read config {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> ServerResult<Self> {
        toml::from_str(content)
            .map_err(|e| ServerError::config(format!("failed to parse config: {}", e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("feedcal")
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; set values replace file values.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = text("FEEDCAL_CALENDAR_NAME") {
            self.calendar_name = Some(v);
        }
        if let Some(v) = text("FEEDCAL_LOCAL_TIMEZONE") {
            self.local_timezone = Some(v);
        }
        if let Some(v) = text("FEEDCAL_SOURCE_URL") {
            self.source_url = Some(v);
        }
        if let Some(v) = text("FEEDCAL_UID_NAMESPACE") {
            self.uid_namespace = Some(v);
        }
        if let Some(v) = text("FEEDCAL_OUTPUT_PATH") {
            self.output.path = Some(PathBuf::from(v));
        }
        self
    }

    /// Validates the configuration into run settings.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] if a required key is missing or empty,
    /// if the source URL is invalid, or if the zone is unknown.
    pub fn resolve(&self) -> ServerResult<FeedSettings> {
        let calendar_name = required(&self.calendar_name, "calendar_name")?;
        let zone_name = required(&self.local_timezone, "local_timezone")?;
        let url_text = required(&self.source_url, "source_url")?;

        let zone = parse_zone(zone_name).map_err(|e| ServerError::config(e.to_string()))?;
        let source_url = Url::parse(url_text.trim())
            .map_err(|e| ServerError::config(format!("invalid source_url {url_text:?}: {e}")))?;

        let namespace = match self.uid_namespace.as_deref().map(str::trim) {
            Some(ns) if !ns.is_empty() => ns.to_string(),
            _ => source_url
                .host_str()
                .ok_or_else(|| ServerError::config("source_url has no host"))?
                .to_string(),
        };

        if self.source.timeout_secs == 0 {
            return Err(ServerError::config("source.timeout_secs must be positive"));
        }

        Ok(FeedSettings {
            calendar_name: calendar_name.to_string(),
            zone,
            source_url,
            namespace,
            output_path: self.output.path.clone(),
            window: self.window,
            schedule: self.schedule,
            source_timeout: Duration::from_secs(self.source.timeout_secs),
            user_agent: self.source.user_agent.clone(),
        })
    }
}

fn required<'a>(value: &'a Option<String>, key: &str) -> ServerResult<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServerError::config(format!("{key} is required"))),
    }
}

// ---------------------------------------------------------------------------
// FeedSettings (validated)
// ---------------------------------------------------------------------------

/// Validated settings for a run.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// Display name of the published calendar.
    pub calendar_name: String,
    /// Zone the source's wall-clock times are read in.
    pub zone: Tz,
    /// Event endpoint of the source.
    pub source_url: Url,
    /// UID namespace.
    pub namespace: String,
    /// Where the rendered feed is written, if configured.
    pub output_path: Option<PathBuf>,
    /// Fetch window policy.
    pub window: WindowPolicy,
    /// Schedule for the service.
    pub schedule: ScheduleSettings,
    /// Source request timeout.
    pub source_timeout: Duration,
    /// Source user agent override.
    pub user_agent: Option<String>,
}

impl FeedSettings {
    /// Returns the output path, failing if none is configured.
    pub fn require_output_path(&self) -> ServerResult<&Path> {
        self.output_path
            .as_deref()
            .ok_or_else(|| ServerError::config("output.path is required"))
    }

    /// Builds the configuration of the FullCalendar source.
    pub fn source_config(&self) -> ServerResult<FullCalendarConfig> {
        let mut config = FullCalendarConfig::from_url(self.source_url.clone())?
            .with_namespace(&self.namespace)
            .with_timeout(self.source_timeout);
        if let Some(ref agent) = self.user_agent {
            config = config.with_user_agent(agent);
        }
        Ok(config)
    }
}
