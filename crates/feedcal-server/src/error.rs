//! Server error types.

use std::io;
use std::path::PathBuf;

use feedcal_core::TimeError;
use feedcal_providers::ProviderError;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while running the feed.
///
/// Every variant aborts the run it occurs in; nothing is published.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error (config file, stdout, etc.).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Missing or invalid configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The event source failed.
    #[error("Source error: {0}")]
    Provider(#[from] ProviderError),

    /// Window computation or zone resolution failed.
    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    /// Writing the rendered feed failed; the previous feed is untouched.
    #[error("Failed to publish feed to {path}: {source}")]
    Publish {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ServerError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a publish error.
    pub fn publish(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Publish {
            path: path.into(),
            source,
        }
    }

    /// Returns true for errors that no retry can fix without a config change.
    pub fn is_config(&self) -> bool {
        match self {
            Self::Config { .. } => true,
            Self::Time(e) => {
                e.is_transition()
                    || matches!(
                        e,
                        TimeError::UnknownTimezone(_) | TimeError::InvertedWindow { .. }
                    )
            }
            _ => false,
        }
    }
}
