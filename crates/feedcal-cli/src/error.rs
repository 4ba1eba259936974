//! Client error types.

use std::fmt;

use feedcal_core::TracingError;
use feedcal_server::ServerError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the command.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// A feed run failed.
    Run(ServerError),
    /// Logging could not be initialized.
    Logging(TracingError),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Run(err) => write!(f, "run failed: {}", err),
            Self::Logging(err) => write!(f, "logging setup failed: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Run(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<TracingError> for ClientError {
    fn from(err: TracingError) -> Self {
        Self::Logging(err)
    }
}

impl From<ServerError> for ClientError {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Config { message } => Self::Config(message),
            other => Self::Run(other),
        }
    }
}

impl From<feedcal_providers::ProviderError> for ClientError {
    fn from(err: feedcal_providers::ProviderError) -> Self {
        Self::Run(ServerError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_errors_become_config() {
        let err = ClientError::from(ServerError::config("source_url is required"));
        assert!(matches!(err, ClientError::Config(_)));
        assert_eq!(
            err.to_string(),
            "configuration error: source_url is required"
        );
    }

    #[test]
    fn run_errors_keep_source() {
        use std::error::Error;
        let err = ClientError::from(feedcal_providers::ProviderError::not_found("gone"));
        assert!(err.to_string().starts_with("run failed:"));
        assert!(err.source().is_some());
    }
}
