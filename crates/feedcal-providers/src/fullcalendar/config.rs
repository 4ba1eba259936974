//! FullCalendar source configuration.

use std::time::Duration;
use url::Url;

use crate::error::{ProviderError, ProviderResult};

/// Configuration for the FullCalendar event source.
#[derive(Debug, Clone)]
pub struct FullCalendarConfig {
    /// URL the window is POSTed to.
    pub url: Url,

    /// UID namespace; defaults to the host of `url`.
    pub namespace: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl FullCalendarConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration for the given source URL.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL does not parse, is not
    /// http(s), or has no host to use as the namespace.
    pub fn new(url: impl AsRef<str>) -> ProviderResult<Self> {
        let url = Url::parse(url.as_ref()).map_err(|e| {
            ProviderError::configuration(format!("invalid source url {:?}", url.as_ref()))
                .with_source(e)
        })?;
        Self::from_url(url)
    }

    /// Creates a configuration from an already parsed URL.
    ///
    /// # Errors
    ///
    /// Same as [`FullCalendarConfig::new`].
    pub fn from_url(url: Url) -> ProviderResult<Self> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProviderError::configuration(format!(
                "unsupported source url scheme: {}",
                url.scheme()
            )));
        }
        let namespace = url
            .host_str()
            .ok_or_else(|| ProviderError::configuration(format!("source url has no host: {url}")))?
            .to_string();

        Ok(Self {
            url,
            namespace,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("feedcal/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Overrides the UID namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the source URL as a string.
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}
