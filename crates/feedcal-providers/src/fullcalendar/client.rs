//! HTTP client for the FullCalendar event endpoint.

use feedcal_core::TimeWindow;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, trace, warn};

use crate::error::{ProviderError, ProviderResult};

use super::config::FullCalendarConfig;

/// HTTP client for the event endpoint.
pub struct FullCalendarClient {
    client: Client,
    config: FullCalendarConfig,
}

impl FullCalendarClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: FullCalendarConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ProviderError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// POSTs the window as `start`/`end` unix seconds and returns the body.
    pub async fn fetch_window(&self, window: &TimeWindow) -> ProviderResult<String> {
        let form = [
            ("start", window.start_unix_seconds().to_string()),
            ("end", window.end_unix_seconds().to_string()),
        ];
        debug!(
            url = %self.config.url,
            start = %form[0].1,
            end = %form[1].1,
            "Requesting events"
        );

        let response = self
            .client
            .post(self.config.url.clone())
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "Request timed out".to_string()
                } else {
                    format!("Request failed: {}", e)
                };
                ProviderError::network(message).with_source(e)
            })?;

        self.handle_response(response).await
    }

    /// Maps the response status to a body or a typed error.
    async fn handle_response(&self, response: Response) -> ProviderResult<String> {
        let status = response.status();
        trace!(status = %status, "Received response");

        match status {
            s if s.is_success() => response
                .text()
                .await
                .map_err(|e| ProviderError::network(format!("Failed to read response: {}", e))),
            StatusCode::NOT_FOUND => Err(ProviderError::not_found(format!(
                "Event endpoint not found: {}",
                self.config.url
            ))),
            s if s.is_server_error() => {
                let body = response.text().await.unwrap_or_default();
                Err(ProviderError::server(format!("Server error ({}): {}", s, body)))
            }
            s if s.is_client_error() => {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %s, body = %body, "Request rejected");
                Err(ProviderError::bad_request(format!(
                    "Request rejected ({}): {}",
                    s, body
                )))
            }
            s => {
                warn!(status = %s, "Unexpected response status");
                Err(ProviderError::invalid_response(format!(
                    "Unexpected status {}",
                    s
                )))
            }
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FullCalendarConfig {
        &self.config
    }
}
