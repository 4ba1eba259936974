//! FullCalendar event source implementation.

use feedcal_core::TimeWindow;
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, EventSource};
use crate::raw_event::{SourceEvent, parse_source_events};

use super::client::FullCalendarClient;
use super::config::FullCalendarConfig;

const SOURCE_NAME: &str = "fullcalendar";

/// Event source backed by a FullCalendar-style JSON endpoint.
pub struct FullCalendarSource {
    client: FullCalendarClient,
}

impl FullCalendarSource {
    /// Creates a new source with the given configuration.
    pub fn new(config: FullCalendarConfig) -> ProviderResult<Self> {
        let client =
            FullCalendarClient::new(config).map_err(|e| e.with_source_name(SOURCE_NAME))?;
        Ok(Self { client })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FullCalendarConfig {
        self.client.config()
    }

    async fn fetch(&self, window: TimeWindow) -> ProviderResult<Vec<SourceEvent>> {
        let body = self.client.fetch_window(&window).await?;
        debug!(bytes = body.len(), "Received event payload");

        let events = parse_source_events(&body).map_err(|e| {
            ProviderError::invalid_response(format!("Malformed event payload: {}", e))
                .with_source(e)
        })?;

        info!(count = events.len(), "Fetched events from source");
        Ok(events)
    }
}

impl EventSource for FullCalendarSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn namespace(&self) -> &str {
        &self.client.config().namespace
    }

    fn fetch_events(&self, window: TimeWindow) -> BoxFuture<'_, ProviderResult<Vec<SourceEvent>>> {
        Box::pin(async move {
            self.fetch(window)
                .await
                .map_err(|e| e.with_source_name(SOURCE_NAME))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use chrono::{NaiveDate, TimeZone, Utc};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn window() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2028, 12, 31, 23, 59, 59).unwrap(),
        )
        .unwrap()
    }

    async fn source_for(server: &MockServer) -> FullCalendarSource {
        let config = FullCalendarConfig::new(format!("{}/api/events", server.uri())).unwrap();
        FullCalendarSource::new(config).unwrap()
    }

    #[tokio::test]
    async fn fetches_and_parses_events() {
        let server = MockServer::start().await;
        let body = r#"[
            {"id": "1", "title": "Open day", "start_formatted": "2024-06-01 10:00:00",
             "end_formatted": "2024-06-01 12:00:00", "allDay": false,
             "location": "Hall", "details": null},
            {"id": 2, "title": "Camp", "start_formatted": "2024-07-01 00:00:00",
             "end_formatted": null, "allDay": true, "location": null, "details": "Bring tents"}
        ]"#;
        Mock::given(method("POST"))
            .and(path("/api/events"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let source = source_for(&server).await;
        let events = source.fetch_events(window()).await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "1");
        assert_eq!(
            events[0].start,
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
        assert_eq!(events[1].id, "2");
        assert!(events[1].is_all_day);
    }

    #[tokio::test]
    async fn malformed_payload_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[{"id": "1", "start_formatted": "yesterday"}]"#),
            )
            .mount(&server)
            .await;

        let err = source_for(&server)
            .await
            .fetch_events(window())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
        assert_eq!(err.source_name(), Some("fullcalendar"));
    }

    #[tokio::test]
    async fn status_errors_are_tagged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = source_for(&server)
            .await
            .fetch_events(window())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ServerError);
        assert!(err.to_string().starts_with("[fullcalendar]"));
    }

    #[test]
    fn namespace_is_source_host() {
        let config = FullCalendarConfig::new("https://events.example.org/api").unwrap();
        let source = FullCalendarSource::new(config).unwrap();
        assert_eq!(source.name(), "fullcalendar");
        assert_eq!(source.namespace(), "events.example.org");
    }
}
