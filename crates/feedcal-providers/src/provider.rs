//! EventSource trait definition.
//!
//! An [`EventSource`] is the fetch collaborator of a run: given the fetch
//! window it returns the complete list of [`SourceEvent`]s, or fails. There is
//! no partial result and no retry at this level.

use std::future::Future;
use std::pin::Pin;

use feedcal_core::TimeWindow;

use crate::error::{ProviderError, ProviderResult};
use crate::raw_event::SourceEvent;

/// A boxed future for async trait methods.
///
/// Boxing keeps the trait object-safe so the pipeline can hold a
/// `&dyn EventSource`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A source of calendar events.
///
/// # Example Implementation
///
/// ```ignore
/// struct FileSource { path: PathBuf }
///
/// impl EventSource for FileSource {
///     fn name(&self) -> &str { "file" }
///     fn namespace(&self) -> &str { "localhost" }
///
///     fn fetch_events(&self, _window: TimeWindow) -> BoxFuture<'_, ProviderResult<Vec<SourceEvent>>> {
///         Box::pin(async move {
///             let body = tokio::fs::read_to_string(&self.path).await?;
///             Ok(parse_source_events(&body)?)
///         })
///     }
/// }
/// ```
pub trait EventSource: Send + Sync {
    /// Returns the name of this source (e.g. "fullcalendar").
    fn name(&self) -> &str;

    /// Returns the namespace appended to source ids to build UIDs.
    ///
    /// Normally the host of the source, so that two deployments of the same
    /// upstream software never produce colliding UIDs.
    fn namespace(&self) -> &str;

    /// Fetches every event the source reports for `window`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on network errors, non-success statuses and
    /// malformed payloads.
    fn fetch_events(&self, window: TimeWindow) -> BoxFuture<'_, ProviderResult<Vec<SourceEvent>>>;
}

/// A source that always returns the same events.
///
/// Useful for dry runs and tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    namespace: String,
    events: Vec<SourceEvent>,
}

impl StaticSource {
    /// Creates a static source.
    pub fn new(namespace: impl Into<String>, events: Vec<SourceEvent>) -> Self {
        Self {
            namespace: namespace.into(),
            events,
        }
    }
}

impl EventSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn fetch_events(&self, _window: TimeWindow) -> BoxFuture<'_, ProviderResult<Vec<SourceEvent>>> {
        let events = self.events.clone();
        Box::pin(async move { Ok(events) })
    }
}

/// A source that always returns an error.
///
/// This is useful for testing or as a placeholder when a source
/// fails to initialize.
#[derive(Debug)]
pub struct ErrorSource {
    name: String,
    error: ProviderError,
}

impl ErrorSource {
    /// Creates a new error source.
    pub fn new(name: impl Into<String>, error: ProviderError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl EventSource for ErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> &str {
        &self.name
    }

    fn fetch_events(&self, _window: TimeWindow) -> BoxFuture<'_, ProviderResult<Vec<SourceEvent>>> {
        // ProviderError is not Clone because of the boxed cause
        let error =
            ProviderError::new(self.error.code(), self.error.message()).with_source_name(&self.name);
        Box::pin(async move { Err(error) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn window() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn static_source_returns_events() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let source = StaticSource::new("example.org", vec![SourceEvent::new("1", start)]);

        assert_eq!(source.name(), "static");
        assert_eq!(source.namespace(), "example.org");
        let events = source.fetch_events(window()).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "1");
    }

    #[tokio::test]
    async fn error_source_returns_error() {
        let source = ErrorSource::new("broken", ProviderError::server("upstream down"));

        let err = source.fetch_events(window()).await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ServerError);
        assert_eq!(err.message(), "upstream down");
        assert_eq!(err.source_name(), Some("broken"));
    }

    #[test]
    fn trait_is_object_safe() {
        let sources: Vec<Box<dyn EventSource>> = vec![
            Box::new(StaticSource::new("a", vec![])),
            Box::new(ErrorSource::new("b", ProviderError::internal("x"))),
        ];
        let names: Vec<_> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["static", "b"]);
    }
}
