//! One complete feed refresh.
//!
//! Each stage consumes the full output of the previous one: window, fetch,
//! normalize, map, assemble, render, publish. Any error returns before the
//! publish stage, so a failed run leaves the previous feed in place.

use chrono::{DateTime, Utc};
use feedcal_core::{TimeWindow, assemble_calendar, fetch_window, today_in};
use feedcal_providers::{EventSource, map_events, normalize_events, render_calendar};
use tracing::{debug, info};

use crate::config::FeedSettings;
use crate::error::ServerResult;
use crate::publish::FeedSink;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// The window that was requested from the source.
    pub window: TimeWindow,
    /// Number of events in the published feed.
    pub event_count: usize,
    /// Size of the published feed.
    pub bytes_written: usize,
    /// Where the feed went.
    pub target: String,
}

/// Runs the whole refresh once.
///
/// `now` is the observation time: it picks "today" in the configured zone and
/// becomes the DTSTAMP of every event.
#[tracing::instrument(
    skip_all,
    fields(calendar = %settings.calendar_name, source = source.name(), target = %sink.target())
)]
pub async fn run_once(
    settings: &FeedSettings,
    source: &dyn EventSource,
    sink: &dyn FeedSink,
    now: DateTime<Utc>,
) -> ServerResult<RunSummary> {
    let today = today_in(now, &settings.zone);
    let window = fetch_window(today, &settings.zone, settings.window)?;
    info!(%today, start = %window.start, end = %window.end, "Fetch window computed");

    let sources = source.fetch_events(window).await?;
    debug!(count = sources.len(), "Source events received");

    let normalized = normalize_events(sources);
    let events = map_events(&normalized, &settings.zone, source.namespace());
    if let (Some(first), Some(last)) = (
        events.iter().map(|e| e.start.date()).min(),
        events.iter().map(|e| e.end.date()).max(),
    ) {
        debug!(%first, %last, "Mapped event dates");
    }
    let document = assemble_calendar(&settings.calendar_name, events);
    let feed = render_calendar(&document, now);
    debug!(events = document.len(), bytes = feed.len(), "Feed rendered");

    sink.publish(&feed)?;

    let summary = RunSummary {
        window,
        event_count: document.len(),
        bytes_written: feed.len(),
        target: sink.target(),
    };
    info!(
        events = summary.event_count,
        bytes = summary.bytes_written,
        "Run completed"
    );
    Ok(summary)
}
