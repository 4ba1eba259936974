//! Run command: one refresh, then exit.

use chrono::Utc;
use feedcal_providers::fullcalendar::FullCalendarSource;
use feedcal_server::{FeedConfig, FeedSink, FileSink, RunSummary, StdoutSink, run_once};
use tracing::info;

use crate::error::ClientResult;

/// Refreshes the feed once.
///
/// With `to_stdout` the feed is printed instead of written to the output
/// path, which then need not be configured.
pub async fn run(config: &FeedConfig, to_stdout: bool) -> ClientResult<RunSummary> {
    let settings = config.resolve()?;
    let source = FullCalendarSource::new(settings.source_config()?)?;

    let sink: Box<dyn FeedSink> = if to_stdout {
        Box::new(StdoutSink)
    } else {
        Box::new(FileSink::new(settings.require_output_path()?))
    };

    let summary = run_once(&settings, &source, sink.as_ref(), Utc::now()).await?;
    info!(
        events = summary.event_count,
        target = %summary.target,
        "Feed refreshed"
    );
    Ok(summary)
}
