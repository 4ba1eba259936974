//! Serve command: runs the daily scheduler in the foreground.
//!
//! Orchestrates:
//! - Signal handler (SIGTERM/SIGINT for shutdown)
//! - Source and file sink built once from config
//! - Scheduler (daily run at `schedule.run_at`, optional startup run)

use std::sync::Arc;

use chrono::Utc;
use feedcal_providers::fullcalendar::FullCalendarSource;
use feedcal_server::{FeedConfig, FileSink, Scheduler, SchedulerConfig, SignalHandler, run_once};
use tracing::{error, info};

use crate::error::ClientResult;

/// Starts the service and blocks until a shutdown signal arrives.
pub async fn run(config: &FeedConfig) -> ClientResult<()> {
    // 1. Validate everything up front; a bad config never reaches the loop
    let settings = Arc::new(config.resolve()?);
    let source = Arc::new(FullCalendarSource::new(settings.source_config()?)?);
    let sink = Arc::new(FileSink::new(settings.require_output_path()?));

    info!(
        calendar = %settings.calendar_name,
        source = %settings.source_url,
        output = %sink.path().display(),
        "Starting feed service"
    );

    // 2. Signal handler
    let signal_handler = SignalHandler::new();
    signal_handler.spawn_listener()?;

    // 3. Scheduler
    let scheduler = Scheduler::new(SchedulerConfig::from_settings(
        settings.zone,
        &settings.schedule,
    ));

    scheduler
        .run(
            move || {
                let settings = settings.clone();
                let source = source.clone();
                let sink = sink.clone();
                async move {
                    run_once(&settings, source.as_ref(), sink.as_ref(), Utc::now())
                        .await
                        .map(|_| ())
                        .map_err(|e| {
                            if e.is_config() {
                                error!(error = %e, "Run failed on configuration, retries will not help");
                            }
                            e.to_string()
                        })
                }
            },
            signal_handler.shutdown().wait(),
        )
        .await;

    info!("Feed service stopped");
    Ok(())
}
