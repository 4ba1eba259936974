//! Feed service: configuration, run pipeline, publication and scheduling.
//!
//! This crate turns the pure pieces of `feedcal-core` and
//! `feedcal-providers` into a running service:
//! - [`FeedConfig`] / [`FeedSettings`] - TOML configuration with environment overrides
//! - [`run_once`] - one complete refresh, all-or-nothing
//! - [`FeedSink`] - atomic file publication or stdout
//! - [`Scheduler`] - daily trigger with optional startup run
//! - [`SignalHandler`] - graceful shutdown on SIGTERM/SIGINT
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use feedcal_providers::fullcalendar::FullCalendarSource;
//! use feedcal_server::{FeedConfig, FileSink, run_once};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = FeedConfig::load()?.with_env_overrides().resolve()?;
//!     let source = FullCalendarSource::new(settings.source_config()?)?;
//!     let sink = FileSink::new(settings.require_output_path()?);
//!
//!     let summary = run_once(&settings, &source, &sink, Utc::now()).await?;
//!     println!("{} events published", summary.event_count);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod pipeline;
mod publish;
mod scheduler;
mod signals;

pub use config::{
    CONFIG_ENV, FeedConfig, FeedSettings, OutputSettings, ScheduleSettings, SourceSettings,
};
pub use error::{ServerError, ServerResult};
pub use pipeline::{RunSummary, run_once};
pub use publish::{FeedSink, FileSink, StdoutSink};
pub use scheduler::{
    Scheduler, SchedulerCommand, SchedulerConfig, SchedulerHandle, SchedulerState,
    SharedSchedulerState, next_run_after,
};
pub use signals::{ShutdownSignal, SignalHandler};
