//! FullCalendar-style JSON event source.
//!
//! The endpoint takes an HTTP POST with a form body of `start` and `end`
//! (unix seconds, inclusive) and answers with a JSON list of
//! [`SourceEvent`](crate::SourceEvent)s.
//!
//! # Example
//!
//! ```ignore
//! use feedcal_providers::fullcalendar::{FullCalendarConfig, FullCalendarSource};
//!
//! let config = FullCalendarConfig::new("https://events.example.org/api/calendar")?
//!     .with_timeout(Duration::from_secs(10));
//!
//! let source = FullCalendarSource::new(config)?;
//! let events = source.fetch_events(window).await?;
//! ```

mod client;
mod config;
mod source;

pub use config::FullCalendarConfig;
pub use source::FullCalendarSource;
