//! Core types: event times, fetch window, zone resolution, calendar document
//!
//! Everything in this crate is pure: the current time and the configured zone
//! are always passed in by the caller.

pub mod document;
pub mod error;
pub mod event;
pub mod time;
pub mod tracing;
pub mod zone;

pub use document::{CalendarDocument, PUBLISHED_TTL, REFRESH_INTERVAL, assemble_calendar};
pub use error::{TimeError, TimeResult};
pub use event::{CalendarEvent, event_uid};
pub use time::{EventTime, TimeWindow, WindowPolicy, fetch_window, today_in};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use zone::{parse_zone, resolve_event_time, resolve_lenient, resolve_strict};

pub use chrono_tz::Tz;
