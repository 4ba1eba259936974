//! Event sources, normalization, mapping and ICS rendering.
//!
//! - [`EventSource`] - the trait every upstream implements
//! - [`SourceEvent`] - the raw upstream record
//! - [`normalize_event`] - all-day normalization into [`NormalizedEvent`]
//! - [`map_event`] - conversion into the published [`CalendarEvent`](feedcal_core::CalendarEvent)
//! - [`render_calendar`] - ICS text for a [`CalendarDocument`](feedcal_core::CalendarDocument)
//! - [`ProviderError`] - error type for fetch operations
//!
//! # Architecture
//!
//! ```text
//!   ┌──────────────────────┐
//!   │  FullCalendar API    │  POST start=<secs>&end=<secs>
//!   └──────────┬───────────┘
//!              │ EventSource
//!              ▼
//!       ┌─────────────┐
//!       │ SourceEvent │
//!       └──────┬──────┘
//!              ▼ normalize_event()
//!     ┌─────────────────┐
//!     │ NormalizedEvent │
//!     └────────┬────────┘
//!              ▼ map_event(zone, namespace)
//!      ┌───────────────┐
//!      │ CalendarEvent │ ──► assemble_calendar() ──► render_calendar()
//!      └───────────────┘
//! ```

pub mod error;
#[cfg(feature = "fullcalendar")]
pub mod fullcalendar;
pub mod ics;
pub mod map;
pub mod normalize;
pub mod provider;
pub mod raw_event;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use ics::render_calendar;
pub use map::{map_event, map_events};
pub use normalize::{NormalizedEvent, normalize_event, normalize_events, resolved_end};
pub use provider::{BoxFuture, ErrorSource, EventSource, StaticSource};
pub use raw_event::{LOCAL_DATETIME_FORMAT, SourceEvent, parse_source_events};
