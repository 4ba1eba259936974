//! The assembled calendar feed.
//!
//! A [`CalendarDocument`] is built once per run by [`assemble_calendar`] and
//! is read-only afterwards.

use serde::Serialize;

use crate::event::CalendarEvent;

/// Suggested time-to-live for subscribers (`X-PUBLISHED-TTL`).
pub const PUBLISHED_TTL: &str = "P1D";

/// Suggested refresh interval for subscribers (`REFRESH-INTERVAL`).
pub const REFRESH_INTERVAL: &str = "P1D";

/// A calendar feed ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDocument {
    name: String,
    published_ttl: &'static str,
    refresh_interval: &'static str,
    events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    /// The feed display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The time-to-live hint as an ISO 8601 duration.
    pub fn published_ttl(&self) -> &str {
        self.published_ttl
    }

    /// The refresh-interval hint as an ISO 8601 duration.
    pub fn refresh_interval(&self) -> &str {
        self.refresh_interval
    }

    /// The events in the order they were assembled.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Number of events in the document.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the document holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Packages mapped events with the fixed feed metadata.
///
/// Events keep their order and are never deduplicated, so repeated uids are
/// published as given.
pub fn assemble_calendar(name: impl Into<String>, events: Vec<CalendarEvent>) -> CalendarDocument {
    CalendarDocument {
        name: name.into(),
        published_ttl: PUBLISHED_TTL,
        refresh_interval: REFRESH_INTERVAL,
        events,
    }
}
