//! Calendar event records produced by the mapping step.

use serde::{Deserialize, Serialize};

use crate::time::EventTime;

/// Builds the globally stable identifier for a source event.
///
/// The namespace (normally the source host) keeps ids from different source
/// deployments apart.
pub fn event_uid(source_id: &str, namespace: &str) -> String {
    format!("{source_id}@{namespace}")
}

/// One event of the published calendar.
///
/// `end` is always present and never before `start`. Text fields are carried
/// exactly as the source delivered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Identifier used by calendar clients to match updates across refreshes.
    pub uid: String,
    /// When the event starts.
    pub start: EventTime,
    /// When the event ends (exclusive for all-day events).
    pub end: EventTime,
    /// The event title.
    pub summary: Option<String>,
    /// Free-text details.
    pub description: Option<String>,
    /// Where the event takes place.
    pub location: Option<String>,
    /// Whether the event spans whole days.
    pub is_all_day: bool,
}

impl CalendarEvent {
    /// Creates an event with no text fields.
    pub fn new(uid: impl Into<String>, start: EventTime, end: EventTime, is_all_day: bool) -> Self {
        Self {
            uid: uid.into(),
            start,
            end,
            summary: None,
            description: None,
            location: None,
            is_all_day,
        }
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }
}
