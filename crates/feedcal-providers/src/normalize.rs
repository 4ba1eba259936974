//! SourceEvent to NormalizedEvent conversion.
//!
//! All-day events get whole-day, end-exclusive bounds: `start` becomes
//! midnight of its date and `end` becomes midnight of the day after the last
//! covered date. Timed events pass through untouched.
//!
//! [`NormalizedEvent`] can only be built here, so the mapper never sees a
//! record that skipped this step.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::raw_event::SourceEvent;

/// A source event after all-day normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub(crate) id: String,
    pub(crate) title: Option<String>,
    pub(crate) start: NaiveDateTime,
    pub(crate) end: Option<NaiveDateTime>,
    pub(crate) is_all_day: bool,
    pub(crate) location: Option<String>,
    pub(crate) details: Option<String>,
}

impl NormalizedEvent {
    /// The source identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Local wall-clock start (midnight for all-day events).
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Local wall-clock end. Always set for all-day events.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    pub fn is_all_day(&self) -> bool {
        self.is_all_day
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

/// The shared "missing end" policy: an absent end means the event ends when
/// it starts.
pub fn resolved_end(start: NaiveDateTime, end: Option<NaiveDateTime>) -> NaiveDateTime {
    end.unwrap_or(start)
}

/// Converts a [`SourceEvent`] to a [`NormalizedEvent`].
pub fn normalize_event(source: SourceEvent) -> NormalizedEvent {
    let (start, end) = if source.is_all_day {
        let start_date = source.start.date();
        let last_date = resolved_end(source.start, source.end).date();
        (midnight(start_date), Some(midnight(day_after(last_date))))
    } else {
        (source.start, source.end)
    };

    NormalizedEvent {
        id: source.id,
        title: source.title,
        start,
        end,
        is_all_day: source.is_all_day,
        location: source.location,
        details: source.details,
    }
}

/// Batch normalize source events, keeping their order.
pub fn normalize_events(sources: Vec<SourceEvent>) -> Vec<NormalizedEvent> {
    sources.into_iter().map(normalize_event).collect()
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn day_after(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or_else(|| {
        warn!(%date, "all-day event ends on the last representable date");
        date
    })
}
