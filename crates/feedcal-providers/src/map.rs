//! NormalizedEvent to CalendarEvent mapping.

use chrono_tz::Tz;
use feedcal_core::{CalendarEvent, event_uid, resolve_event_time};

use crate::normalize::{NormalizedEvent, resolved_end};

/// Maps one normalized event into the published form.
///
/// The UID is `{id}@{namespace}`. Start and end go through the lenient
/// resolver, date-only for all-day events. A missing end falls back to the
/// start through [`resolved_end`], so the result always has an end. Text
/// fields are copied as-is.
pub fn map_event(event: &NormalizedEvent, zone: &Tz, namespace: &str) -> CalendarEvent {
    let date_only = event.is_all_day;
    let start = resolve_event_time(event.start, zone, date_only);
    let end = resolve_event_time(resolved_end(event.start, event.end), zone, date_only);

    CalendarEvent::new(event_uid(&event.id, namespace), start, end, event.is_all_day)
        .with_summary(event.title.clone())
        .with_description(event.details.clone())
        .with_location(event.location.clone())
}

/// Maps a batch of normalized events, keeping their order.
pub fn map_events(events: &[NormalizedEvent], zone: &Tz, namespace: &str) -> Vec<CalendarEvent> {
    events
        .iter()
        .map(|event| map_event(event, zone, namespace))
        .collect()
}
