//! ICS serialization of a [`CalendarDocument`].

use chrono::{DateTime, Utc};
use feedcal_core::{CalendarDocument, CalendarEvent, EventTime};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const DATE_FORMAT: &str = "%Y%m%d";

/// Renders the document as an iCalendar feed.
///
/// `stamp` becomes the DTSTAMP of every event so that one run produces one
/// consistent timestamp and the output is reproducible in tests.
pub fn render_calendar(document: &CalendarDocument, stamp: DateTime<Utc>) -> String {
    let mut calendar = Calendar::new();
    // VALUE=TEXT makes the serializer escape the free-form name
    let mut name = Property::new("X-WR-CALNAME", document.name());
    name.append_parameter(ValueType::Text);
    calendar.append_property(name);
    calendar.append_property(Property::new("X-PUBLISHED-TTL", document.published_ttl()));

    let mut refresh = Property::new("REFRESH-INTERVAL", document.refresh_interval());
    refresh.append_parameter(ValueType::Duration);
    calendar.append_property(refresh);

    let stamp = stamp.format(UTC_FORMAT).to_string();
    for event in document.events() {
        calendar.push(render_event(event, &stamp));
    }

    calendar.done().to_string()
}

fn render_event(event: &CalendarEvent, stamp: &str) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.add_property("DTSTAMP", stamp);
    add_time_property(&mut ics_event, "DTSTART", &event.start);
    add_time_property(&mut ics_event, "DTEND", &event.end);

    if let Some(ref summary) = event.summary {
        ics_event.summary(summary);
    }
    if let Some(ref description) = event.description {
        ics_event.description(description);
    }
    if let Some(ref location) = event.location {
        ics_event.location(location);
    }

    ics_event.done()
}

fn add_time_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::DateOnly(date) => {
            let mut prop = Property::new(name, date.format(DATE_FORMAT).to_string());
            prop.append_parameter(ValueType::Date);
            ics_event.append_property(prop);
        }
        EventTime::Instant(instant) => {
            ics_event.add_property(name, instant.format(UTC_FORMAT).to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use feedcal_core::assemble_calendar;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 6, 0, 0).unwrap()
    }

    fn timed(uid: &str) -> CalendarEvent {
        CalendarEvent::new(
            uid,
            EventTime::Instant(Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap()),
            EventTime::Instant(Utc.with_ymd_and_hms(2024, 6, 1, 15, 30, 0).unwrap()),
            false,
        )
    }

    fn all_day(uid: &str) -> CalendarEvent {
        CalendarEvent::new(
            uid,
            EventTime::DateOnly(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
            EventTime::DateOnly(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
            true,
        )
    }

    fn lines(ics: &str) -> Vec<&str> {
        ics.lines().collect()
    }

    #[test]
    fn calendar_properties() {
        let ics = render_calendar(&assemble_calendar("Club events", vec![]), stamp());
        let lines = lines(&ics);

        assert_eq!(lines.first(), Some(&"BEGIN:VCALENDAR"));
        assert!(lines.contains(&"X-WR-CALNAME;VALUE=TEXT:Club events"));
        assert!(lines.contains(&"X-PUBLISHED-TTL:P1D"));
        assert!(lines.contains(&"REFRESH-INTERVAL;VALUE=DURATION:P1D"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn calendar_name_is_escaped_like_event_text() {
        let event = timed("1@h").with_summary(Some("a, b; c".into()));
        let ics = render_calendar(&assemble_calendar("Club, events; all", vec![event]), stamp());
        let lines = lines(&ics);

        assert!(lines.contains(&r"X-WR-CALNAME;VALUE=TEXT:Club\, events\; all"));
        assert!(lines.contains(&r"SUMMARY:a\, b\; c"));
    }

    #[test]
    fn timed_event_uses_utc_form() {
        let event = timed("1@events.example.org")
            .with_summary(Some("Open day".into()))
            .with_location(Some("Hall".into()))
            .with_description(Some("Bring a friend".into()));
        let ics = render_calendar(&assemble_calendar("Feed", vec![event]), stamp());
        let lines = lines(&ics);

        assert!(lines.contains(&"UID:1@events.example.org"));
        assert!(lines.contains(&"DTSTAMP:20250615T060000Z"));
        assert!(lines.contains(&"DTSTART:20240601T140000Z"));
        assert!(lines.contains(&"DTEND:20240601T153000Z"));
        assert!(lines.contains(&"SUMMARY:Open day"));
        assert!(lines.contains(&"LOCATION:Hall"));
        assert!(lines.contains(&"DESCRIPTION:Bring a friend"));
    }

    #[test]
    fn all_day_event_uses_date_values() {
        let ics = render_calendar(&assemble_calendar("Feed", vec![all_day("2@h")]), stamp());
        let lines = lines(&ics);

        assert!(lines.contains(&"DTSTART;VALUE=DATE:20240601"));
        assert!(lines.contains(&"DTEND;VALUE=DATE:20240602"));
    }

    #[test]
    fn absent_text_fields_are_omitted() {
        let ics = render_calendar(&assemble_calendar("Feed", vec![timed("3@h")]), stamp());

        assert!(!ics.contains("SUMMARY"));
        assert!(!ics.contains("LOCATION"));
        assert!(!ics.contains("DESCRIPTION"));
    }

    #[test]
    fn duplicate_uids_are_kept() {
        let document = assemble_calendar("Feed", vec![timed("4@h"), timed("4@h")]);
        let ics = render_calendar(&document, stamp());

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert_eq!(ics.matches("UID:4@h").count(), 2);
    }

    #[test]
    fn output_is_reproducible() {
        let document = assemble_calendar("Feed", vec![timed("5@h"), all_day("6@h")]);
        assert_eq!(
            render_calendar(&document, stamp()),
            render_calendar(&document, stamp())
        );
    }
}
