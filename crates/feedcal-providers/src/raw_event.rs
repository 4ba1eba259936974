//! Raw event type from the upstream scheduling API.
//!
//! This module defines [`SourceEvent`], one record of the JSON list returned
//! by the source before any normalization. Date-times arrive as local
//! wall-clock text (`yyyy-MM-dd HH:mm:ss`) without an offset and are kept
//! timezone-naive.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// The wall-clock pattern used by the source for `start`/`end`.
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A raw calendar event from the source.
///
/// # Wire format
///
/// ```json
/// {
///   "id": "17",
///   "title": "Open day",
///   "start_formatted": "2024-06-01 10:00:00",
///   "end_formatted": null,
///   "allDay": false,
///   "location": "Main hall",
///   "details": "Bring a friend"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEvent {
    /// Identifier, unique within the source only.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// The event title.
    #[serde(default)]
    pub title: Option<String>,

    /// Local wall-clock start.
    #[serde(rename = "start_formatted", with = "local_datetime")]
    pub start: NaiveDateTime,

    /// Local wall-clock end; absent means "same as start".
    #[serde(rename = "end_formatted", default, with = "local_datetime::option")]
    pub end: Option<NaiveDateTime>,

    /// Whether `start`/`end` should be read as calendar dates.
    #[serde(rename = "allDay", default)]
    pub is_all_day: bool,

    /// The event location.
    #[serde(default)]
    pub location: Option<String>,

    /// Free-text details.
    #[serde(default)]
    pub details: Option<String>,
}

impl SourceEvent {
    /// Creates a timed event with only the required fields.
    pub fn new(id: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            title: None,
            start,
            end: None,
            is_all_day: false,
            location: None,
            details: None,
        }
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to set the end.
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Builder method to mark the event as all-day.
    pub fn with_all_day(mut self, is_all_day: bool) -> Self {
        self.is_all_day = is_all_day;
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Parses a list of source events from a JSON body.
///
/// # Errors
///
/// Fails on any malformed record; there is no per-event skipping.
pub fn parse_source_events(body: &str) -> Result<Vec<SourceEvent>, serde_json::Error> {
    serde_json::from_str(body)
}

/// Accepts both `"17"` and `17` for the id.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Integer(i64),
        Unsigned(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Integer(n) => n.to_string(),
        Id::Unsigned(n) => n.to_string(),
    })
}

/// Serde adapter for [`LOCAL_DATETIME_FORMAT`].
mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::LOCAL_DATETIME_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(LOCAL_DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, LOCAL_DATETIME_FORMAT)
            .map_err(|e| D::Error::custom(format!("invalid local date-time {text:?}: {e}")))
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            #[derive(Deserialize)]
            struct Wrapped(#[serde(with = "super")] NaiveDateTime);

            Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(v)| v))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_full_record() {
        let body = r#"[{
            "id": "17",
            "title": "Open day",
            "start_formatted": "2024-06-01 10:00:00",
            "end_formatted": "2024-06-01 16:30:00",
            "allDay": false,
            "location": "Main hall",
            "details": "Bring a friend"
        }]"#;

        let events = parse_source_events(body).unwrap();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.id, "17");
        assert_eq!(event.title.as_deref(), Some("Open day"));
        assert_eq!(event.start, local(2024, 6, 1, 10, 0, 0));
        assert_eq!(event.end, Some(local(2024, 6, 1, 16, 30, 0)));
        assert!(!event.is_all_day);
        assert_eq!(event.location.as_deref(), Some("Main hall"));
        assert_eq!(event.details.as_deref(), Some("Bring a friend"));
    }

    #[test]
    fn null_and_missing_optionals() {
        let body = r#"[{
            "id": 2,
            "title": null,
            "start_formatted": "2024-06-01 00:00:00",
            "end_formatted": null,
            "allDay": true
        }]"#;

        let event = &parse_source_events(body).unwrap()[0];
        assert_eq!(event.id, "2");
        assert_eq!(event.title, None);
        assert_eq!(event.end, None);
        assert!(event.is_all_day);
        assert_eq!(event.location, None);
        assert_eq!(event.details, None);
    }

    #[test]
    fn missing_end_field_is_none() {
        let body = r#"[{"id": "x", "start_formatted": "2024-01-02 03:04:05"}]"#;
        let event = &parse_source_events(body).unwrap()[0];
        assert_eq!(event.end, None);
        assert!(!event.is_all_day);
    }

    #[test]
    fn empty_strings_are_kept() {
        let body = r#"[{"id": "x", "title": "", "start_formatted": "2024-01-02 03:04:05"}]"#;
        let event = &parse_source_events(body).unwrap()[0];
        assert_eq!(event.title.as_deref(), Some(""));
    }

    #[test]
    fn rejects_offset_timestamps() {
        let body = r#"[{"id": "1", "start_formatted": "2024-06-01T10:00:00Z"}]"#;
        assert!(parse_source_events(body).is_err());
    }

    #[test]
    fn rejects_missing_start() {
        let body = r#"[{"id": "1", "title": "no start"}]"#;
        assert!(parse_source_events(body).is_err());
    }

    #[test]
    fn rejects_missing_id() {
        let body = r#"[{"start_formatted": "2024-06-01 10:00:00"}]"#;
        assert!(parse_source_events(body).is_err());
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let event = SourceEvent::new("5", local(2024, 2, 29, 23, 59, 59)).with_title("Leap");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["start_formatted"], "2024-02-29 23:59:59");
        assert_eq!(json["end_formatted"], serde_json::Value::Null);
        assert_eq!(json["allDay"], false);
    }

    #[test]
    fn builder() {
        let event = SourceEvent::new("9", local(2024, 6, 1, 0, 0, 0))
            .with_end(local(2024, 6, 3, 0, 0, 0))
            .with_all_day(true)
            .with_location("Field")
            .with_details("Camp");

        assert!(event.is_all_day);
        assert_eq!(event.end, Some(local(2024, 6, 3, 0, 0, 0)));
        assert_eq!(event.location.as_deref(), Some("Field"));
        assert_eq!(event.details.as_deref(), Some("Camp"));
    }
}
