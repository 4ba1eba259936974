//! Time types for calendar events.
//!
//! This module provides [`EventTime`] for representing event start/end times
//! (which may be either an absolute instant or a zone-independent date), and
//! [`TimeWindow`] with the [`fetch_window`] calculator for the upstream query
//! range.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{TimeError, TimeResult};
use crate::zone::resolve_strict;

/// Represents the start or end of a calendar event.
///
/// - **Instant**: a timed event boundary, stored in UTC.
/// - **DateOnly**: an all-day boundary, not tied to any zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EventTime {
    /// An absolute point in time.
    Instant(DateTime<Utc>),
    /// A calendar date (all-day events).
    DateOnly(NaiveDate),
}

impl EventTime {
    /// Creates a new `EventTime::Instant` from a UTC datetime.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self::Instant(dt)
    }

    /// Creates a new `EventTime::DateOnly` from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::DateOnly(date)
    }

    /// Returns `true` if this is an all-day boundary.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::DateOnly(_))
    }

    /// Returns the instant if this is an `Instant` variant.
    pub fn as_instant(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Instant(dt) => Some(dt),
            Self::DateOnly(_) => None,
        }
    }

    /// Returns the date if this is a `DateOnly` variant.
    pub fn as_date(&self) -> Option<&NaiveDate> {
        match self {
            Self::DateOnly(d) => Some(d),
            Self::Instant(_) => None,
        }
    }

    /// Converts to a UTC datetime for comparison purposes.
    ///
    /// For all-day values, returns midnight UTC on that date.
    pub fn to_utc_datetime(&self) -> DateTime<Utc> {
        match self {
            Self::Instant(dt) => *dt,
            Self::DateOnly(date) => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// Returns the date portion of this event time (UTC date for instants).
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Instant(dt) => dt.date_naive(),
            Self::DateOnly(date) => *date,
        }
    }
}

impl PartialOrd for EventTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_utc_datetime().cmp(&other.to_utc_datetime())
    }
}

/// The range of instants requested from the upstream source.
///
/// Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (inclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvertedWindow`] if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeResult<Self> {
        if start > end {
            return Err(TimeError::InvertedWindow {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Start of the window as seconds since the unix epoch.
    pub fn start_unix_seconds(&self) -> i64 {
        self.start.timestamp()
    }

    /// End of the window as seconds since the unix epoch.
    pub fn end_unix_seconds(&self) -> i64 {
        self.end.timestamp()
    }
}

/// How far back and ahead of the current date the feed reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowPolicy {
    /// Whole months before the current month.
    pub months_into_past: u32,
    /// Whole years after the current year.
    pub years_into_future: u32,
}

impl WindowPolicy {
    /// Months of history kept by default.
    pub const DEFAULT_MONTHS_INTO_PAST: u32 = 6;

    /// Years of future events published by default.
    pub const DEFAULT_YEARS_INTO_FUTURE: u32 = 3;

    /// Creates a policy with explicit offsets.
    pub fn new(months_into_past: u32, years_into_future: u32) -> Self {
        Self {
            months_into_past,
            years_into_future,
        }
    }
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MONTHS_INTO_PAST,
            Self::DEFAULT_YEARS_INTO_FUTURE,
        )
    }
}

/// Returns the current calendar date as observed in `zone`.
pub fn today_in(now: DateTime<Utc>, zone: &Tz) -> NaiveDate {
    now.with_timezone(zone).date_naive()
}

/// Computes the upstream query range for `today`.
///
/// - start: midnight on day 1 of the month `months_into_past` months before
///   the current month.
/// - end: 23:59:59 on December 31 of the year `years_into_future` years after
///   the current year.
///
/// Both bounds are converted with [`resolve_strict`].
///
/// # Errors
///
/// Returns a transition error if either bound lands on a DST gap or overlap,
/// and [`TimeError::OutOfRange`] if the arithmetic overflows.
pub fn fetch_window(today: NaiveDate, zone: &Tz, policy: WindowPolicy) -> TimeResult<TimeWindow> {
    let first_of_month = today
        .with_day(1)
        .and_then(|d| d.checked_sub_months(Months::new(policy.months_into_past)))
        .ok_or_else(|| {
            TimeError::OutOfRange(format!(
                "{} months before {}",
                policy.months_into_past, today
            ))
        })?;
    let start_local = first_of_month.and_time(NaiveTime::MIN);

    let end_year = i32::try_from(policy.years_into_future)
        .ok()
        .and_then(|years| today.year().checked_add(years))
        .ok_or_else(|| {
            TimeError::OutOfRange(format!(
                "{} years after {}",
                policy.years_into_future,
                today.year()
            ))
        })?;
    let end_local = end_of_year(end_year)?;

    TimeWindow::new(
        resolve_strict(start_local, zone)?,
        resolve_strict(end_local, zone)?,
    )
}

fn end_of_year(year: i32) -> TimeResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .ok_or_else(|| TimeError::OutOfRange(format!("December 31 of {year}")))
}
