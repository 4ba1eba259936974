//! Conversion of timezone-naive wall-clock values to absolute instants.
//!
//! Two policies are offered:
//! - [`resolve_strict`] refuses local times that fall on a DST transition.
//! - [`resolve_lenient`] always produces an instant: overlaps resolve to the
//!   earlier of the two candidates, gaps resolve to the first valid instant
//!   after the gap.
//!
//! [`resolve_event_time`] picks between a date-only value and a lenient
//! instant, which is how source events are turned into [`EventTime`]s.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{trace, warn};

use crate::error::{TimeError, TimeResult};
use crate::time::EventTime;

/// Parses an IANA zone name such as `Europe/London`.
///
/// # Errors
///
/// Returns [`TimeError::UnknownTimezone`] if the name is not in the tz database.
pub fn parse_zone(name: &str) -> TimeResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone(name.to_string()))
}

/// Converts a local wall-clock time to UTC, failing on DST transitions.
///
/// # Errors
///
/// Returns [`TimeError::NonExistentLocalTime`] for a time inside a gap and
/// [`TimeError::AmbiguousLocalTime`] for a time inside an overlap.
pub fn resolve_strict(local: NaiveDateTime, zone: &Tz) -> TimeResult<DateTime<Utc>> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(_, _) => Err(TimeError::AmbiguousLocalTime {
            local,
            zone: zone.name().to_string(),
        }),
        LocalResult::None => Err(TimeError::NonExistentLocalTime {
            local,
            zone: zone.name().to_string(),
        }),
    }
}

/// Converts a local wall-clock time to UTC without ever failing.
///
/// - Overlap (fall-back): the earlier instant is used.
/// - Gap (spring-forward): the first valid instant after the gap is used,
///   i.e. the transition instant itself.
pub fn resolve_lenient(local: NaiveDateTime, zone: &Tz) -> DateTime<Utc> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => {
            trace!(%local, zone = zone.name(), "ambiguous local time, using earlier offset");
            earlier.with_timezone(&Utc)
        }
        LocalResult::None => match end_of_gap(local, zone) {
            Some(instant) => {
                trace!(%local, zone = zone.name(), %instant, "local time in DST gap, shifted forward");
                instant
            }
            None => {
                warn!(%local, zone = zone.name(), "could not locate DST gap, treating as UTC");
                local.and_utc()
            }
        },
    }
}

/// Resolves a local value to an [`EventTime`].
///
/// With `date_only` the calendar date is kept and the zone is ignored, so
/// all-day events land on the same day for every viewer. Otherwise the value
/// goes through [`resolve_lenient`].
pub fn resolve_event_time(local: NaiveDateTime, zone: &Tz, date_only: bool) -> EventTime {
    if date_only {
        EventTime::DateOnly(local.date())
    } else {
        EventTime::Instant(resolve_lenient(local, zone))
    }
}

/// Finds the transition instant that closes the gap containing `local`.
///
/// The offsets in force a day before and a day after bracket the transition:
/// reading `local` with the later offset gives an instant before it, reading
/// it with the earlier offset gives one at or after it. A bisection over
/// that span converges on the first instant carrying the later offset.
fn end_of_gap(local: NaiveDateTime, zone: &Tz) -> Option<DateTime<Utc>> {
    let day = Duration::days(1);
    let before = zone
        .offset_from_local_datetime(&local.checked_sub_signed(day)?)
        .earliest()?
        .fix();
    let after = zone
        .offset_from_local_datetime(&local.checked_add_signed(day)?)
        .latest()?
        .fix();

    let mut lo = local
        .checked_sub_signed(Duration::seconds(i64::from(after.local_minus_utc())))?
        .and_utc();
    let mut hi = local
        .checked_sub_signed(Duration::seconds(i64::from(before.local_minus_utc())))?
        .and_utc();

    while (hi - lo).num_seconds() > 1 {
        let mid = lo + Duration::seconds((hi - lo).num_seconds() / 2);
        if zone.offset_from_utc_datetime(&mid.naive_utc()).fix() == after {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    Some(hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn new_york() -> Tz {
        parse_zone("America/New_York").unwrap()
    }

    mod zone_parsing {
        use super::*;

        #[test]
        fn parses_iana_names() {
            assert_eq!(parse_zone("Europe/London").unwrap(), chrono_tz::Europe::London);
            assert_eq!(parse_zone(" UTC ").unwrap(), chrono_tz::UTC);
        }

        #[test]
        fn rejects_unknown_names() {
            let err = parse_zone("Mars/Olympus_Mons").unwrap_err();
            assert_eq!(err, TimeError::UnknownTimezone("Mars/Olympus_Mons".into()));
        }
    }

    mod strict {
        use super::*;

        #[test]
        fn converts_regular_time() {
            let resolved = resolve_strict(local(2024, 6, 1, 12, 0, 0), &new_york()).unwrap();
            assert_eq!(resolved, utc(2024, 6, 1, 16, 0, 0));
        }

        #[test]
        fn fails_in_gap() {
            let err = resolve_strict(local(2024, 3, 10, 2, 30, 0), &new_york()).unwrap_err();
            assert!(matches!(err, TimeError::NonExistentLocalTime { .. }));
            assert!(err.is_transition());
        }

        #[test]
        fn fails_in_overlap() {
            let err = resolve_strict(local(2024, 11, 3, 1, 30, 0), &new_york()).unwrap_err();
            assert!(matches!(err, TimeError::AmbiguousLocalTime { .. }));
        }
    }

    mod lenient {
        use super::*;

        #[test]
        fn converts_regular_time() {
            let resolved = resolve_lenient(local(2024, 1, 15, 9, 0, 0), &new_york());
            assert_eq!(resolved, utc(2024, 1, 15, 14, 0, 0));
        }

        #[test]
        fn time_before_gap_is_untouched() {
            let resolved = resolve_lenient(local(2024, 3, 10, 1, 30, 0), &new_york());
            assert_eq!(resolved, utc(2024, 3, 10, 6, 30, 0));
        }

        #[test]
        fn gap_shifts_to_first_valid_instant() {
            // 02:00-03:00 does not exist; 03:00 EDT is 07:00Z
            for (h, m, s) in [(2, 0, 0), (2, 30, 0), (2, 59, 59)] {
                let resolved = resolve_lenient(local(2024, 3, 10, h, m, s), &new_york());
                assert_eq!(resolved, utc(2024, 3, 10, 7, 0, 0), "at {h:02}:{m:02}:{s:02}");
            }
        }

        #[test]
        fn gap_in_europe() {
            let berlin = parse_zone("Europe/Berlin").unwrap();
            let resolved = resolve_lenient(local(2024, 3, 31, 2, 15, 0), &berlin);
            // 03:00 CEST == 01:00Z
            assert_eq!(resolved, utc(2024, 3, 31, 1, 0, 0));
        }

        #[test]
        fn overlap_uses_earlier_instant() {
            let resolved = resolve_lenient(local(2024, 11, 3, 1, 30, 0), &new_york());
            // first 01:30 is EDT (-4)
            assert_eq!(resolved, utc(2024, 11, 3, 5, 30, 0));
        }

        #[test]
        fn overlap_is_repeatable() {
            let first = resolve_lenient(local(2024, 11, 3, 1, 45, 0), &new_york());
            let second = resolve_lenient(local(2024, 11, 3, 1, 45, 0), &new_york());
            assert_eq!(first, second);
        }

        #[test]
        fn utc_zone_is_identity() {
            let resolved = resolve_lenient(local(2024, 3, 10, 2, 30, 0), &chrono_tz::UTC);
            assert_eq!(resolved, utc(2024, 3, 10, 2, 30, 0));
        }
    }

    mod event_time {
        use super::*;

        #[test]
        fn date_only_ignores_zone() {
            let value = local(2024, 6, 1, 0, 0, 0);
            let tokyo = parse_zone("Asia/Tokyo").unwrap();
            let honolulu = parse_zone("Pacific/Honolulu").unwrap();

            let a = resolve_event_time(value, &tokyo, true);
            let b = resolve_event_time(value, &honolulu, true);

            assert_eq!(a, b);
            assert_eq!(a, EventTime::DateOnly(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        }

        #[test]
        fn date_only_drops_time_of_day() {
            let resolved = resolve_event_time(local(2024, 6, 1, 18, 45, 0), &new_york(), true);
            assert_eq!(
                resolved,
                EventTime::DateOnly(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            );
        }

        #[test]
        fn timed_resolves_leniently() {
            let resolved = resolve_event_time(local(2024, 3, 10, 2, 30, 0), &new_york(), false);
            assert_eq!(resolved, EventTime::Instant(utc(2024, 3, 10, 7, 0, 0)));
        }
    }
}
