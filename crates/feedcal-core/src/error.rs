//! Error types for time and zone handling.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised while resolving local times or computing the fetch window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// The configured zone name is not a known IANA identifier.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// The local time falls inside a DST gap and does not exist.
    #[error("local time {local} does not exist in {zone} (DST gap)")]
    NonExistentLocalTime { local: NaiveDateTime, zone: String },

    /// The local time falls inside a DST overlap and maps to two instants.
    #[error("local time {local} is ambiguous in {zone} (DST overlap)")]
    AmbiguousLocalTime { local: NaiveDateTime, zone: String },

    /// Date arithmetic left chrono's representable range.
    #[error("date out of range: {0}")]
    OutOfRange(String),

    /// A window whose start lies after its end.
    #[error("invalid time window: start {start} is after end {end}")]
    InvertedWindow { start: String, end: String },
}

impl TimeError {
    /// Returns true if this error comes from strict resolution landing on a
    /// DST transition.
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            Self::NonExistentLocalTime { .. } | Self::AmbiguousLocalTime { .. }
        )
    }
}

/// Result type for time operations.
pub type TimeResult<T> = Result<T, TimeError>;
