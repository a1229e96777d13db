//! # Temporal Types — Build Timestamps
//!
//! Defines `BuildTimestamp`, the wall-clock instant that names a release
//! pack folder. It holds local calendar fields truncated to whole seconds,
//! because the folder token `YYYYMMDD-HHMMSS` is read by people sorting
//! their export directory, not by machines comparing instants.
//!
//! ## Determinism
//!
//! The timestamp is the only non-deterministic input to a build. It is an
//! explicit value so tests and reproducible builds can pin it; only
//! [`BuildTimestamp::now()`] consults the system clock.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Local wall-clock date and time, truncated to seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BuildTimestamp(NaiveDateTime);

/// A timestamp string could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid build timestamp {input:?}: expected RFC 3339 or YYYY-MM-DDTHH:MM:SS")]
pub struct TimestampParseError {
    /// The rejected input.
    pub input: String,
}

impl BuildTimestamp {
    /// The current local time, truncated to seconds.
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    /// Take the calendar fields of `dt` in its own time zone.
    ///
    /// A `DateTime<Local>` yields local fields; a `DateTime<Utc>` yields UTC
    /// fields. Convert with `with_timezone(&Local)` first to get the local
    /// rendering of a UTC instant.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self::from_naive(dt.naive_local())
    }

    /// Wrap naive local calendar fields.
    pub fn from_naive(naive: NaiveDateTime) -> Self {
        Self(naive.with_nanosecond(0).unwrap_or(naive))
    }

    /// Parse a timestamp from text.
    ///
    /// Accepts a naive `YYYY-MM-DDTHH:MM:SS` (or with a space separator),
    /// taken as local wall-clock time, or a full RFC 3339 string, which is
    /// converted to the local time zone.
    pub fn parse(s: &str) -> Result<Self, TimestampParseError> {
        let trimmed = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::from_datetime(&dt.with_timezone(&Local)));
        }
        for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self::from_naive(naive));
            }
        }
        Err(TimestampParseError {
            input: s.to_string(),
        })
    }

    /// Access the local calendar fields.
    pub fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }

    /// Render as the sortable folder token `YYYYMMDD-HHMMSS`.
    pub fn to_token(&self) -> String {
        self.0.format("%Y%m%d-%H%M%S").to_string()
    }
}

impl std::fmt::Display for BuildTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}
