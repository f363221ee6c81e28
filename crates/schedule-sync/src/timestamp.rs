//! Timestamp parsing and UTC normalization.
//!
//! Clients send ISO 8601 timestamps with or without an offset. Anything that
//! carries an offset is converted to UTC; anything naive is taken to already
//! be UTC, so mixed inputs compare on the same axis.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::{Result, ScheduleError};

/// Offset-carrying layouts tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

/// Naive layouts, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO 8601-like timestamp into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (`2025-10-22T09:00:00Z`, `2025-10-22T11:00:00+02:00`),
/// offsets without a colon (`+0200`), naive date-times with a `T` or space
/// separator and optional fractional seconds or missing seconds, and bare
/// dates (midnight UTC).
///
/// # Errors
/// Returns `ScheduleError::InvalidTimestamp` if no layout matches.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ScheduleError::InvalidTimestamp(input.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt.and_utc());
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(ScheduleError::InvalidTimestamp(input.to_string()))
}

/// Parse an optional stored timestamp, naming the field in the error.
pub(crate) fn parse_field(value: Option<&str>, field: &'static str) -> Result<DateTime<Utc>> {
    match value {
        Some(raw) => parse_timestamp(raw),
        None => Err(ScheduleError::MissingTimestamp(field)),
    }
}

/// Parse an IANA timezone name such as `"America/Los_Angeles"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| ScheduleError::InvalidTimezone(name.to_string()))
}
