//! Tests for ISO 8601 parsing and UTC normalization.

use chrono::{DateTime, TimeZone, Utc};
use schedule_sync::{parse_timestamp, parse_timezone, ScheduleError};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

#[test]
fn rfc3339_with_zulu() {
    assert_eq!(
        parse_timestamp("2025-10-22T09:30:00Z").unwrap(),
        utc(2025, 10, 22, 9, 30, 0)
    );
}

#[test]
fn rfc3339_with_offset_converts_to_utc() {
    assert_eq!(
        parse_timestamp("2025-10-22T11:30:00+02:00").unwrap(),
        utc(2025, 10, 22, 9, 30, 0)
    );
    assert_eq!(
        parse_timestamp("2025-10-22T04:30:00-05:00").unwrap(),
        utc(2025, 10, 22, 9, 30, 0)
    );
}

#[test]
fn offset_without_colon() {
    assert_eq!(
        parse_timestamp("2025-10-22T11:30:00+0200").unwrap(),
        utc(2025, 10, 22, 9, 30, 0)
    );
}

#[test]
fn fractional_seconds_with_offset() {
    let parsed = parse_timestamp("2025-10-22T09:30:00.250+00:00").unwrap();
    assert_eq!(parsed.timestamp_subsec_millis(), 250);
    assert_eq!(parsed.timestamp(), utc(2025, 10, 22, 9, 30, 0).timestamp());
}

#[test]
fn naive_datetime_is_utc() {
    assert_eq!(
        parse_timestamp("2025-10-22T09:00:00").unwrap(),
        utc(2025, 10, 22, 9, 0, 0)
    );
}

#[test]
fn naive_with_space_separator_and_fraction() {
    let parsed = parse_timestamp("2025-10-22 09:00:00.123456").unwrap();
    assert_eq!(parsed.timestamp(), utc(2025, 10, 22, 9, 0, 0).timestamp());
    assert_eq!(parsed.timestamp_subsec_micros(), 123_456);
}

#[test]
fn naive_without_seconds() {
    assert_eq!(
        parse_timestamp("2025-10-22T09:15").unwrap(),
        utc(2025, 10, 22, 9, 15, 0)
    );
}

#[test]
fn bare_date_is_midnight_utc() {
    assert_eq!(
        parse_timestamp("2025-10-22").unwrap(),
        utc(2025, 10, 22, 0, 0, 0)
    );
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(
        parse_timestamp("  2025-10-22T09:00:00Z \n").unwrap(),
        utc(2025, 10, 22, 9, 0, 0)
    );
}

#[test]
fn garbage_is_rejected() {
    for input in ["", "   ", "bad-timestamp", "2025-13-01T00:00:00", "2025-10-22T25:00:00", "tomorrow"] {
        let err = parse_timestamp(input).unwrap_err();
        assert!(
            matches!(err, ScheduleError::InvalidTimestamp(_)),
            "{input:?} gave {err:?}"
        );
    }
}

#[test]
fn known_timezone_parses() {
    assert_eq!(
        parse_timezone("America/Los_Angeles").unwrap(),
        chrono_tz::America::Los_Angeles
    );
    assert_eq!(parse_timezone("UTC").unwrap(), chrono_tz::UTC);
}

#[test]
fn unknown_timezone_is_rejected() {
    assert!(matches!(
        parse_timezone("Mars/Olympus_Mons"),
        Err(ScheduleError::InvalidTimezone(_))
    ));
}
