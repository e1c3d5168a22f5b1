//! Date and time helpers shared by the slot finder and the planner.
//!
//! All planning happens on the user's wall clock (`NaiveDateTime`).
//! Offset-carrying timestamps are converted to local time at the edge,
//! when they are parsed.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::ValidationError;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Canonical timestamp format used when serializing.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Convert fractional hours to whole minutes.
pub fn hours_to_minutes(hours: f64) -> i64 {
    (hours * 60.0).round() as i64
}

/// Convert whole minutes back to fractional hours.
pub fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}

/// Timestamp `minute_of_day` minutes after midnight of `day`.
///
/// A minute of 1440 is midnight of the following day, so a period
/// ending at hour 24 maps to a real instant.
pub fn at_minute(day: NaiveDate, minute_of_day: i64) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN) + Duration::minutes(minute_of_day)
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Integer division rounding towards positive infinity. `divisor` must be positive.
pub fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value / divisor;
    if value % divisor > 0 {
        quotient + 1
    } else {
        quotient
    }
}

/// Number of days between two instants, rounded up at millisecond precision.
///
/// Negative when `to` lies before `from`.
pub fn ceil_days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    ceil_div((to - from).num_milliseconds(), MILLIS_PER_DAY)
}

/// Parse a user-supplied timestamp.
///
/// Accepted forms, tried in order:
/// - RFC 3339 with offset (`2026-10-19T09:00:00Z`), converted to local time
/// - naive `YYYY-MM-DDTHH:MM:SS[.fff]` or `YYYY-MM-DDTHH:MM`, also with a space separator
/// - bare `YYYY-MM-DD`, read as 23:59 of that day
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, ValidationError> {
    let raw = input.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.with_timezone(&Local).naive_local());
    }

    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Ok(naive);
    }

    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(23, 59, 0))
        .ok_or_else(|| ValidationError::InvalidTimestamp {
            input: input.to_string(),
        })
}

/// Serde adapter writing [`TIMESTAMP_FORMAT`] and reading anything
/// [`parse_timestamp`] accepts.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(super::TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(de::Error::custom)
    }
}
