//! Time utilities
//!
//! All instants are normalized to UTC before they reach the engines; the
//! repository layer only sees `i64` Unix millis and seconds-from-midnight.

use chrono::{DateTime, DurationRound, NaiveDate, NaiveTime, SubsecRound, TimeDelta, Timelike, Utc};

use super::{AppError, AppResult};

/// Granularity (minutes) for shifts created outside a schedule
pub const QUARTER_HOUR_MINUTES: i64 = 15;

pub fn quarter_hour() -> TimeDelta {
    TimeDelta::minutes(QUARTER_HOUR_MINUTES)
}

/// Round `at` up to the next multiple of `granularity` (since the epoch).
/// An instant already on a boundary is returned unchanged.
pub fn round_up(at: DateTime<Utc>, granularity: TimeDelta) -> AppResult<DateTime<Utc>> {
    let floor = at
        .duration_trunc(granularity)
        .map_err(|e| AppError::validation(format!("Invalid granularity: {e}")))?;
    if floor == at {
        Ok(at)
    } else {
        Ok(floor + granularity)
    }
}

/// Drop sub-second precision
pub fn truncate_to_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    at.with_nanosecond(0).unwrap_or(at)
}

/// Drop precision below one millisecond (the storage resolution)
pub fn truncate_to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(3)
}

/// Parse an ISO-8601 timestamp carrying an offset and normalize it to UTC.
/// Timestamps without an offset are rejected; digits below the millisecond
/// are truncated.
pub fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| truncate_to_millis(dt.with_timezone(&Utc)))
        .map_err(|_| AppError::invalid_timestamp(value))
}

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_time_of_day(value: &str) -> AppResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| AppError::validation(format!("Invalid time of day: {value}")))
}

/// Parse a calendar date (YYYY-MM-DD)
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {value}")))
}

/// `[date 00:00Z, next day 00:00Z]`
pub fn day_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    (start, start + TimeDelta::days(1))
}

/// Time of day → seconds from midnight (storage representation)
pub fn time_to_secs(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight())
}

/// Seconds from midnight → time of day
pub fn secs_to_time(secs: i64) -> Option<NaiveTime> {
    u32::try_from(secs)
        .ok()
        .and_then(|s| NaiveTime::from_num_seconds_from_midnight_opt(s, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_round_up_to_next_quarter() {
        let rounded = round_up(utc("2024-01-10T09:07:00Z"), quarter_hour()).unwrap();
        assert_eq!(rounded, utc("2024-01-10T09:15:00Z"));
    }

    #[test]
    fn test_round_up_keeps_exact_boundary() {
        let rounded = round_up(utc("2024-01-10T09:15:00Z"), quarter_hour()).unwrap();
        assert_eq!(rounded, utc("2024-01-10T09:15:00Z"));
    }

    #[test]
    fn test_round_up_sub_second_past_boundary() {
        let rounded = round_up(utc("2024-01-10T09:15:00.001Z"), quarter_hour()).unwrap();
        assert_eq!(rounded, utc("2024-01-10T09:30:00Z"));
    }

    #[test]
    fn test_round_up_crosses_midnight() {
        let rounded = round_up(utc("2024-01-10T23:50:00Z"), quarter_hour()).unwrap();
        assert_eq!(rounded, utc("2024-01-11T00:00:00Z"));
    }

    #[test]
    fn test_truncate_to_seconds() {
        let t = truncate_to_seconds(utc("2024-01-10T09:07:42.987Z"));
        assert_eq!(t, utc("2024-01-10T09:07:42Z"));
    }

    #[test]
    fn test_parse_timestamp_normalizes_offset() {
        assert_eq!(
            parse_timestamp("2024-01-10T09:00:00+01:00").unwrap(),
            utc("2024-01-10T08:00:00Z")
        );
        assert_eq!(
            parse_timestamp("2024-01-10T17:00:00+01:00").unwrap(),
            utc("2024-01-10T16:00:00Z")
        );
    }

    #[test]
    fn test_parse_timestamp_truncates_below_millis() {
        assert_eq!(
            parse_timestamp("2024-01-10T09:00:00.123456+01:00").unwrap(),
            utc("2024-01-10T08:00:00.123Z")
        );
        assert_eq!(
            truncate_to_millis(utc("2024-01-10T08:00:00.999999Z")),
            utc("2024-01-10T08:00:00.999Z")
        );
    }

    #[test]
    fn test_parse_timestamp_requires_offset() {
        let err = parse_timestamp("2024-01-10T09:00:00").unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::InvalidTimestamp);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_parse_time_of_day_formats() {
        assert_eq!(
            parse_time_of_day("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day("22:15:30").unwrap(),
            NaiveTime::from_hms_opt(22, 15, 30).unwrap()
        );
        assert!(parse_time_of_day("24:00").is_err());
        assert!(parse_time_of_day("9h").is_err());
    }

    #[test]
    fn test_day_window() {
        let (start, end) = day_window(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(start, utc("2024-01-10T00:00:00Z"));
        assert_eq!(end, utc("2024-01-11T00:00:00Z"));
    }

    #[test]
    fn test_seconds_from_midnight() {
        let t = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
        assert_eq!(time_to_secs(t), 79_200);
        assert_eq!(secs_to_time(79_200), Some(t));
        assert_eq!(secs_to_time(86_400), None);
        assert_eq!(secs_to_time(-1), None);
    }
}
