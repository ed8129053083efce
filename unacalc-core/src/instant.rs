//! Points in calendar time
//!
//! `Instant` stores nanoseconds since the Unix epoch over the
//! Gregorian proleptic calendar, with an optional recorded UTC offset
//! kept for display. Calendar conversions use Howard Hinnant's civil
//! date algorithms: http://howardhinnant.github.io/date_algorithms.html

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const NANOS_PER_SECOND: i128 = 1_000_000_000;
pub const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
pub const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;
pub const NANOS_PER_DAY: i128 = 24 * NANOS_PER_HOUR;

/// Days in each month (non-leap year)
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days from year 0 to 1970-01-01
const UNIX_EPOCH_DAYS: i64 = 719_468;

/// Errors from datetime construction and parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("invalid month: {0} (must be 1-12)")]
    InvalidMonth(u32),
    #[error("invalid day: {0} for {1}/{2}")]
    InvalidDay(u32, u32, i32),
    #[error("invalid hour: {0} (must be 0-23)")]
    InvalidHour(u32),
    #[error("invalid minute: {0} (must be 0-59)")]
    InvalidMinute(u32),
    #[error("invalid second: {0} (must be 0-59)")]
    InvalidSecond(u32),
    #[error("datetime parse error: {0}")]
    Parse(String),
}

/// A point in time with nanosecond precision.
///
/// Produced only from date/datetime literals or the `now`/`today`
/// constants; immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instant {
    /// Nanoseconds since Unix epoch (negative for pre-1970 dates)
    nanos: i128,
    /// Recorded offset in seconds from UTC (None = unspecified/UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tz_offset: Option<i32>,
}

impl Instant {
    // ========== Construction ==========

    pub fn from_nanos(nanos: i128) -> Self {
        Self {
            nanos,
            tz_offset: None,
        }
    }

    /// Create a date (time = 00:00:00)
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateTimeError> {
        Self::from_ymd_hms_nano(year, month, day, 0, 0, 0, 0)
    }

    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, DateTimeError> {
        Self::from_ymd_hms_nano(year, month, day, hour, minute, second, 0)
    }

    pub fn from_ymd_hms_nano(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nano: u32,
    ) -> Result<Self, DateTimeError> {
        if !(1..=12).contains(&month) {
            return Err(DateTimeError::InvalidMonth(month));
        }
        let max_day = days_in_month(year, month);
        if day < 1 || day > max_day {
            return Err(DateTimeError::InvalidDay(day, month, year));
        }
        if hour > 23 {
            return Err(DateTimeError::InvalidHour(hour));
        }
        if minute > 59 {
            return Err(DateTimeError::InvalidMinute(minute));
        }
        if second > 59 {
            return Err(DateTimeError::InvalidSecond(second));
        }

        let days = days_from_civil(year, month, day);
        let time_nanos = (hour as i128) * NANOS_PER_HOUR
            + (minute as i128) * NANOS_PER_MINUTE
            + (second as i128) * NANOS_PER_SECOND
            + (nano as i128);

        Ok(Self {
            nanos: (days as i128) * NANOS_PER_DAY + time_nanos,
            tz_offset: None,
        })
    }

    /// Current UTC wall-clock time
    pub fn now() -> Self {
        let duration = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            nanos: duration.as_nanos() as i128,
            tz_offset: None,
        }
    }

    /// Midnight of the current day
    pub fn today() -> Self {
        Self::now().start_of_day()
    }

    pub fn with_tz_offset(mut self, offset_secs: i32) -> Self {
        self.tz_offset = Some(offset_secs);
        self
    }

    // ========== Accessors ==========

    pub fn as_nanos(&self) -> i128 {
        self.nanos
    }

    pub fn tz_offset(&self) -> Option<i32> {
        self.tz_offset
    }

    /// Decompose into year, month, day
    pub fn to_ymd(&self) -> (i32, u32, u32) {
        civil_from_days(self.nanos.div_euclid(NANOS_PER_DAY) as i64)
    }

    pub fn hour(&self) -> u32 {
        (self.nanos.rem_euclid(NANOS_PER_DAY) / NANOS_PER_HOUR) as u32
    }

    pub fn minute(&self) -> u32 {
        ((self.nanos.rem_euclid(NANOS_PER_DAY) % NANOS_PER_HOUR) / NANOS_PER_MINUTE) as u32
    }

    pub fn second(&self) -> u32 {
        ((self.nanos.rem_euclid(NANOS_PER_DAY) % NANOS_PER_MINUTE) / NANOS_PER_SECOND) as u32
    }

    // ========== Arithmetic ==========

    /// Shift by a signed number of seconds (fractional seconds keep
    /// nanosecond resolution)
    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self {
            nanos: self.nanos + (seconds * NANOS_PER_SECOND as f64).round() as i128,
            tz_offset: self.tz_offset,
        }
    }

    /// Elapsed seconds since `other` (negative when `other` is later)
    pub fn seconds_since(&self, other: &Instant) -> f64 {
        (self.nanos - other.nanos) as f64 / NANOS_PER_SECOND as f64
    }

    /// Midnight of the same day
    pub fn start_of_day(&self) -> Self {
        Self {
            nanos: self.nanos.div_euclid(NANOS_PER_DAY) * NANOS_PER_DAY,
            tz_offset: self.tz_offset,
        }
    }

    // ========== Parsing ==========

    /// Parse an ISO 8601 date or datetime string.
    ///
    /// Supported forms:
    /// - `2024-06-08`
    /// - `2024-06-08T19:45`
    /// - `2024-06-08T19:45:10`
    /// - `2024-06-08T19:45:10.5`
    /// - `2024-06-08T19:45:10Z`, `2024-06-08T19:45:10+05:30`
    pub fn parse(s: &str) -> Result<Self, DateTimeError> {
        let s = s.trim();
        if let Some(t_pos) = s.find('T') {
            Self::parse_datetime(&s[..t_pos], &s[t_pos + 1..])
        } else {
            Self::parse_date_only(s)
        }
    }

    fn parse_date_only(s: &str) -> Result<Self, DateTimeError> {
        let (year, month, day) = parse_date_fields(s)?;
        Self::from_ymd(year, month, day)
    }

    fn parse_datetime(date_part: &str, time_part: &str) -> Result<Self, DateTimeError> {
        let (year, month, day) = parse_date_fields(date_part)?;
        let (time_str, tz_offset) = extract_timezone(time_part)?;

        let (time_no_frac, nanos) = if let Some(dot_pos) = time_str.find('.') {
            let frac = parse_fractional_seconds(&time_str[dot_pos + 1..])?;
            (&time_str[..dot_pos], frac)
        } else {
            (time_str, 0u32)
        };

        let parts: Vec<&str> = time_no_frac.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(DateTimeError::Parse("expected HH:MM[:SS]".to_string()));
        }
        let hour: u32 = parts[0]
            .parse()
            .map_err(|_| DateTimeError::Parse("invalid hour".to_string()))?;
        let minute: u32 = parts[1]
            .parse()
            .map_err(|_| DateTimeError::Parse("invalid minute".to_string()))?;
        let second: u32 = if parts.len() == 3 {
            parts[2]
                .parse()
                .map_err(|_| DateTimeError::Parse("invalid second".to_string()))?
        } else {
            0
        };

        let mut instant = Self::from_ymd_hms_nano(year, month, day, hour, minute, second, nanos)?;
        instant.tz_offset = tz_offset;
        Ok(instant)
    }
}

fn parse_date_fields(s: &str) -> Result<(i32, u32, u32), DateTimeError> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return Err(DateTimeError::Parse("expected YYYY-MM-DD".to_string()));
    }
    let year: i32 = parts[0]
        .parse()
        .map_err(|_| DateTimeError::Parse("invalid year".to_string()))?;
    let month: u32 = parts[1]
        .parse()
        .map_err(|_| DateTimeError::Parse("invalid month".to_string()))?;
    let day: u32 = parts[2]
        .parse()
        .map_err(|_| DateTimeError::Parse("invalid day".to_string()))?;
    Ok((year, month, day))
}

fn extract_timezone(time_part: &str) -> Result<(&str, Option<i32>), DateTimeError> {
    if let Some(stripped) = time_part.strip_suffix('Z') {
        return Ok((stripped, Some(0)));
    }
    if let Some(plus_pos) = time_part.rfind('+') {
        let offset = parse_tz_offset(&time_part[plus_pos + 1..])?;
        return Ok((&time_part[..plus_pos], Some(offset)));
    }
    // A '-' can only be an offset after at least HH:MM
    if let Some(minus_pos) = time_part.rfind('-') {
        if minus_pos >= 5 {
            let offset = parse_tz_offset(&time_part[minus_pos + 1..])?;
            return Ok((&time_part[..minus_pos], Some(-offset)));
        }
    }
    Ok((time_part, None))
}

fn parse_tz_offset(s: &str) -> Result<i32, DateTimeError> {
    let parts: Vec<&str> = s.split(':').collect();
    let hours: i32 = parts[0]
        .parse()
        .map_err(|_| DateTimeError::Parse("invalid timezone hours".to_string()))?;
    let minutes: i32 = if parts.len() > 1 {
        parts[1]
            .parse()
            .map_err(|_| DateTimeError::Parse("invalid timezone minutes".to_string()))?
    } else {
        0
    };
    Ok(hours * 3600 + minutes * 60)
}

fn parse_fractional_seconds(s: &str) -> Result<u32, DateTimeError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateTimeError::Parse(
            "invalid fractional seconds".to_string(),
        ));
    }
    // Pad or truncate to nanosecond precision
    let padded = if s.len() >= 9 {
        s[..9].to_string()
    } else {
        format!("{:0<9}", s)
    };
    padded
        .parse()
        .map_err(|_| DateTimeError::Parse("invalid fractional seconds".to_string()))
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.to_ymd();
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            year,
            month,
            day,
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

// ============================================================================
// Calendar utilities (Gregorian proleptic)
// ============================================================================

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAYS_IN_MONTH[(month - 1) as usize],
        _ => 0,
    }
}

fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year } as i64;
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // [0, 399]
    let m = month as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as i64 - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * 146097 + doe - UNIX_EPOCH_DAYS
}

fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + UNIX_EPOCH_DAYS;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = z - era * 146097; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // [0, 399]
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    let year = if m <= 2 { y + 1 } else { y };
    (year as i32, m as u32, d as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_roundtrip() {
        let epoch = Instant::from_ymd(1970, 1, 1).unwrap();
        assert_eq!(epoch.as_nanos(), 0);
        assert_eq!(epoch.to_ymd(), (1970, 1, 1));
    }

    #[test]
    fn test_civil_roundtrip() {
        for &(y, m, d) in &[(2024, 6, 8), (2000, 2, 29), (1969, 12, 31), (1600, 3, 1)] {
            let instant = Instant::from_ymd(y, m, d).unwrap();
            assert_eq!(instant.to_ymd(), (y, m, d), "roundtrip {}-{}-{}", y, m, d);
        }
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
    }

    #[test]
    fn test_invalid_components() {
        assert!(matches!(
            Instant::from_ymd(2024, 13, 1),
            Err(DateTimeError::InvalidMonth(13))
        ));
        assert!(matches!(
            Instant::from_ymd(2023, 2, 29),
            Err(DateTimeError::InvalidDay(29, 2, 2023))
        ));
        assert!(matches!(
            Instant::from_ymd_hms(2024, 1, 1, 24, 0, 0),
            Err(DateTimeError::InvalidHour(24))
        ));
    }

    #[test]
    fn test_parse_date_only() {
        let instant = Instant::parse("2024-06-08").unwrap();
        assert_eq!(instant.to_ymd(), (2024, 6, 8));
        assert_eq!(instant.hour(), 0);
    }

    #[test]
    fn test_parse_datetime() {
        let instant = Instant::parse("2024-06-08T19:45:10").unwrap();
        assert_eq!(instant.to_ymd(), (2024, 6, 8));
        assert_eq!(
            (instant.hour(), instant.minute(), instant.second()),
            (19, 45, 10)
        );
    }

    #[test]
    fn test_parse_datetime_without_seconds() {
        let instant = Instant::parse("2024-06-08T19:45").unwrap();
        assert_eq!((instant.hour(), instant.minute(), instant.second()), (19, 45, 0));
    }

    #[test]
    fn test_parse_fraction_and_offset() {
        let instant = Instant::parse("2024-06-08T19:45:10.5+02:00").unwrap();
        assert_eq!(instant.second(), 10);
        assert_eq!(instant.tz_offset(), Some(7200));

        let zulu = Instant::parse("2024-06-08T19:45:10Z").unwrap();
        assert_eq!(zulu.tz_offset(), Some(0));

        let negative = Instant::parse("2024-06-08T19:45:10-05:30").unwrap();
        assert_eq!(negative.tz_offset(), Some(-(5 * 3600 + 30 * 60)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Instant::parse("2024-6").is_err());
        assert!(Instant::parse("2024-06-08T25:00").is_err());
        assert!(Instant::parse("not a date").is_err());
    }

    #[test]
    fn test_add_seconds() {
        let start = Instant::parse("2024-06-08T19:45:10").unwrap();
        let later = start.add_seconds(5.0 * 86_400.0);
        assert_eq!(later.to_ymd(), (2024, 6, 13));
        assert_eq!((later.hour(), later.minute(), later.second()), (19, 45, 10));
    }

    #[test]
    fn test_seconds_since() {
        let a = Instant::parse("2024-06-08").unwrap();
        let b = Instant::parse("2024-06-01").unwrap();
        assert_eq!(a.seconds_since(&b), 7.0 * 86_400.0);
        assert_eq!(b.seconds_since(&a), -7.0 * 86_400.0);
    }

    #[test]
    fn test_start_of_day() {
        let instant = Instant::parse("2024-06-08T19:45:10").unwrap();
        let midnight = instant.start_of_day();
        assert_eq!(midnight.to_ymd(), (2024, 6, 8));
        assert_eq!((midnight.hour(), midnight.minute(), midnight.second()), (0, 0, 0));
    }

    #[test]
    fn test_display() {
        let instant = Instant::parse("2024-06-13T19:45:10").unwrap();
        assert_eq!(format!("{}", instant), "2024-06-13 19:45:10");
    }
}
