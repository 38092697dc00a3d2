// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar and clock utilities shared by the scheduling rules.
//!
//! All functions are pure; the single exception is [`studio_today`], which
//! reads the wall clock. Dates are [`NaiveDate`] values — parsing never goes
//! through a local timezone, so a `YYYY-MM-DD` string can never shift by a
//! day on machines in other zones. Where "today" matters, it is resolved in
//! the studio's operating timezone.

use crate::error::DomainError;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use chrono_tz::Tz;

/// The studio's operating timezone (UTC+05:30).
pub const STUDIO_TZ: Tz = chrono_tz::Asia::Kolkata;

/// First/last day of a calendar month plus its identifying key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBoundaries {
    /// First day of the month.
    pub start: NaiveDate,
    /// Last day of the month.
    pub end: NaiveDate,
    /// The month key in `YYYY-MM` format.
    pub month_key: String,
    /// Number of days in the month.
    pub days_in_month: u32,
}

/// Parses a strict `YYYY-MM-DD` date string.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` for any other shape, including
/// non-zero-padded components and impossible calendar dates.
pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if !shaped {
        return Err(DomainError::InvalidDate {
            value: value.to_string(),
        });
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| DomainError::InvalidDate {
        value: value.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses an `HH:MM` or `HH:MM:SS` time string.
///
/// # Errors
///
/// Returns `DomainError::InvalidTime` when the string matches neither form.
pub fn parse_time(value: &str) -> Result<NaiveTime, DomainError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| DomainError::InvalidTime {
            value: value.to_string(),
        })
}

/// Formats a time as `HH:MM`.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Converts a time to minutes since midnight.
#[must_use]
pub fn time_to_minutes(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Converts minutes since midnight back to a time, for display.
#[must_use]
pub fn minutes_to_time(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Today's date in the studio operating timezone.
///
/// The only place "now" enters the scheduling rules; everything downstream
/// takes the resolved date as a parameter.
#[must_use]
pub fn studio_today() -> NaiveDate {
    Utc::now().with_timezone(&STUDIO_TZ).date_naive()
}

/// Returns the calendar month boundaries containing `date`.
#[must_use]
pub fn month_boundaries(date: NaiveDate) -> MonthBoundaries {
    let start = date - Days::new(u64::from(date.day0()));
    let end = start + Months::new(1) - Days::new(1);
    MonthBoundaries {
        start,
        end,
        month_key: month_key(date),
        days_in_month: end.day(),
    }
}

/// Returns the boundaries of the month identified by a `YYYY-MM` key.
///
/// # Errors
///
/// Returns `DomainError::InvalidMonthKey` when the key does not name a
/// valid calendar month.
pub fn month_boundaries_for_key(key: &str) -> Result<MonthBoundaries, DomainError> {
    let invalid = || DomainError::InvalidMonthKey {
        value: key.to_string(),
    };
    let (year_str, month_str) = key.split_once('-').ok_or_else(invalid)?;
    if year_str.len() != 4 || month_str.len() != 2 {
        return Err(invalid());
    }
    let year: i32 = year_str.parse().map_err(|_| invalid())?;
    let month: u32 = month_str.parse().map_err(|_| invalid())?;
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    Ok(month_boundaries(start))
}

/// Formats the `YYYY-MM` month key for a date.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Returns the month key following the given one.
///
/// # Errors
///
/// Returns `DomainError::InvalidMonthKey` when the input key is malformed.
pub fn next_month_key(key: &str) -> Result<String, DomainError> {
    let bounds = month_boundaries_for_key(key)?;
    Ok(month_key(bounds.start + Months::new(1)))
}

/// Whether a date falls inside the given month boundaries.
#[must_use]
pub fn is_date_in_month(date: NaiveDate, bounds: &MonthBoundaries) -> bool {
    date >= bounds.start && date <= bounds.end
}

/// Number of days from `start` through the end of its month, inclusive.
///
/// The first-month proration input: a start on the 1st covers the whole
/// month, a start on the last day covers one day.
#[must_use]
pub fn remaining_days_in_month(start: NaiveDate) -> u32 {
    let bounds = month_boundaries(start);
    bounds.days_in_month - start.day0()
}

/// Returns the Sunday on or before the given date.
#[must_use]
pub fn week_start_sunday(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// Converts a 0=Sunday..6=Saturday index into a weekday.
///
/// # Errors
///
/// Returns `DomainError::InvalidWeekday` for indices above 6.
pub const fn weekday_from_index(index: u8) -> Result<Weekday, DomainError> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(DomainError::InvalidWeekday { value: index }),
    }
}

/// Converts a weekday to its 0=Sunday..6=Saturday index.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}
