// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, is_date_in_month, minutes_to_time, month_boundaries, month_boundaries_for_key,
    month_key, next_month_key, parse_date, parse_time, remaining_days_in_month, time_to_minutes,
    week_start_sunday, weekday_from_index, weekday_index,
};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_date_accepts_valid_date() {
    assert_eq!(parse_date("2025-03-03").unwrap(), date(2025, 3, 3));
}

#[test]
fn test_parse_date_rejects_unpadded_components() {
    assert!(matches!(
        parse_date("2025-3-3"),
        Err(DomainError::InvalidDate { .. })
    ));
}

#[test]
fn test_parse_date_rejects_impossible_date() {
    assert!(matches!(
        parse_date("2025-02-30"),
        Err(DomainError::InvalidDate { .. })
    ));
}

#[test]
fn test_parse_date_rejects_garbage() {
    assert!(parse_date("not-a-date").is_err());
    assert!(parse_date("").is_err());
    assert!(parse_date("2025/03/03").is_err());
}

#[test]
fn test_parse_time_accepts_both_forms() {
    let expected = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
    assert_eq!(parse_time("09:30").unwrap(), expected);
    assert_eq!(parse_time("09:30:00").unwrap(), expected);
}

#[test]
fn test_parse_time_rejects_out_of_range() {
    assert!(parse_time("24:00").is_err());
    assert!(parse_time("09:61").is_err());
}

#[test]
fn test_time_minutes_round_trip() {
    let time = NaiveTime::from_hms_opt(18, 45, 0).unwrap();
    assert_eq!(time_to_minutes(time), 1125);
    assert_eq!(minutes_to_time(1125).unwrap(), time);
}

#[test]
fn test_month_boundaries_regular_month() {
    let bounds = month_boundaries(date(2025, 3, 15));
    assert_eq!(bounds.start, date(2025, 3, 1));
    assert_eq!(bounds.end, date(2025, 3, 31));
    assert_eq!(bounds.month_key, "2025-03");
    assert_eq!(bounds.days_in_month, 31);
}

#[test]
fn test_month_boundaries_february_leap_year() {
    let bounds = month_boundaries(date(2024, 2, 10));
    assert_eq!(bounds.end, date(2024, 2, 29));
    assert_eq!(bounds.days_in_month, 29);
}

#[test]
fn test_month_boundaries_december() {
    let bounds = month_boundaries(date(2025, 12, 31));
    assert_eq!(bounds.start, date(2025, 12, 1));
    assert_eq!(bounds.end, date(2025, 12, 31));
}

#[test]
fn test_month_boundaries_for_key_round_trip() {
    let bounds = month_boundaries_for_key("2025-04").unwrap();
    assert_eq!(bounds.start, date(2025, 4, 1));
    assert_eq!(bounds.end, date(2025, 4, 30));
}

#[test]
fn test_month_boundaries_for_key_rejects_malformed_keys() {
    assert!(month_boundaries_for_key("2025-13").is_err());
    assert!(month_boundaries_for_key("2025-4").is_err());
    assert!(month_boundaries_for_key("april").is_err());
}

#[test]
fn test_next_month_key_rolls_over_year() {
    assert_eq!(next_month_key("2025-12").unwrap(), "2026-01");
    assert_eq!(next_month_key("2025-01").unwrap(), "2025-02");
}

#[test]
fn test_is_date_in_month() {
    let bounds = month_boundaries(date(2025, 4, 1));
    assert!(is_date_in_month(date(2025, 4, 30), &bounds));
    assert!(!is_date_in_month(date(2025, 5, 1), &bounds));
}

#[test]
fn test_remaining_days_in_month() {
    // Start on the 1st covers the whole month.
    assert_eq!(remaining_days_in_month(date(2025, 3, 1)), 31);
    // Start on the last day covers one day.
    assert_eq!(remaining_days_in_month(date(2025, 3, 31)), 1);
    assert_eq!(remaining_days_in_month(date(2025, 3, 17)), 15);
}

#[test]
fn test_week_start_sunday() {
    // 2025-03-03 is a Monday; the prior Sunday is 2025-03-02.
    assert_eq!(week_start_sunday(date(2025, 3, 3)), date(2025, 3, 2));
    // A Sunday maps to itself.
    assert_eq!(week_start_sunday(date(2025, 3, 2)), date(2025, 3, 2));
}

#[test]
fn test_weekday_index_round_trip() {
    for index in 0..=6_u8 {
        let weekday = weekday_from_index(index).unwrap();
        assert_eq!(weekday_index(weekday), index);
    }
    assert!(matches!(
        weekday_from_index(7),
        Err(DomainError::InvalidWeekday { value: 7 })
    ));
}

#[test]
fn test_month_key_zero_pads() {
    assert_eq!(month_key(date(2025, 4, 9)), "2025-04");
}

#[test]
fn test_weekday_sanity() {
    assert_eq!(date(2025, 3, 3).weekday(), Weekday::Mon);
}
