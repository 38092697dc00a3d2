// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    build_monthly_plan, find_weekday_occurrences, month_boundaries, recommend_adjustments,
    shortfall,
};
use chrono::{NaiveDate, Weekday};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_find_weekday_occurrences_full_month() {
    // March 2025 has 5 Mondays: 3, 10, 17, 24, 31.
    let bounds = month_boundaries(date(2025, 3, 1));
    let occurrences = find_weekday_occurrences(&bounds, &[Weekday::Mon], None);
    assert_eq!(occurrences.len(), 5);
    assert_eq!(occurrences[0].date, date(2025, 3, 3));
    assert_eq!(occurrences[0].week_number, 1);
    assert_eq!(occurrences[4].date, date(2025, 3, 31));
    assert_eq!(occurrences[4].week_number, 5);
}

#[test]
fn test_find_weekday_occurrences_prorated_start_keeps_week_numbers() {
    // Starting mid-month drops early occurrences but keeps their numbering.
    let bounds = month_boundaries(date(2025, 3, 1));
    let occurrences =
        find_weekday_occurrences(&bounds, &[Weekday::Mon], Some(date(2025, 3, 15)));
    assert_eq!(occurrences.len(), 3);
    assert_eq!(occurrences[0].date, date(2025, 3, 17));
    assert_eq!(occurrences[0].week_number, 3);
}

#[test]
fn test_find_weekday_occurrences_sorted_across_weekdays() {
    let bounds = month_boundaries(date(2025, 3, 1));
    let occurrences = find_weekday_occurrences(&bounds, &[Weekday::Mon, Weekday::Fri], None);
    for pair in occurrences.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
}

#[test]
fn test_shortfall_sign_convention() {
    assert_eq!(shortfall(10, 8), -2);
    assert_eq!(shortfall(8, 8), 0);
    assert_eq!(shortfall(6, 8), 2);
}

#[test]
fn test_recommend_adjustments_stay_in_month_and_avoid_taken_dates() {
    let bounds = month_boundaries(date(2025, 2, 1));
    let preferred = [Weekday::Mon];
    let taken = find_weekday_occurrences(&bounds, &preferred, None);
    // February 2025 has 4 Mondays; require 6 -> shortage of 2.
    let gap = shortfall(6, taken.len());
    assert_eq!(gap, -2);

    let recommendations = recommend_adjustments(&bounds, &preferred, &taken, gap, None);
    assert_eq!(recommendations.len(), 2);
    for rec in &recommendations {
        assert!(rec.date >= bounds.start && rec.date <= bounds.end);
        assert_ne!(rec.weekday, Weekday::Mon);
        assert!(taken.iter().all(|occ| occ.date != rec.date));
        assert!(rec.reason.contains("shortage"));
    }
}

#[test]
fn test_recommend_adjustments_prefer_adjacent_weekdays() {
    let bounds = month_boundaries(date(2025, 2, 1));
    let preferred = [Weekday::Wed];
    let taken = find_weekday_occurrences(&bounds, &preferred, None);
    let recommendations = recommend_adjustments(&bounds, &preferred, &taken, -1, None);
    assert_eq!(recommendations.len(), 1);
    // Tuesday or Thursday sits closest to Wednesday.
    assert!(matches!(
        recommendations[0].weekday,
        Weekday::Tue | Weekday::Thu
    ));
    assert_eq!(recommendations[0].nearest_preferred, Weekday::Wed);
}

#[test]
fn test_recommend_adjustments_no_shortage_is_empty() {
    let bounds = month_boundaries(date(2025, 3, 1));
    let taken = find_weekday_occurrences(&bounds, &[Weekday::Mon], None);
    assert!(recommend_adjustments(&bounds, &[Weekday::Mon], &taken, 0, None).is_empty());
    assert!(recommend_adjustments(&bounds, &[Weekday::Mon], &taken, 1, None).is_empty());
}

#[test]
fn test_build_monthly_plan_excess_takes_first_required() {
    // 5 Mondays available, 4 required: schedule the first 4, no adjustments.
    let plan = build_monthly_plan(date(2025, 3, 1), 4, &[Weekday::Mon], false);
    assert_eq!(plan.shortfall, 1);
    assert_eq!(plan.scheduled.len(), 4);
    assert!(plan.adjustments.is_empty());
    assert_eq!(plan.scheduled[3].date, date(2025, 3, 24));
}

#[test]
fn test_build_monthly_plan_shortage_recommends_adjustments() {
    // February 2025: 4 Mondays, 6 required.
    let plan = build_monthly_plan(date(2025, 2, 1), 6, &[Weekday::Mon], false);
    assert_eq!(plan.shortfall, -2);
    assert_eq!(plan.scheduled.len(), 4);
    assert_eq!(plan.adjustments.len(), 2);
}

#[test]
fn test_build_monthly_plan_first_month_prorates() {
    let plan = build_monthly_plan(date(2025, 3, 15), 8, &[Weekday::Mon, Weekday::Wed], true);
    assert!(plan.is_first_month);
    // Mar 17, 19, 24, 26, 31 remain after the 15th.
    assert_eq!(plan.available.len(), 5);
    assert!(plan.prorated_count.is_some());
}
