// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar-month shortfall detection and adjustment planning.
//!
//! A monthly subscription guarantees a class count inside one calendar
//! month. When the preferred weekday pattern cannot supply enough
//! occurrences, alternate dates inside the same month are recommended as
//! "adjustment" classes. Recommendations are advisory; creating adjustment
//! rows is a separate, operator-invoked step.

use crate::dates::{MonthBoundaries, weekday_index};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

/// One occurrence of a preferred weekday inside a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayOccurrence {
    /// The occurrence date.
    pub date: NaiveDate,
    /// Its weekday.
    pub weekday: Weekday,
    /// Which occurrence of that weekday in the month (1-based).
    pub week_number: u32,
}

/// A recommended alternate date to fill a shortfall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentRecommendation {
    /// The recommended date.
    pub date: NaiveDate,
    /// Its weekday.
    pub weekday: Weekday,
    /// Why the adjustment is needed.
    pub reason: String,
    /// The preferred weekday this date stands in for.
    pub nearest_preferred: Weekday,
}

/// A complete scheduling plan for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyPlan {
    /// The planned month key (`YYYY-MM`).
    pub month_key: String,
    /// The guaranteed class count.
    pub required: u32,
    /// The preferred weekday pattern.
    pub preferred: Vec<Weekday>,
    /// Every preferred-weekday occurrence available in the month.
    pub available: Vec<WeekdayOccurrence>,
    /// The occurrences the plan schedules.
    pub scheduled: Vec<WeekdayOccurrence>,
    /// Adjustment recommendations covering any shortage.
    pub adjustments: Vec<AdjustmentRecommendation>,
    /// Negative = shortage, positive = excess, zero = exact.
    pub shortfall: i64,
    /// Whether this is the subscription's first (prorated) month.
    pub is_first_month: bool,
    /// Classes actually plannable in a prorated first month.
    pub prorated_count: Option<u32>,
}

/// Finds all occurrences of the given weekdays inside a month, optionally
/// starting from a mid-month date (first-month proration).
#[must_use]
pub fn find_weekday_occurrences(
    bounds: &MonthBoundaries,
    weekdays: &[Weekday],
    start_from: Option<NaiveDate>,
) -> Vec<WeekdayOccurrence> {
    let effective_start = match start_from {
        Some(from) if from > bounds.start => from,
        _ => bounds.start,
    };

    let mut occurrences = Vec::new();
    let mut counters = [0_u32; 7];
    let mut current = bounds.start;
    while current <= bounds.end {
        let weekday = current.weekday();
        if weekdays.contains(&weekday) {
            let index = usize::from(weekday_index(weekday));
            counters[index] += 1;
            if current >= effective_start {
                occurrences.push(WeekdayOccurrence {
                    date: current,
                    weekday,
                    week_number: counters[index],
                });
            }
        }
        current += Duration::days(1);
    }
    occurrences
}

/// Shortfall of available occurrences against a required count.
///
/// Negative means shortage, positive means excess.
#[must_use]
pub fn shortfall(required: u32, available: usize) -> i64 {
    i64::try_from(available).unwrap_or(i64::MAX) - i64::from(required)
}

/// Recommends alternate in-month dates to cover a shortage.
///
/// Candidates are occurrences of non-preferred weekdays, excluding dates
/// already taken, ordered by weekday proximity to the preferred pattern and
/// capped at the shortage size. An empty result means the month simply has
/// no room left.
#[must_use]
pub fn recommend_adjustments(
    bounds: &MonthBoundaries,
    preferred: &[Weekday],
    taken: &[WeekdayOccurrence],
    shortage: i64,
    start_from: Option<NaiveDate>,
) -> Vec<AdjustmentRecommendation> {
    if shortage >= 0 || preferred.is_empty() {
        return Vec::new();
    }
    let needed = usize::try_from(-shortage).unwrap_or(0);

    let taken_dates: HashSet<NaiveDate> = taken.iter().map(|occ| occ.date).collect();
    let alternates: Vec<Weekday> = (0..7_u8)
        .filter_map(|index| crate::dates::weekday_from_index(index).ok())
        .filter(|day| !preferred.contains(day))
        .collect();

    let mut candidates: Vec<WeekdayOccurrence> =
        find_weekday_occurrences(bounds, &alternates, start_from)
            .into_iter()
            .filter(|occ| !taken_dates.contains(&occ.date))
            .collect();
    candidates.sort_by_key(|occ| (weekday_distance(occ.weekday, preferred), occ.date));

    let reason = format!(
        "Calendar shortage: only {} preferred-day occurrence(s) available, need {} classes",
        taken.len(),
        taken.len() + needed
    );

    candidates
        .into_iter()
        .take(needed)
        .map(|occ| {
            let nearest = nearest_preferred_day(occ.weekday, preferred);
            AdjustmentRecommendation {
                date: occ.date,
                weekday: occ.weekday,
                reason: reason.clone(),
                nearest_preferred: nearest,
            }
        })
        .collect()
}

/// Builds the complete scheduling plan for one calendar month.
///
/// On a shortage every available occurrence is scheduled and adjustments
/// cover the rest; on an excess only the first `required` occurrences are
/// scheduled.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn build_monthly_plan(
    start: NaiveDate,
    required: u32,
    preferred: &[Weekday],
    is_first_month: bool,
) -> MonthlyPlan {
    let bounds = crate::dates::month_boundaries(start);
    let start_from = if is_first_month { Some(start) } else { None };
    let available = find_weekday_occurrences(&bounds, preferred, start_from);
    let gap = shortfall(required, available.len());

    let (scheduled, adjustments) = if gap < 0 {
        let adjustments = recommend_adjustments(&bounds, preferred, &available, gap, start_from);
        (available.clone(), adjustments)
    } else {
        (
            available
                .iter()
                .copied()
                .take(required as usize)
                .collect::<Vec<_>>(),
            Vec::new(),
        )
    };

    let prorated_count = if is_first_month {
        Some((scheduled.len() + adjustments.len()) as u32)
    } else {
        None
    };

    MonthlyPlan {
        month_key: bounds.month_key.clone(),
        required,
        preferred: preferred.to_vec(),
        available,
        scheduled,
        adjustments,
        shortfall: gap,
        is_first_month,
        prorated_count,
    }
}

/// Smallest index distance from a weekday to any preferred day.
fn weekday_distance(day: Weekday, preferred: &[Weekday]) -> u8 {
    preferred
        .iter()
        .map(|p| weekday_index(*p).abs_diff(weekday_index(day)))
        .min()
        .unwrap_or(u8::MAX)
}

/// The preferred day closest to the given weekday.
fn nearest_preferred_day(day: Weekday, preferred: &[Weekday]) -> Weekday {
    preferred
        .iter()
        .copied()
        .min_by_key(|p| weekday_index(*p).abs_diff(weekday_index(day)))
        .unwrap_or(day)
}
