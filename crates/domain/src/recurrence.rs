// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Occurrence generation for recurring assignments.
//!
//! Two strategies exist: weekly recurrence (walk the calendar week by week,
//! emitting selected weekdays until a target count or a bounding date is
//! reached) and manual calendar selection (explicit date/time tuples,
//! validated against the month or validity boundaries). Stopping at the
//! bound with fewer occurrences than requested is the first-month proration
//! policy, not an error.

use crate::dates::{MonthBoundaries, week_start_sunday, weekday_index};
use crate::error::DomainError;
use chrono::{Datelike, Days, Duration, NaiveDate, NaiveTime, Weekday};

/// Hard safety cap on generated occurrences.
///
/// Guards against malformed recurrence input producing an unbounded walk.
pub const MAX_GENERATED_OCCURRENCES: usize = 1000;

/// One explicitly chosen class slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualSelection {
    /// The chosen date.
    pub date: NaiveDate,
    /// The chosen start time.
    pub start_time: NaiveTime,
    /// The chosen end time.
    pub end_time: NaiveTime,
}

/// Fixed-step cadence for the legacy crash-course fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// One class per day.
    Daily,
    /// One class per week.
    Weekly,
}

/// Valid/invalid split of a candidate date list against a validity window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidityReport {
    /// Dates inside the window.
    pub valid: Vec<NaiveDate>,
    /// Dates outside the window.
    pub invalid: Vec<NaiveDate>,
    /// Blocking problems, one per invalid date.
    pub errors: Vec<String>,
    /// Advisory notes (past dates, count mismatches).
    pub warnings: Vec<String>,
}

impl ValidityReport {
    /// Whether every candidate date passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Whether a validity window can hold the requested class count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitReport {
    /// Whether the requested count fits.
    pub can_fit: bool,
    /// How many selected-weekday occurrences the window holds.
    pub max_possible: u32,
}

/// Generates dates for a weekly recurrence pattern.
///
/// Walks week by week from the Sunday on or before `start`, emitting one
/// date per selected weekday in ascending weekday order, skipping dates
/// before `start`, until `target_count` dates exist or a date passes
/// `bound`. Passing the bound returns the partial list.
///
/// # Errors
///
/// Returns an error if:
/// - `weekdays` is empty
/// - `target_count` is zero
/// - generation exceeds [`MAX_GENERATED_OCCURRENCES`]
#[allow(clippy::cast_possible_truncation)]
pub fn generate_weekly_recurrence(
    start: NaiveDate,
    weekdays: &[Weekday],
    target_count: u32,
    bound: Option<NaiveDate>,
) -> Result<Vec<NaiveDate>, DomainError> {
    if weekdays.is_empty() {
        return Err(DomainError::EmptyWeekdaySelection);
    }
    if target_count == 0 {
        return Err(DomainError::InvalidClassCount { count: 0 });
    }

    // Ascending weekday order keeps each week's dates chronological.
    let mut day_offsets: Vec<u64> = weekdays
        .iter()
        .map(|day| u64::from(weekday_index(*day)))
        .collect();
    day_offsets.sort_unstable();
    day_offsets.dedup();

    let target = target_count as usize;
    let mut dates: Vec<NaiveDate> = Vec::with_capacity(target.min(MAX_GENERATED_OCCURRENCES));
    let mut week_start = week_start_sunday(start);

    while dates.len() < target {
        for offset in &day_offsets {
            if dates.len() >= target {
                break;
            }
            let date = week_start + Days::new(*offset);
            if date < start {
                continue;
            }
            if let Some(end) = bound {
                if date > end {
                    // Bounded short: deliberate first-month proration.
                    return Ok(dates);
                }
            }
            if dates.len() >= MAX_GENERATED_OCCURRENCES {
                return Err(DomainError::GenerationLimitExceeded {
                    limit: MAX_GENERATED_OCCURRENCES,
                });
            }
            dates.push(date);
        }
        week_start += Duration::days(7);
    }

    Ok(dates)
}

/// Generates a plain weekly series: every occurrence of `weekday` from the
/// first on/after `start` through `end`.
///
/// # Errors
///
/// Returns an error if:
/// - `start` is not before `end`
/// - the range holds no occurrence of the weekday
/// - generation exceeds [`MAX_GENERATED_OCCURRENCES`]
pub fn generate_weekly_series(
    start: NaiveDate,
    end: NaiveDate,
    weekday: Weekday,
) -> Result<Vec<NaiveDate>, DomainError> {
    if start >= end {
        return Err(DomainError::InvalidDateRange { start, end });
    }

    let mut current = start;
    while current.weekday() != weekday && current <= end {
        current += Duration::days(1);
    }
    if current > end {
        return Err(DomainError::NoOccurrencesInRange { start, end });
    }

    let mut dates = Vec::new();
    while current <= end {
        if dates.len() >= MAX_GENERATED_OCCURRENCES {
            return Err(DomainError::GenerationLimitExceeded {
                limit: MAX_GENERATED_OCCURRENCES,
            });
        }
        dates.push(current);
        current += Duration::days(7);
    }
    Ok(dates)
}

/// Generates crash-course dates at a fixed cadence from `start`.
///
/// The legacy fallback for crash courses created without an explicit
/// recurrence method.
///
/// # Errors
///
/// Returns an error if `class_count` is zero or exceeds the generation cap.
#[allow(clippy::cast_possible_truncation)]
pub fn crash_course_dates(
    start: NaiveDate,
    class_count: u32,
    cadence: Cadence,
) -> Result<Vec<NaiveDate>, DomainError> {
    if class_count == 0 {
        return Err(DomainError::InvalidClassCount { count: 0 });
    }
    if class_count as usize > MAX_GENERATED_OCCURRENCES {
        return Err(DomainError::GenerationLimitExceeded {
            limit: MAX_GENERATED_OCCURRENCES,
        });
    }
    let step = match cadence {
        Cadence::Daily => 1,
        Cadence::Weekly => 7,
    };
    let mut dates = Vec::with_capacity(class_count as usize);
    let mut current = start;
    for _ in 0..class_count {
        dates.push(current);
        current += Duration::days(step);
    }
    Ok(dates)
}

/// Validates a manual calendar selection list.
///
/// # Errors
///
/// Returns an error if the list is empty, or any selection's end time does
/// not fall after its start time (errors name the 1-based index).
pub fn validate_manual_selections(selections: &[ManualSelection]) -> Result<(), DomainError> {
    if selections.is_empty() {
        return Err(DomainError::MissingField {
            field: "manual_selections",
        });
    }
    for (position, selection) in selections.iter().enumerate() {
        if selection.start_time >= selection.end_time {
            return Err(DomainError::InvalidSelection {
                index: position + 1,
                reason: String::from("end time must be after start time"),
            });
        }
    }
    Ok(())
}

/// Validates that every selection falls inside the given calendar month.
///
/// # Errors
///
/// Returns `DomainError::CalendarMonthViolation` naming the first offending
/// date and the valid window.
pub fn validate_selections_within_month(
    selections: &[ManualSelection],
    bounds: &MonthBoundaries,
) -> Result<(), DomainError> {
    for selection in selections {
        if selection.date < bounds.start || selection.date > bounds.end {
            return Err(DomainError::CalendarMonthViolation {
                date: selection.date,
                month_start: bounds.start,
                month_end: bounds.end,
            });
        }
    }
    Ok(())
}

/// The inclusive validity window of a crash course.
///
/// The start day counts: a 30-day package starting March 1 ends March 30.
#[must_use]
pub fn validity_window(start: NaiveDate, validity_days: u32) -> (NaiveDate, NaiveDate) {
    let end = start + Days::new(u64::from(validity_days.saturating_sub(1)));
    (start, end)
}

/// Checks candidate dates against an optional validity window.
///
/// Dates outside the window are blocking errors; past dates and class-count
/// mismatches are advisory warnings. With no window only the count check
/// applies.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn check_validity_dates(
    dates: &[NaiveDate],
    window: Option<(NaiveDate, NaiveDate)>,
    expected_count: u32,
    today: NaiveDate,
) -> ValidityReport {
    let mut report = ValidityReport::default();

    for date in dates {
        match window {
            Some((window_start, _)) if *date < window_start => {
                report.invalid.push(*date);
                report.errors.push(format!(
                    "Date {date} is before the crash course start date {window_start}"
                ));
            }
            Some((_, window_end)) if *date > window_end => {
                report.invalid.push(*date);
                report.errors.push(format!(
                    "Date {date} is beyond the validity end date {window_end}"
                ));
            }
            _ => report.valid.push(*date),
        }
        if *date < today {
            report.warnings.push(format!("Date {date} is in the past"));
        }
    }

    let valid_count = report.valid.len();
    let expected = expected_count as usize;
    if valid_count < expected {
        report.warnings.push(format!(
            "Only {valid_count} valid classes scheduled, but the package requires {expected_count}"
        ));
    } else if valid_count > expected {
        report.warnings.push(format!(
            "{valid_count} classes scheduled, but the package only includes {expected_count}"
        ));
    }

    report
}

/// Counts whether the requested class count fits in a validity window on
/// the selected weekdays.
#[must_use]
pub fn fits_validity_window(
    start: NaiveDate,
    validity_days: u32,
    class_count: u32,
    weekdays: &[Weekday],
) -> FitReport {
    let (window_start, window_end) = validity_window(start, validity_days);
    let mut count: u32 = 0;
    let mut current = window_start;
    while current <= window_end {
        if weekdays.contains(&current.weekday()) {
            count += 1;
        }
        current += Duration::days(1);
    }
    FitReport {
        can_fit: count >= class_count,
        max_possible: count,
    }
}
