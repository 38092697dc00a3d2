// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduling conflict analysis for a proposed class slot.
//!
//! All functions here are pure and operate on in-memory rows the caller has
//! already fetched. The severity split is product policy, preserved as-is:
//! only a same-instructor interval overlap against persisted assignments
//! blocks submission; template overlaps, future weekly hits, and timing
//! heuristics stay advisory.

use crate::dates::{format_time, time_to_minutes};
use crate::types::{Assignment, ClassStatus, WeeklySchedule};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use uuid::Uuid;

/// Minimum advisable class duration in minutes.
const MIN_DURATION_MINUTES: u32 = 30;
/// Maximum advisable class duration in minutes.
const MAX_DURATION_MINUTES: u32 = 180;
/// Earliest advisable start, minutes since midnight (06:00).
const EARLIEST_START_MINUTES: u32 = 360;
/// Latest advisable end, minutes since midnight (22:00).
const LATEST_END_MINUTES: u32 = 1320;

/// What kind of scheduling problem a conflict describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// The instructor is otherwise engaged.
    Instructor,
    /// The proposed timing itself is questionable.
    Timing,
    /// A room or equipment clash.
    Resource,
    /// The slot is over capacity.
    Capacity,
}

/// Whether a conflict blocks submission or merely advises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Advisory only; creation proceeds.
    Warning,
    /// Blocks creation.
    Error,
}

/// A detected scheduling problem. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The kind of problem.
    pub kind: ConflictKind,
    /// Whether it blocks or advises.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Optional remediation suggestions.
    pub suggestions: Vec<String>,
}

impl Conflict {
    fn new(kind: ConflictKind, severity: Severity, message: String) -> Self {
        Self {
            kind,
            severity,
            message,
            suggestions: Vec::new(),
        }
    }
}

/// The instructor/date/time combination under consideration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedSlot {
    /// The instructor being scheduled.
    pub instructor_id: Uuid,
    /// The proposed class date.
    pub date: NaiveDate,
    /// The proposed start time.
    pub start: NaiveTime,
    /// The proposed end time.
    pub end: NaiveTime,
}

/// Outcome of weighing a set of conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An error-severity conflict was found; creation must not proceed.
    Blocked(Conflict),
    /// Only warnings were found; surface the first and proceed.
    Advisory(Conflict),
    /// No conflicts.
    Clear,
}

/// Half-open interval overlap test.
///
/// Two slots overlap when each starts before the other ends; slots that
/// merely touch (one ends exactly when the other starts) do not overlap.
#[must_use]
pub fn intervals_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Scans persisted assignments for a same-instructor, same-date overlap.
///
/// Cancelled rows are ignored. Any hit is an error-severity instructor
/// conflict and blocks submission.
#[must_use]
pub fn scan_assignments(proposed: &ProposedSlot, existing: &[Assignment]) -> Option<Conflict> {
    existing
        .iter()
        .find(|assignment| {
            assignment.instructor_id == proposed.instructor_id
                && assignment.date == proposed.date
                && assignment.class_status != ClassStatus::Cancelled
                && intervals_overlap(
                    proposed.start,
                    proposed.end,
                    assignment.start_time,
                    assignment.end_time,
                )
        })
        .map(|hit| {
            Conflict::new(
                ConflictKind::Instructor,
                Severity::Error,
                format!(
                    "Instructor has another class at {} - {}",
                    format_time(hit.start_time),
                    format_time(hit.end_time)
                ),
            )
        })
}

/// Scans active weekly templates for a same-instructor, same-weekday
/// overlap. Advisory only.
#[must_use]
pub fn scan_weekly_templates(
    proposed: &ProposedSlot,
    templates: &[WeeklySchedule],
) -> Option<Conflict> {
    let weekday = proposed.date.weekday();
    templates
        .iter()
        .find(|template| {
            template.is_active
                && template.instructor_id == Some(proposed.instructor_id)
                && template.day_of_week == weekday
                && intervals_overlap(
                    proposed.start,
                    proposed.end,
                    template.start_time,
                    template.end_time,
                )
        })
        .map(|hit| {
            let mut conflict = Conflict::new(
                ConflictKind::Instructor,
                Severity::Warning,
                format!(
                    "Instructor has a weekly class scheduled at {} - {}",
                    format_time(hit.start_time),
                    format_time(hit.end_time)
                ),
            );
            conflict.suggestions = vec![
                String::from("Consider scheduling at a different time"),
                String::from("Check if the weekly class can be moved"),
            ];
            conflict
        })
}

/// Builds the advisory conflict for future weekly-type assignments the
/// store found at the exact proposed start time.
///
/// The caller performs the lookup; rows are passed in already filtered.
#[must_use]
pub fn future_weekly_conflict(matches: &[Assignment]) -> Option<Conflict> {
    matches.first().map(|hit| {
        Conflict::new(
            ConflictKind::Instructor,
            Severity::Warning,
            format!(
                "Future weekly class found at {}",
                format_time(hit.start_time)
            ),
        )
    })
}

/// Heuristic timing advisories for a proposed slot.
///
/// Duration under 30 or over 180 minutes, starts before 06:00, ends after
/// 22:00, and weekend dates all warn. None of these block.
#[must_use]
pub fn timing_advisories(proposed: &ProposedSlot) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    let start_minutes = time_to_minutes(proposed.start);
    let end_minutes = time_to_minutes(proposed.end);
    let duration = end_minutes.saturating_sub(start_minutes);

    if duration < MIN_DURATION_MINUTES {
        conflicts.push(Conflict::new(
            ConflictKind::Timing,
            Severity::Warning,
            String::from("Class duration should be at least 30 minutes"),
        ));
    } else if duration > MAX_DURATION_MINUTES {
        conflicts.push(Conflict::new(
            ConflictKind::Timing,
            Severity::Warning,
            String::from("Class duration over 3 hours is unusual"),
        ));
    }

    if start_minutes < EARLIEST_START_MINUTES {
        conflicts.push(Conflict::new(
            ConflictKind::Timing,
            Severity::Warning,
            String::from("Very early morning class (before 6 AM)"),
        ));
    } else if end_minutes > LATEST_END_MINUTES {
        conflicts.push(Conflict::new(
            ConflictKind::Timing,
            Severity::Warning,
            String::from("Late evening class (after 10 PM)"),
        ));
    }

    let weekday = proposed.date.weekday();
    if weekday == Weekday::Sat || weekday == Weekday::Sun {
        let day = if weekday == Weekday::Sun {
            "Sunday"
        } else {
            "Saturday"
        };
        conflicts.push(Conflict::new(
            ConflictKind::Timing,
            Severity::Warning,
            format!("Weekend class scheduled for {day}"),
        ));
    }

    conflicts
}

/// Runs the local analysis passes over already-fetched context rows.
///
/// The store-backed future-weekly lookup is the caller's responsibility;
/// its result can be prepended to the returned list before resolution.
#[must_use]
pub fn analyze_slot(
    proposed: &ProposedSlot,
    existing: &[Assignment],
    templates: &[WeeklySchedule],
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    if let Some(conflict) = scan_assignments(proposed, existing) {
        conflicts.push(conflict);
    }
    if let Some(conflict) = scan_weekly_templates(proposed, templates) {
        conflicts.push(conflict);
    }
    conflicts.extend(timing_advisories(proposed));
    conflicts
}

/// Weighs a conflict list: the first error blocks, otherwise the first
/// warning advises.
#[must_use]
pub fn resolve(conflicts: Vec<Conflict>) -> Resolution {
    let mut first_warning = None;
    for conflict in conflicts {
        match conflict.severity {
            Severity::Error => return Resolution::Blocked(conflict),
            Severity::Warning => {
                if first_warning.is_none() {
                    first_warning = Some(conflict);
                }
            }
        }
    }
    first_warning.map_or(Resolution::Clear, Resolution::Advisory)
}
