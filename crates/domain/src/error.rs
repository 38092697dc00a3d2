// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveTime};

/// Errors that can occur during domain validation and generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A date string was not a valid `YYYY-MM-DD` calendar date.
    InvalidDate {
        /// The rejected input.
        value: String,
    },
    /// A time string was not a valid `HH:MM` or `HH:MM:SS` time.
    InvalidTime {
        /// The rejected input.
        value: String,
    },
    /// A calendar month key was not in `YYYY-MM` format.
    InvalidMonthKey {
        /// The rejected input.
        value: String,
    },
    /// An identifier field did not hold a valid UUID.
    InvalidIdentifier {
        /// The field that was invalid.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A required field was missing or empty.
    MissingField {
        /// The field that was missing.
        field: &'static str,
    },
    /// An end time did not fall after its start time.
    EndNotAfterStart {
        /// The start time.
        start: NaiveTime,
        /// The end time.
        end: NaiveTime,
    },
    /// A start date did not fall before its end date.
    InvalidDateRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },
    /// A class date lies in the past.
    DateInPast {
        /// The rejected date.
        date: NaiveDate,
    },
    /// A payment amount was negative or not a finite number.
    InvalidPaymentAmount,
    /// A weekday index was outside 0 (Sunday) through 6 (Saturday).
    InvalidWeekday {
        /// The rejected index.
        value: u8,
    },
    /// A weekly recurrence was requested with no weekdays selected.
    EmptyWeekdaySelection,
    /// A class count must be greater than zero.
    InvalidClassCount {
        /// The rejected count.
        count: u32,
    },
    /// A generated or selected date crossed its calendar month boundary.
    CalendarMonthViolation {
        /// The offending date.
        date: NaiveDate,
        /// First day of the valid month.
        month_start: NaiveDate,
        /// Last day of the valid month.
        month_end: NaiveDate,
    },
    /// A crash course date fell outside the package validity window.
    ValidityWindowViolation {
        /// The offending date.
        date: NaiveDate,
        /// First day of the validity window.
        window_start: NaiveDate,
        /// Last day of the validity window.
        window_end: NaiveDate,
    },
    /// Occurrence generation exceeded the hard safety cap.
    GenerationLimitExceeded {
        /// The cap that was exceeded.
        limit: usize,
    },
    /// A weekly series contained no occurrence of the requested day.
    NoOccurrencesInRange {
        /// First date searched.
        start: NaiveDate,
        /// Last date searched.
        end: NaiveDate,
    },
    /// More bookings were supplied than the assignment kind permits.
    TooManyBookings {
        /// The number of bookings supplied.
        count: usize,
    },
    /// A manual calendar selection was invalid.
    InvalidSelection {
        /// The 1-based selection index.
        index: usize,
        /// Why the selection was rejected.
        reason: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { value } => {
                write!(f, "Invalid date '{value}': expected YYYY-MM-DD")
            }
            Self::InvalidTime { value } => {
                write!(f, "Invalid time '{value}': expected HH:MM")
            }
            Self::InvalidMonthKey { value } => {
                write!(f, "Invalid calendar month '{value}': expected YYYY-MM")
            }
            Self::InvalidIdentifier { field, value } => {
                write!(f, "Invalid {field} '{value}': not a valid UUID")
            }
            Self::MissingField { field } => write!(f, "Missing required field: {field}"),
            Self::EndNotAfterStart { start, end } => {
                write!(
                    f,
                    "End time must be after start time, got {} to {}",
                    start.format("%H:%M"),
                    end.format("%H:%M")
                )
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "End date {end} must be after start date {start}")
            }
            Self::DateInPast { date } => {
                write!(f, "Class date {date} cannot be in the past")
            }
            Self::InvalidPaymentAmount => {
                write!(f, "Payment amount must be a valid positive number")
            }
            Self::InvalidWeekday { value } => {
                write!(
                    f,
                    "Invalid weekday {value}: must be 0 (Sunday) through 6 (Saturday)"
                )
            }
            Self::EmptyWeekdaySelection => {
                write!(f, "Please select at least one day of the week")
            }
            Self::InvalidClassCount { count } => {
                write!(f, "Class count must be greater than 0, got {count}")
            }
            Self::CalendarMonthViolation {
                date,
                month_start,
                month_end,
            } => {
                write!(
                    f,
                    "Date {date} crosses the calendar month boundary: monthly classes must fall between {month_start} and {month_end}"
                )
            }
            Self::ValidityWindowViolation {
                date,
                window_start,
                window_end,
            } => {
                write!(
                    f,
                    "Date {date} is outside the package validity window ({window_start} to {window_end})"
                )
            }
            Self::GenerationLimitExceeded { limit } => {
                write!(
                    f,
                    "Occurrence generation exceeded the maximum of {limit}: check the date range and recurrence settings"
                )
            }
            Self::NoOccurrencesInRange { start, end } => {
                write!(
                    f,
                    "No occurrences of the selected day found between {start} and {end}"
                )
            }
            Self::TooManyBookings { count } => {
                write!(
                    f,
                    "Individual and private group classes can only have one booking, got {count}"
                )
            }
            Self::InvalidSelection { index, reason } => {
                write!(f, "Invalid selection {index}: {reason}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
