// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use shala_core::CoreError;
use shala_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. User-visible text derives directly from these messages.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Scheduling is blocked by the booking's payment state.
    AccessDenied {
        /// A human-readable description of the block.
        message: String,
    },
    /// An error-severity scheduling conflict blocks creation.
    ConflictBlocked {
        /// A human-readable description of the conflict.
        message: String,
        /// Optional remediation suggestions.
        suggestions: Vec<String>,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request was cancelled before completion.
    Cancelled,
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::AccessDenied { message } => write!(f, "{message}"),
            Self::ConflictBlocked { message, .. } => {
                write!(f, "Scheduling conflict: {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Cancelled => write!(f, "The request was cancelled"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidDate { value } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Invalid date '{value}': expected YYYY-MM-DD"),
        },
        DomainError::InvalidTime { value } => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("Invalid time '{value}': expected HH:MM"),
        },
        DomainError::InvalidMonthKey { value } => ApiError::InvalidInput {
            field: String::from("calendar_month"),
            message: format!("Invalid calendar month '{value}': expected YYYY-MM"),
        },
        DomainError::InvalidIdentifier { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Invalid {field} '{value}'"),
        },
        DomainError::MissingField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Missing required field: {field}"),
        },
        DomainError::EndNotAfterStart { start, end } => ApiError::InvalidInput {
            field: String::from("end_time"),
            message: format!(
                "End time must be after start time, got {} to {}",
                start.format("%H:%M"),
                end.format("%H:%M")
            ),
        },
        DomainError::InvalidDateRange { start, end } => ApiError::InvalidInput {
            field: String::from("end_date"),
            message: format!("End date {end} must be after start date {start}"),
        },
        DomainError::DateInPast { date } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Class date {date} cannot be in the past"),
        },
        DomainError::InvalidPaymentAmount => ApiError::InvalidInput {
            field: String::from("payment_amount"),
            message: String::from("Payment amount must be a valid positive number"),
        },
        DomainError::InvalidWeekday { value } => ApiError::InvalidInput {
            field: String::from("weekly_days"),
            message: format!("Invalid weekday {value}: must be 0 (Sunday) through 6 (Saturday)"),
        },
        DomainError::EmptyWeekdaySelection => ApiError::InvalidInput {
            field: String::from("weekly_days"),
            message: String::from("Please select at least one day of the week"),
        },
        DomainError::InvalidClassCount { count } => ApiError::InvalidInput {
            field: String::from("total_classes"),
            message: format!("Class count must be greater than 0, got {count}"),
        },
        DomainError::CalendarMonthViolation {
            date,
            month_start,
            month_end,
        } => ApiError::DomainRuleViolation {
            rule: String::from("calendar_month_boundary"),
            message: format!(
                "Date {date} crosses the calendar month boundary: monthly classes must fall between {month_start} and {month_end}"
            ),
        },
        DomainError::ValidityWindowViolation {
            date,
            window_start,
            window_end,
        } => ApiError::DomainRuleViolation {
            rule: String::from("validity_window"),
            message: format!(
                "Date {date} is outside the package validity window ({window_start} to {window_end})"
            ),
        },
        DomainError::GenerationLimitExceeded { limit } => ApiError::DomainRuleViolation {
            rule: String::from("generation_limit"),
            message: format!(
                "Occurrence generation exceeded the maximum of {limit}: check the date range and recurrence settings"
            ),
        },
        DomainError::NoOccurrencesInRange { start, end } => ApiError::InvalidInput {
            field: String::from("start_date"),
            message: format!("No occurrences of the selected day found between {start} and {end}"),
        },
        DomainError::TooManyBookings { count } => ApiError::DomainRuleViolation {
            rule: String::from("booking_cardinality"),
            message: format!(
                "Individual and private group classes can only have one booking, got {count}"
            ),
        },
        DomainError::InvalidSelection { index, reason } => ApiError::InvalidInput {
            field: String::from("manual_selections"),
            message: format!("Invalid selection {index}: {reason}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::Internal {
            message: format!("Date arithmetic overflow while {operation}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Domain(domain_err) => translate_domain_error(domain_err),
        CoreError::Store(store_err) => ApiError::Internal {
            message: store_err.to_string(),
        },
        CoreError::BookingRequired => ApiError::InvalidInput {
            field: String::from("booking_ids"),
            message: String::from(
                "All class assignments must be linked to a booking. Select an existing booking or create a quick booking first.",
            ),
        },
        CoreError::BookingNotFound { code } => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Selected booking '{code}' is invalid or has been deleted"),
        },
        CoreError::PackageNotFound { id } => ApiError::ResourceNotFound {
            resource_type: String::from("Package"),
            message: format!("Selected package {id} not found"),
        },
        CoreError::AccessDenied { reason } => ApiError::AccessDenied {
            message: format!("Scheduling blocked: {reason}"),
        },
        CoreError::ConflictBlocked(conflict) => ApiError::ConflictBlocked {
            message: conflict.message,
            suggestions: conflict.suggestions,
        },
        CoreError::TemplateNotFound { id } => ApiError::ResourceNotFound {
            resource_type: String::from("Schedule template"),
            message: format!("Selected schedule template {id} not found"),
        },
        CoreError::LinkFailed { created } => ApiError::Internal {
            message: format!(
                "{created} assignment(s) created but booking links could not be written. Please contact support."
            ),
        },
        CoreError::DuplicateAdjustment { date, start_time } => ApiError::DomainRuleViolation {
            rule: String::from("duplicate_adjustment"),
            message: format!(
                "Adjustment class already exists for {date} at {}",
                start_time.format("%H:%M")
            ),
        },
        CoreError::Cancelled => ApiError::Cancelled,
    }
}
