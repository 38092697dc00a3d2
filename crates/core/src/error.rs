// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveTime};
use shala_domain::{Conflict, DomainError};
use shala_store::StoreError;
use uuid::Uuid;

/// Which post-insert side effect degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffectStep {
    /// A linked booking entered its payment grace period.
    AccessGrace,
    /// Linking assignment rows to their bookings.
    LinkBookings,
    /// Transitioning booking status to completed.
    BookingStatus,
    /// Marking bookings as recurring.
    MarkRecurring,
    /// Setting the billing cycle anchor.
    BillingAnchor,
    /// First-month invoice generation.
    Invoice,
    /// Shortfall detection.
    Shortfall,
    /// Container resolution or attachment.
    Container,
    /// The advisory conflict lookup.
    ConflictCheck,
}

impl SideEffectStep {
    /// Returns the wire representation of this step.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AccessGrace => "access_grace",
            Self::LinkBookings => "link_bookings",
            Self::BookingStatus => "booking_status",
            Self::MarkRecurring => "mark_recurring",
            Self::BillingAnchor => "billing_anchor",
            Self::Invoice => "invoice",
            Self::Shortfall => "shortfall",
            Self::Container => "container",
            Self::ConflictCheck => "conflict_check",
        }
    }
}

/// A side effect that failed after the core write succeeded.
///
/// Warnings are returned, never thrown: the assignment rows exist, but some
/// auxiliary bookkeeping is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideEffectWarning {
    /// The step that degraded.
    pub step: SideEffectStep,
    /// What happened.
    pub message: String,
}

impl SideEffectWarning {
    pub(crate) fn new(step: SideEffectStep, message: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
        }
    }
}

/// The result of a successful creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationOutcome {
    /// How many assignment rows were created.
    pub created: usize,
    /// Side effects that degraded along the way.
    pub warnings: Vec<SideEffectWarning>,
}

/// Errors that can abort an orchestration request.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated.
    Domain(DomainError),
    /// A store round-trip failed.
    Store(StoreError),
    /// No booking was supplied; every assignment requires one.
    BookingRequired,
    /// A supplied booking code does not exist in the store.
    BookingNotFound {
        /// The missing booking code.
        code: String,
    },
    /// The referenced package does not exist.
    PackageNotFound {
        /// The missing package id.
        id: Uuid,
    },
    /// Scheduling is blocked by the booking's payment state.
    AccessDenied {
        /// Why scheduling is blocked.
        reason: String,
    },
    /// An error-severity scheduling conflict blocks creation.
    ConflictBlocked(Conflict),
    /// The referenced weekly template does not exist.
    TemplateNotFound {
        /// The missing template id.
        id: Uuid,
    },
    /// Assignment rows were created but booking links could not be written.
    LinkFailed {
        /// How many rows were created before the failure.
        created: usize,
    },
    /// An identical adjustment row already exists.
    DuplicateAdjustment {
        /// The adjustment date.
        date: NaiveDate,
        /// The adjustment start time.
        start_time: NaiveTime,
    },
    /// The request was cancelled before completion.
    Cancelled,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::BookingRequired => {
                write!(
                    f,
                    "All class assignments must be linked to a booking. Select an existing booking or create a quick booking first."
                )
            }
            Self::BookingNotFound { code } => {
                write!(
                    f,
                    "Selected booking '{code}' is invalid or has been deleted"
                )
            }
            Self::PackageNotFound { id } => write!(f, "Selected package {id} not found"),
            Self::AccessDenied { reason } => write!(f, "Scheduling blocked: {reason}"),
            Self::ConflictBlocked(conflict) => {
                write!(f, "Scheduling conflict: {}", conflict.message)
            }
            Self::TemplateNotFound { id } => {
                write!(f, "Selected schedule template {id} not found")
            }
            Self::LinkFailed { created } => {
                write!(
                    f,
                    "{created} assignment(s) created but booking links could not be written. Please contact support."
                )
            }
            Self::DuplicateAdjustment { date, start_time } => {
                write!(
                    f,
                    "Adjustment class already exists for {date} at {}",
                    start_time.format("%H:%M")
                )
            }
            Self::Cancelled => write!(f, "The request was cancelled"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
