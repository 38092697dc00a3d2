// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed creation requests.
//!
//! One variant per assignment kind, each holding only the fields its path
//! needs; intent travels as data. Constructors validate what can be checked
//! without the store so malformed requests die before any network call.

use chrono::{NaiveDate, NaiveTime, Weekday};
use shala_domain::{
    AssignmentKind, BookingType, Cadence, DomainError, ManualSelection, PaymentType,
    clean_booking_codes,
};
use uuid::Uuid;

/// An entered payment amount and the policy it is interpreted under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentTerms {
    /// The payout policy.
    pub payment_type: PaymentType,
    /// The amount as entered.
    pub amount: f64,
}

impl PaymentTerms {
    /// Creates payment terms.
    ///
    /// # Errors
    ///
    /// Returns an error when the amount is negative or not finite.
    pub fn new(payment_type: PaymentType, amount: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::InvalidPaymentAmount);
        }
        Ok(Self {
            payment_type,
            amount,
        })
    }
}

/// The bookings a request links, cleaned of placeholder entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSelection {
    /// Cleaned booking codes.
    pub codes: Vec<String>,
    /// The booking type shared by the selection.
    pub booking_type: BookingType,
}

impl BookingSelection {
    /// Creates a selection, dropping empty and placeholder codes.
    #[must_use]
    pub fn new(codes: &[String], booking_type: BookingType) -> Self {
        Self {
            codes: clean_booking_codes(codes),
            booking_type,
        }
    }
}

/// How a monthly, crash, or package request picks its dates.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleMethod {
    /// Walk selected weekdays week by week.
    ///
    /// `total_classes` drives monthly requests; package and crash requests
    /// override it with the package's class count.
    WeeklyRecurrence {
        /// Selected weekdays.
        weekdays: Vec<Weekday>,
        /// Target class count (monthly requests).
        total_classes: u32,
        /// Class start time.
        start_time: NaiveTime,
        /// Class end time.
        end_time: NaiveTime,
    },
    /// Explicit per-class date and time selections.
    ManualCalendar {
        /// The chosen slots.
        selections: Vec<ManualSelection>,
    },
    /// Fixed-cadence fallback (crash courses only).
    FixedCadence {
        /// Step between classes.
        cadence: Cadence,
        /// Class start time.
        start_time: NaiveTime,
        /// Class end time.
        end_time: NaiveTime,
    },
}

impl ScheduleMethod {
    fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::WeeklyRecurrence {
                weekdays,
                start_time,
                end_time,
                ..
            } => {
                if weekdays.is_empty() {
                    return Err(DomainError::EmptyWeekdaySelection);
                }
                ordered_times(*start_time, *end_time)
            }
            Self::ManualCalendar { selections } => {
                shala_domain::validate_manual_selections(selections)
            }
            Self::FixedCadence {
                start_time,
                end_time,
                ..
            } => ordered_times(*start_time, *end_time),
        }
    }
}

fn ordered_times(start: NaiveTime, end: NaiveTime) -> Result<(), DomainError> {
    if start >= end {
        return Err(DomainError::EndNotAfterStart { start, end });
    }
    Ok(())
}

/// A one-off session request.
#[derive(Debug, Clone, PartialEq)]
pub struct AdhocRequest {
    /// The class type being taught.
    pub class_type_id: Uuid,
    /// The session date.
    pub date: NaiveDate,
    /// Session start time.
    pub start_time: NaiveTime,
    /// Session end time.
    pub end_time: NaiveTime,
    /// The instructor.
    pub instructor_id: Uuid,
    /// Payment terms.
    pub payment: PaymentTerms,
    /// Linked bookings.
    pub bookings: BookingSelection,
    /// The operator creating the assignment.
    pub assigned_by: Uuid,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl AdhocRequest {
    /// Creates an adhoc request.
    ///
    /// # Errors
    ///
    /// Returns an error when the end time does not fall after the start
    /// time. (Past-date rejection happens in the orchestrator, where
    /// "today" is resolved in the studio timezone.)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        class_type_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        instructor_id: Uuid,
        payment: PaymentTerms,
        bookings: BookingSelection,
        assigned_by: Uuid,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        ordered_times(start_time, end_time)?;
        Ok(Self {
            class_type_id,
            date,
            start_time,
            end_time,
            instructor_id,
            payment,
            bookings,
            assigned_by,
            notes,
        })
    }
}

/// Where a weekly series gets its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeeklySource {
    /// Generate from an existing schedule template.
    FromTemplate {
        /// The template id.
        template_id: Uuid,
    },
    /// Create a new schedule template, then generate from it.
    NewSchedule {
        /// Day of week the new template repeats on.
        day_of_week: Weekday,
        /// Slot duration in minutes.
        duration_minutes: u32,
    },
}

/// A weekly series request.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyRequest {
    /// Template source.
    pub source: WeeklySource,
    /// Class type, required when creating a new template.
    pub class_type_id: Option<Uuid>,
    /// First date considered for the series.
    pub start_date: NaiveDate,
    /// Last date considered; defaults to December 31 of the start year.
    pub end_date: Option<NaiveDate>,
    /// Class start time.
    pub start_time: NaiveTime,
    /// Class end time.
    pub end_time: NaiveTime,
    /// The instructor.
    pub instructor_id: Uuid,
    /// Payment terms.
    pub payment: PaymentTerms,
    /// Linked bookings.
    pub bookings: BookingSelection,
    /// The operator creating the assignments.
    pub assigned_by: Uuid,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl WeeklyRequest {
    /// Creates a weekly request.
    ///
    /// # Errors
    ///
    /// Returns an error when the times are not ordered, or a new-schedule
    /// request carries no class type.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: WeeklySource,
        class_type_id: Option<Uuid>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        start_time: NaiveTime,
        end_time: NaiveTime,
        instructor_id: Uuid,
        payment: PaymentTerms,
        bookings: BookingSelection,
        assigned_by: Uuid,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        ordered_times(start_time, end_time)?;
        if matches!(source, WeeklySource::NewSchedule { .. }) && class_type_id.is_none() {
            return Err(DomainError::MissingField {
                field: "class_type_id",
            });
        }
        Ok(Self {
            source,
            class_type_id,
            start_date,
            end_date,
            start_time,
            end_time,
            instructor_id,
            payment,
            bookings,
            assigned_by,
            notes,
        })
    }
}

/// A calendar-month subscription request.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRequest {
    /// The package the subscription was sold against.
    pub package_id: Uuid,
    /// Subscription start date; its month bounds all generated dates.
    pub start_date: NaiveDate,
    /// How dates are picked.
    pub method: ScheduleMethod,
    /// The instructor.
    pub instructor_id: Uuid,
    /// Payment terms.
    pub payment: PaymentTerms,
    /// Linked bookings.
    pub bookings: BookingSelection,
    /// The operator creating the assignments.
    pub assigned_by: Uuid,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl MonthlyRequest {
    /// Creates a monthly request.
    ///
    /// # Errors
    ///
    /// Returns an error when the schedule method is invalid, or the method
    /// is the crash-course-only fixed cadence.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        package_id: Uuid,
        start_date: NaiveDate,
        method: ScheduleMethod,
        instructor_id: Uuid,
        payment: PaymentTerms,
        bookings: BookingSelection,
        assigned_by: Uuid,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        if matches!(method, ScheduleMethod::FixedCadence { .. }) {
            return Err(DomainError::MissingField {
                field: "monthly_assignment_method",
            });
        }
        method.validate()?;
        if let ScheduleMethod::WeeklyRecurrence { total_classes, .. } = &method {
            if *total_classes == 0 {
                return Err(DomainError::InvalidClassCount { count: 0 });
            }
        }
        Ok(Self {
            package_id,
            start_date,
            method,
            instructor_id,
            payment,
            bookings,
            assigned_by,
            notes,
        })
    }
}

/// A crash-course request.
#[derive(Debug, Clone, PartialEq)]
pub struct CrashCourseRequest {
    /// The crash package.
    pub package_id: Uuid,
    /// Course start date; with the package validity it bounds all dates.
    pub start_date: NaiveDate,
    /// How dates are picked.
    pub method: ScheduleMethod,
    /// The instructor.
    pub instructor_id: Uuid,
    /// Payment terms.
    pub payment: PaymentTerms,
    /// Linked bookings.
    pub bookings: BookingSelection,
    /// The operator creating the assignments.
    pub assigned_by: Uuid,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl CrashCourseRequest {
    /// Creates a crash-course request.
    ///
    /// # Errors
    ///
    /// Returns an error when the schedule method is invalid.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        package_id: Uuid,
        start_date: NaiveDate,
        method: ScheduleMethod,
        instructor_id: Uuid,
        payment: PaymentTerms,
        bookings: BookingSelection,
        assigned_by: Uuid,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        method.validate()?;
        Ok(Self {
            package_id,
            start_date,
            method,
            instructor_id,
            payment,
            bookings,
            assigned_by,
            notes,
        })
    }
}

/// A fixed class-count package request.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRequest {
    /// The package.
    pub package_id: Uuid,
    /// Start date.
    pub start_date: NaiveDate,
    /// How dates are picked.
    pub method: ScheduleMethod,
    /// The instructor.
    pub instructor_id: Uuid,
    /// Payment terms.
    pub payment: PaymentTerms,
    /// Linked bookings.
    pub bookings: BookingSelection,
    /// The operator creating the assignments.
    pub assigned_by: Uuid,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl PackageRequest {
    /// Creates a package request.
    ///
    /// # Errors
    ///
    /// Returns an error when the schedule method is invalid, or the method
    /// is the crash-course-only fixed cadence.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        package_id: Uuid,
        start_date: NaiveDate,
        method: ScheduleMethod,
        instructor_id: Uuid,
        payment: PaymentTerms,
        bookings: BookingSelection,
        assigned_by: Uuid,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        if matches!(method, ScheduleMethod::FixedCadence { .. }) {
            return Err(DomainError::MissingField {
                field: "monthly_assignment_method",
            });
        }
        method.validate()?;
        Ok(Self {
            package_id,
            start_date,
            method,
            instructor_id,
            payment,
            bookings,
            assigned_by,
            notes,
        })
    }
}

/// A creation request, one variant per assignment kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateAssignmentRequest {
    /// One-off session.
    Adhoc(AdhocRequest),
    /// Weekly template series.
    Weekly(WeeklyRequest),
    /// Calendar-month subscription.
    Monthly(MonthlyRequest),
    /// Crash course.
    CrashCourse(CrashCourseRequest),
    /// Fixed class-count package.
    Package(PackageRequest),
}

impl CreateAssignmentRequest {
    /// The assignment kind this request dispatches to.
    #[must_use]
    pub const fn kind(&self) -> AssignmentKind {
        match self {
            Self::Adhoc(_) => AssignmentKind::Adhoc,
            Self::Weekly(_) => AssignmentKind::Weekly,
            Self::Monthly(_) => AssignmentKind::Monthly,
            Self::CrashCourse(_) => AssignmentKind::CrashCourse,
            Self::Package(_) => AssignmentKind::Package,
        }
    }

    /// The cleaned booking codes the request links.
    #[must_use]
    pub fn booking_codes(&self) -> &[String] {
        &self.bookings().codes
    }

    /// The booking type shared by the selection.
    #[must_use]
    pub const fn booking_type(&self) -> BookingType {
        self.bookings().booking_type
    }

    const fn bookings(&self) -> &BookingSelection {
        match self {
            Self::Adhoc(request) => &request.bookings,
            Self::Weekly(request) => &request.bookings,
            Self::Monthly(request) => &request.bookings,
            Self::CrashCourse(request) => &request.bookings,
            Self::Package(request) => &request.bookings,
        }
    }
}
