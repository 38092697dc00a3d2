// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod billing;
mod conflict;
mod dates;
mod error;
mod payment;
mod recurrence;
mod shortfall;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use billing::{
    CURRENCY, DEFAULT_GRACE_PERIOD_DAYS, DEFAULT_TAX_RATE, INVOICE_PREFIX, InvoiceCalculation,
    InvoiceTerms, Proration, TaxedAmount, calculate_monthly_invoice, first_month_proration,
    invoice_number, is_first_billing_month, with_tax,
};
pub use conflict::{
    Conflict, ConflictKind, ProposedSlot, Resolution, Severity, analyze_slot,
    future_weekly_conflict, intervals_overlap, resolve, scan_assignments, scan_weekly_templates,
    timing_advisories,
};
pub use dates::{
    MonthBoundaries, STUDIO_TZ, format_date, format_time, is_date_in_month, minutes_to_time,
    month_boundaries, month_boundaries_for_key, month_key, next_month_key, parse_date, parse_time,
    remaining_days_in_month, studio_today, time_to_minutes, week_start_sunday, weekday_from_index,
    weekday_index,
};
pub use error::DomainError;
pub use payment::{calculate_payment_amount, classes_per_month};
pub use recurrence::{
    Cadence, FitReport, MAX_GENERATED_OCCURRENCES, ManualSelection, ValidityReport,
    check_validity_dates, crash_course_dates, fits_validity_window, generate_weekly_recurrence,
    generate_weekly_series, validate_manual_selections, validate_selections_within_month,
    validity_window,
};
pub use shortfall::{
    AdjustmentRecommendation, MonthlyPlan, WeekdayOccurrence, build_monthly_plan,
    find_weekday_occurrences, recommend_adjustments, shortfall,
};
pub use types::{
    AccessStatus, Assignment, AssignmentBooking, AssignmentKind, Booking, BookingStatus,
    BookingType, CONTAINER_CODE_PREFIX, ClassPackage, ClassStatus, Container, CourseType,
    InstructorStatus, PaymentStatus, PaymentType, ScheduleType, WeeklySchedule,
};
pub use validation::{
    allows_multiple_bookings, clean_booking_codes, is_valid_date, is_valid_time, is_valid_uuid,
    validate_booking_cardinality,
};
