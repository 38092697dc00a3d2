// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store-backed shortfall analysis and adjustment-class creation.
//!
//! Analysis compares what is already persisted for an instructor and month
//! against the guaranteed class count and, on a shortage, asks the domain
//! planner for alternate dates. Creating adjustment rows is always a
//! separate, operator-invoked operation; the creation paths only log the
//! analysis.

use crate::error::{CoreError, SideEffectStep, SideEffectWarning};
use chrono::{NaiveDate, NaiveTime, Weekday};
use shala_domain::{
    AdjustmentRecommendation, Assignment, BookingType, DomainError, PaymentType, ScheduleType,
    find_weekday_occurrences, is_date_in_month, month_boundaries_for_key, recommend_adjustments,
    shortfall,
};
use shala_store::StoreClient;
use tracing::warn;
use uuid::Uuid;

/// How an instructor's month stands against its guaranteed class count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyShortfallAnalysis {
    /// The analyzed instructor.
    pub instructor_id: Uuid,
    /// The analyzed month key (`YYYY-MM`).
    pub month_key: String,
    /// The guaranteed class count.
    pub required: u32,
    /// Regular scheduled classes already persisted.
    pub scheduled: usize,
    /// Adjustment classes already persisted.
    pub adjustments: usize,
    /// Negative = shortage, positive = excess, zero = exact.
    pub shortfall: i64,
    /// Candidate alternate dates covering the shortage.
    pub recommendations: Vec<AdjustmentRecommendation>,
    /// The preferred weekday pattern used for recommendations.
    pub preferred: Vec<Weekday>,
}

impl MonthlyShortfallAnalysis {
    /// Whether the month is short of its guaranteed count.
    #[must_use]
    pub const fn has_shortfall(&self) -> bool {
        self.shortfall < 0
    }
}

/// Counts an instructor's persisted monthly classes against the guarantee.
///
/// # Errors
///
/// Returns an error when the month rows cannot be fetched.
pub async fn analyze<S: StoreClient>(
    store: &S,
    instructor_id: Uuid,
    month_key: &str,
    required: u32,
) -> Result<MonthlyShortfallAnalysis, CoreError> {
    let rows = store.month_assignments(instructor_id, month_key).await?;
    let adjustments = rows.iter().filter(|row| row.is_adjustment).count();
    let scheduled = rows.len() - adjustments;
    let total = scheduled + adjustments;

    Ok(MonthlyShortfallAnalysis {
        instructor_id,
        month_key: month_key.to_string(),
        required,
        scheduled,
        adjustments,
        shortfall: shortfall(required, total),
        recommendations: Vec::new(),
        preferred: Vec::new(),
    })
}

/// Shortfall analysis plus adjustment recommendations for a weekday
/// pattern.
///
/// # Errors
///
/// Returns an error when the month rows cannot be fetched or the month key
/// is malformed.
pub async fn analyze_with_recommendations<S: StoreClient>(
    store: &S,
    instructor_id: Uuid,
    month_key: &str,
    required: u32,
    preferred: &[Weekday],
) -> Result<MonthlyShortfallAnalysis, CoreError> {
    let mut analysis = analyze(store, instructor_id, month_key, required).await?;
    analysis.preferred = preferred.to_vec();

    if analysis.has_shortfall() && !preferred.is_empty() {
        let bounds = month_boundaries_for_key(month_key)?;
        let occurrences = find_weekday_occurrences(&bounds, preferred, None);
        // Adjustments already placed count toward the guarantee.
        let remaining = required.saturating_sub(u32::try_from(analysis.adjustments).unwrap_or(0));
        let gap = shortfall(remaining, occurrences.len());
        if gap < 0 {
            analysis.recommendations =
                recommend_adjustments(&bounds, preferred, &occurrences, gap, None);
        }
    }

    Ok(analysis)
}

/// A request to create one adjustment class.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentRequest {
    /// The instructor.
    pub instructor_id: Uuid,
    /// The package the adjustment belongs to.
    pub package_id: Uuid,
    /// The month the adjustment must stay inside (`YYYY-MM`).
    pub month_key: String,
    /// The adjustment date.
    pub date: NaiveDate,
    /// Class start time.
    pub start_time: NaiveTime,
    /// Class end time.
    pub end_time: NaiveTime,
    /// Why the adjustment is needed.
    pub reason: String,
    /// Bookings to link.
    pub booking_codes: Vec<String>,
    /// Booking type of the linked bookings.
    pub booking_type: BookingType,
    /// Per-class payout.
    pub payment_amount: f64,
    /// The operator creating the adjustment.
    pub assigned_by: Uuid,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Creates one adjustment class.
///
/// The row is stamped `is_adjustment` with its reason; booking links are
/// best-effort and degrade to warnings.
///
/// # Errors
///
/// Returns an error if:
/// - the date falls outside the calendar month
/// - the reason is empty
/// - an identical adjustment already exists
/// - the insert fails
pub async fn create_adjustment<S: StoreClient>(
    store: &S,
    request: &AdjustmentRequest,
) -> Result<(Uuid, Vec<SideEffectWarning>), CoreError> {
    let bounds = month_boundaries_for_key(&request.month_key)?;
    if !is_date_in_month(request.date, &bounds) {
        return Err(CoreError::Domain(DomainError::CalendarMonthViolation {
            date: request.date,
            month_start: bounds.start,
            month_end: bounds.end,
        }));
    }
    if request.reason.trim().is_empty() {
        return Err(CoreError::Domain(DomainError::MissingField {
            field: "adjustment_reason",
        }));
    }
    if request.start_time >= request.end_time {
        return Err(CoreError::Domain(DomainError::EndNotAfterStart {
            start: request.start_time,
            end: request.end_time,
        }));
    }
    if store
        .adjustment_exists(request.instructor_id, request.date, request.start_time)
        .await?
    {
        return Err(CoreError::DuplicateAdjustment {
            date: request.date,
            start_time: request.start_time,
        });
    }

    let row = Assignment::scheduled(
        request.date,
        request.start_time,
        request.end_time,
        request.instructor_id,
        request.payment_amount,
        PaymentType::PerClass,
        ScheduleType::Monthly,
        request.booking_type,
        request.assigned_by,
    )
    .with_package(request.package_id)
    .with_calendar_month(&bounds.month_key)
    .with_notes(request.notes.as_deref())
    .as_adjustment(&request.reason);

    let ids = store.insert_assignments(std::slice::from_ref(&row)).await?;
    let assignment_id = ids.first().copied().ok_or_else(|| {
        CoreError::Store(shala_store::StoreError::Decode(String::from(
            "adjustment insert returned no id",
        )))
    })?;

    let mut warnings = Vec::new();
    let links: Vec<shala_domain::AssignmentBooking> = request
        .booking_codes
        .iter()
        .filter(|code| !code.trim().is_empty())
        .map(|code| shala_domain::AssignmentBooking {
            assignment_id,
            booking_code: code.trim().to_string(),
            container_id: None,
        })
        .collect();
    if !links.is_empty() {
        if let Err(err) = store.insert_assignment_bookings(&links).await {
            warn!(error = %err, "failed to link bookings to adjustment class");
            warnings.push(SideEffectWarning::new(
                SideEffectStep::LinkBookings,
                format!("adjustment created but booking links failed: {err}"),
            ));
        }
    }

    Ok((assignment_id, warnings))
}

/// The result of bulk-filling a shortfall from recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FillOutcome {
    /// Adjustment classes created.
    pub created: usize,
    /// Recommendations that failed.
    pub failed: usize,
    /// One message per failure.
    pub errors: Vec<String>,
}

/// Creates adjustment classes for each recommended date.
///
/// Individual failures are recorded and do not stop the remaining
/// recommendations.
pub async fn fill_shortfall<S: StoreClient>(
    store: &S,
    base: &AdjustmentRequest,
    recommendations: &[AdjustmentRecommendation],
) -> FillOutcome {
    let mut outcome = FillOutcome::default();
    for recommendation in recommendations {
        let request = AdjustmentRequest {
            date: recommendation.date,
            reason: recommendation.reason.clone(),
            ..base.clone()
        };
        match create_adjustment(store, &request).await {
            Ok(_) => outcome.created += 1,
            Err(err) => {
                outcome.failed += 1;
                outcome
                    .errors
                    .push(format!("{}: {err}", recommendation.date));
            }
        }
    }
    outcome
}
