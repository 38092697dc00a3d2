// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Requests arrive as the flat form payload the dashboard submits (string
//! ids, numeric weekday indices, an `assignment_type` discriminator) and
//! are translated into typed core requests by the handlers.

use serde::{Deserialize, Serialize};

/// One manually chosen class slot, as submitted by the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualSelectionDto {
    /// Class date (`YYYY-MM-DD`).
    pub date: String,
    /// Class start time (`HH:MM`).
    pub start_time: String,
    /// Class end time (`HH:MM`).
    pub end_time: String,
}

/// The flat creation payload submitted by the assignment form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignmentApiRequest {
    /// Assignment kind discriminator: `adhoc`, `weekly`, `monthly`,
    /// `crash_course`, or `package`.
    pub assignment_type: String,
    /// External booking codes to link.
    #[serde(default)]
    pub booking_ids: Vec<String>,
    /// Booking type of the linked bookings; defaults per assignment kind.
    #[serde(default)]
    pub booking_type: Option<String>,
    /// Class type id (adhoc and new weekly schedules).
    #[serde(default)]
    pub class_type_id: Option<String>,
    /// Package id (monthly, crash course, package).
    #[serde(default)]
    pub package_id: Option<String>,
    /// The instructor id.
    pub instructor_id: String,
    /// The operator creating the assignments.
    pub assigned_by: String,
    /// Session date (adhoc).
    #[serde(default)]
    pub date: Option<String>,
    /// Series/subscription start date.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Series end date (weekly).
    #[serde(default)]
    pub end_date: Option<String>,
    /// Class start time (`HH:MM`).
    #[serde(default)]
    pub start_time: Option<String>,
    /// Class end time (`HH:MM`).
    #[serde(default)]
    pub end_time: Option<String>,
    /// Payout policy.
    pub payment_type: String,
    /// Payment amount as entered.
    pub payment_amount: f64,
    /// Date-selection method: `weekly_recurrence`, `manual_calendar`, or
    /// `fixed_cadence` (crash courses only).
    #[serde(default)]
    pub monthly_assignment_method: Option<String>,
    /// Selected weekdays, 0 = Sunday through 6 = Saturday.
    #[serde(default)]
    pub weekly_days: Option<Vec<u8>>,
    /// Guaranteed class count (monthly recurrence).
    #[serde(default)]
    pub total_classes: Option<u32>,
    /// Explicit slot selections (manual calendar).
    #[serde(default)]
    pub manual_selections: Option<Vec<ManualSelectionDto>>,
    /// Existing weekly template to generate from.
    #[serde(default)]
    pub selected_template_id: Option<String>,
    /// Day of week for a new weekly template, 0 = Sunday.
    #[serde(default)]
    pub day_of_week: Option<u8>,
    /// Duration for a new weekly template, minutes.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Cadence for the crash-course fallback: `daily` or `weekly`.
    #[serde(default)]
    pub cadence: Option<String>,
    /// Students attending, for per-student payout policies.
    #[serde(default)]
    pub student_count: Option<u32>,
    /// Free-form operator notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// One degraded side effect, reported alongside a successful creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningDto {
    /// The step that degraded.
    pub step: String,
    /// What happened.
    pub message: String,
}

/// The result of a creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignmentResponse {
    /// Whether the assignments were created.
    pub success: bool,
    /// How many assignment rows were created.
    pub count: usize,
    /// Side effects that degraded along the way.
    pub warnings: Vec<WarningDto>,
}

/// A request to update one assignment's class status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAssignmentStatusRequest {
    /// The new status: `scheduled`, `completed`, `cancelled`, or
    /// `rescheduled`.
    pub status: String,
}

/// Acknowledgement of a status update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAssignmentStatusResponse {
    /// Whether the update was applied.
    pub success: bool,
}

/// An advisory conflict check for a proposed slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckRequest {
    /// The instructor id.
    pub instructor_id: String,
    /// The proposed date (`YYYY-MM-DD`).
    pub date: String,
    /// The proposed start time (`HH:MM`).
    pub start_time: String,
    /// The proposed end time (`HH:MM`).
    pub end_time: String,
    /// Optional class type to narrow the future-weekly lookup.
    #[serde(default)]
    pub class_type_id: Option<String>,
}

/// One detected conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictDto {
    /// The conflict kind: `instructor`, `timing`, `resource`, `capacity`.
    pub kind: String,
    /// The severity: `warning` or `error`.
    pub severity: String,
    /// Human-readable description.
    pub message: String,
    /// Optional remediation suggestions.
    pub suggestions: Vec<String>,
}

/// The result of an advisory conflict check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    /// Whether an error-severity conflict blocks submission.
    pub blocked: bool,
    /// Every detected conflict, most severe first.
    pub conflicts: Vec<ConflictDto>,
}

/// A shortfall analysis request for one instructor and month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortfallRequest {
    /// The instructor id.
    pub instructor_id: String,
    /// The calendar month (`YYYY-MM`).
    pub calendar_month: String,
    /// The guaranteed class count.
    pub required_classes: u32,
    /// The preferred weekdays, 0 = Sunday through 6 = Saturday.
    #[serde(default)]
    pub preferred_days: Vec<u8>,
}

/// A recommended alternate date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationDto {
    /// The recommended date (`YYYY-MM-DD`).
    pub date: String,
    /// Its weekday, 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    /// Why the adjustment is needed.
    pub reason: String,
}

/// The result of a shortfall analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortfallResponse {
    /// Regular scheduled classes already persisted.
    pub scheduled: usize,
    /// Adjustment classes already persisted.
    pub adjustments: usize,
    /// Negative = shortage, positive = excess, zero = exact.
    pub shortfall: i64,
    /// Whether the month is short of its guaranteed count.
    pub has_shortfall: bool,
    /// Candidate alternate dates covering the shortage.
    pub recommendations: Vec<RecommendationDto>,
}

/// A request to create one adjustment class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentApiRequest {
    /// The instructor id.
    pub instructor_id: String,
    /// The package the adjustment belongs to.
    pub package_id: String,
    /// The month the adjustment must stay inside (`YYYY-MM`).
    pub calendar_month: String,
    /// The adjustment date (`YYYY-MM-DD`).
    pub date: String,
    /// Class start time (`HH:MM`).
    pub start_time: String,
    /// Class end time (`HH:MM`).
    pub end_time: String,
    /// Why the adjustment is needed.
    pub adjustment_reason: String,
    /// External booking codes to link.
    #[serde(default)]
    pub booking_ids: Vec<String>,
    /// Booking type of the linked bookings.
    #[serde(default)]
    pub booking_type: Option<String>,
    /// Per-class payout.
    pub payment_amount: f64,
    /// The operator creating the adjustment.
    pub assigned_by: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Acknowledgement of a created adjustment class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentResponse {
    /// Whether the adjustment was created.
    pub success: bool,
    /// The created assignment id.
    pub assignment_id: String,
    /// Side effects that degraded along the way.
    pub warnings: Vec<WarningDto>,
}

/// A request to bulk-fill a month's shortfall from recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillShortfallRequest {
    /// The instructor id.
    pub instructor_id: String,
    /// The package the adjustments belong to.
    pub package_id: String,
    /// The calendar month (`YYYY-MM`).
    pub calendar_month: String,
    /// The guaranteed class count.
    pub required_classes: u32,
    /// The preferred weekdays, 0 = Sunday through 6 = Saturday.
    pub preferred_days: Vec<u8>,
    /// External booking codes to link.
    #[serde(default)]
    pub booking_ids: Vec<String>,
    /// Booking type of the linked bookings.
    #[serde(default)]
    pub booking_type: Option<String>,
    /// Per-class payout.
    pub payment_amount: f64,
    /// Class start time (`HH:MM`).
    pub start_time: String,
    /// Class end time (`HH:MM`).
    pub end_time: String,
    /// The operator creating the adjustments.
    pub assigned_by: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// The result of bulk-filling a shortfall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillShortfallResponse {
    /// Whether at least one adjustment was created.
    pub success: bool,
    /// Adjustment classes created.
    pub created: usize,
    /// Recommendations that failed.
    pub failed: usize,
    /// One message per failure.
    pub errors: Vec<String>,
}
