// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Prefix for generated container codes.
pub const CONTAINER_CODE_PREFIX: &str = "CT";

/// How a booking was sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    /// One client, one booking.
    Individual,
    /// A corporate account booking for its employees.
    Corporate,
    /// A privately organized group.
    PrivateGroup,
    /// An open, publicly joinable group.
    PublicGroup,
}

impl BookingType {
    /// Returns the wire representation of this booking type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Corporate => "corporate",
            Self::PrivateGroup => "private_group",
            Self::PublicGroup => "public_group",
        }
    }
}

impl FromStr for BookingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(Self::Individual),
            "corporate" => Ok(Self::Corporate),
            "private_group" => Ok(Self::PrivateGroup),
            "public_group" => Ok(Self::PublicGroup),
            _ => Err(DomainError::InvalidIdentifier {
                field: "booking_type",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for BookingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created, awaiting confirmation.
    Pending,
    /// Confirmed by the studio.
    Confirmed,
    /// Linked to at least one assignment.
    Completed,
    /// Cancelled by the client or the studio.
    Cancelled,
}

impl BookingStatus {
    /// Returns the wire representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Payment-driven access state of a booking.
///
/// Transitions happen in the payment escalation pipeline, outside this
/// system; scheduling only reads the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    /// Payments current; scheduling allowed.
    Active,
    /// Payment approaching overdue; scheduling allowed with a warning.
    OverdueGrace,
    /// Payment overdue; scheduling blocked.
    OverdueLocked,
}

impl AccessStatus {
    /// Returns the wire representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OverdueGrace => "overdue_grace",
            Self::OverdueLocked => "overdue_locked",
        }
    }
}

impl FromStr for AccessStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "overdue_grace" => Ok(Self::OverdueGrace),
            "overdue_locked" => Ok(Self::OverdueLocked),
            _ => Err(DomainError::InvalidIdentifier {
                field: "access_status",
                value: s.to_string(),
            }),
        }
    }
}

/// The schedule family an assignment row belongs to.
///
/// Package assignments reuse `monthly`; crash courses use `crash`. Both
/// values match the store's column constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    /// A single one-off session.
    Adhoc,
    /// Generated from a weekly template.
    Weekly,
    /// Calendar-month-bounded subscription class.
    Monthly,
    /// Crash course bounded by package validity.
    Crash,
}

impl ScheduleType {
    /// Returns the wire representation of this schedule type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Adhoc => "adhoc",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Crash => "crash",
        }
    }
}

/// The five creation paths the orchestrator dispatches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    /// One-off session.
    Adhoc,
    /// Weekly template series.
    Weekly,
    /// Monthly subscription.
    Monthly,
    /// Crash course.
    CrashCourse,
    /// Fixed class-count package.
    Package,
}

impl AssignmentKind {
    /// Returns the form-facing representation of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Adhoc => "adhoc",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::CrashCourse => "crash_course",
            Self::Package => "package",
        }
    }

    /// Returns the schedule type stamped on rows created by this path.
    #[must_use]
    pub const fn schedule_type(&self) -> ScheduleType {
        match self {
            Self::Adhoc => ScheduleType::Adhoc,
            Self::Weekly => ScheduleType::Weekly,
            // Package assignments are stored as monthly rows.
            Self::Monthly | Self::Package => ScheduleType::Monthly,
            Self::CrashCourse => ScheduleType::Crash,
        }
    }
}

impl FromStr for AssignmentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adhoc" => Ok(Self::Adhoc),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "crash_course" => Ok(Self::CrashCourse),
            "package" => Ok(Self::Package),
            _ => Err(DomainError::InvalidIdentifier {
                field: "assignment_type",
                value: s.to_string(),
            }),
        }
    }
}

/// Status of one scheduled class occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassStatus {
    /// On the calendar, not yet held.
    Scheduled,
    /// Held.
    Completed,
    /// Cancelled.
    Cancelled,
    /// Moved to another slot.
    Rescheduled,
}

impl ClassStatus {
    /// Returns the wire representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Rescheduled => "rescheduled",
        }
    }
}

impl FromStr for ClassStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "rescheduled" => Ok(Self::Rescheduled),
            _ => Err(DomainError::InvalidIdentifier {
                field: "class_status",
                value: s.to_string(),
            }),
        }
    }
}

/// Instructor payout state for an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Not yet paid out.
    Pending,
    /// Paid out.
    Paid,
}

impl PaymentStatus {
    /// Returns the wire representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

/// Instructor acknowledgement state for an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructorStatus {
    /// Awaiting instructor confirmation.
    Pending,
    /// Confirmed by the instructor.
    Confirmed,
    /// Declined by the instructor.
    Declined,
}

impl InstructorStatus {
    /// Returns the wire representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Declined => "declined",
        }
    }
}

/// How an entered payment amount translates to a per-class payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Amount per class, as entered.
    PerClass,
    /// Amount per student per class.
    PerStudentPerClass,
    /// Monthly amount per member.
    PerMember,
    /// Fixed monthly rate.
    Monthly,
    /// Total amount for all students per class.
    PerClassTotal,
    /// One amount covering the whole duration.
    TotalDuration,
}

impl FromStr for PaymentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per_class" => Ok(Self::PerClass),
            "per_student_per_class" => Ok(Self::PerStudentPerClass),
            "per_member" => Ok(Self::PerMember),
            "monthly" => Ok(Self::Monthly),
            "per_class_total" => Ok(Self::PerClassTotal),
            "total_duration" => Ok(Self::TotalDuration),
            _ => Err(DomainError::InvalidIdentifier {
                field: "payment_type",
                value: s.to_string(),
            }),
        }
    }
}

/// Course family of a purchasable package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseType {
    /// Ongoing regular classes.
    Regular,
    /// Fixed-window crash course.
    Crash,
}

/// A client's request for class time.
///
/// The external `booking_code` (`SH-YYYYMMDD-NNNN`) is how bookings are
/// referenced across the scheduling flow; the internal row id stays in the
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// External booking code.
    pub booking_code: String,
    /// Internal id of the client user, when known.
    pub user_id: Option<Uuid>,
    /// Client display name.
    pub client_name: String,
    /// Client email, when captured.
    pub client_email: Option<String>,
    /// How the booking was sold.
    pub booking_type: BookingType,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Payment-driven access state.
    pub access_status: AccessStatus,
    /// Whether monthly billing applies to this booking.
    pub is_recurring: bool,
    /// Anchor date for the monthly billing cycle.
    pub billing_cycle_anchor: Option<NaiveDate>,
    /// Linked package, when the booking was sold against one.
    pub package_id: Option<Uuid>,
}

/// A purchasable class bundle. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPackage {
    /// Package id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Number of classes included.
    pub class_count: u32,
    /// Package price.
    pub price: f64,
    /// Course family.
    pub course_type: CourseType,
    /// Validity window in days, when bounded.
    pub validity_days: Option<u32>,
    /// Free-text duration label (e.g. "4 weeks"), kept for legacy packages
    /// that predate the `validity_days` column.
    pub duration_label: Option<String>,
}

impl ClassPackage {
    /// Returns the validity window in days, falling back to the legacy
    /// duration label ("N days"/"N weeks"/"N months") when the column is
    /// unset. Months approximate to 30 days.
    #[must_use]
    pub fn effective_validity_days(&self) -> Option<u32> {
        if let Some(days) = self.validity_days {
            if days > 0 {
                return Some(days);
            }
        }
        let label = self.duration_label.as_deref()?;
        let mut parts = label.split_whitespace();
        let number: u32 = parts.next()?.parse().ok()?;
        let unit = parts.next()?.to_lowercase();
        if parts.next().is_some() {
            return None;
        }
        if unit.starts_with("day") {
            Some(number)
        } else if unit.starts_with("week") {
            Some(number * 7)
        } else if unit.starts_with("month") {
            Some(number * 30)
        } else {
            None
        }
    }
}

/// Groups the assignments of one booking + month combination.
///
/// Created lazily when an assignment needs one; never deleted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Container id, `None` before persistence.
    pub id: Option<Uuid>,
    /// Generated container code.
    pub container_code: String,
    /// Human-readable name shown in the dashboard.
    pub display_name: String,
    /// Container family, mirroring the booking type.
    pub container_type: BookingType,
    /// Instructor the grouped classes belong to.
    pub instructor_id: Option<Uuid>,
    /// Package the grouped classes were sold against.
    pub package_id: Option<Uuid>,
    /// Maximum bookings the container admits.
    pub max_booking_count: u32,
    /// Whether the container is active.
    pub is_active: bool,
}

impl Container {
    /// Builds the deterministic container code for a booking + month pair.
    #[must_use]
    pub fn code(booking_code: &str, month_key: &str) -> String {
        format!("{CONTAINER_CODE_PREFIX}-{booking_code}-{month_key}")
    }
}

/// One concrete scheduled class occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assignment id, `None` before persistence.
    pub id: Option<Uuid>,
    /// Class type, required for adhoc assignments.
    pub class_type_id: Option<Uuid>,
    /// Package, required for package-based assignments.
    pub package_id: Option<Uuid>,
    /// Weekly template this row was generated from, when any.
    pub scheduled_class_id: Option<Uuid>,
    /// Grouping container, attached after creation.
    pub container_id: Option<Uuid>,
    /// Class date.
    pub date: NaiveDate,
    /// Class start time.
    pub start_time: NaiveTime,
    /// Class end time.
    pub end_time: NaiveTime,
    /// Instructor delivering the class.
    pub instructor_id: Uuid,
    /// Per-class instructor payout.
    pub payment_amount: f64,
    /// Payout policy the amount was derived under.
    pub payment_type: PaymentType,
    /// Schedule family.
    pub schedule_type: ScheduleType,
    /// Booking type of the linked bookings.
    pub booking_type: BookingType,
    /// Occurrence status.
    pub class_status: ClassStatus,
    /// Payout state.
    pub payment_status: PaymentStatus,
    /// Instructor acknowledgement state.
    pub instructor_status: InstructorStatus,
    /// Operator who created the assignment.
    pub assigned_by: Uuid,
    /// Calendar month key (`YYYY-MM`), monthly/package rows only.
    pub calendar_month: Option<String>,
    /// Whether this row fills a calendar shortfall.
    pub is_adjustment: bool,
    /// Why the adjustment was needed, adjustment rows only.
    pub adjustment_reason: Option<String>,
    /// Free-form operator notes.
    pub notes: Option<String>,
}

impl Assignment {
    /// Creates a freshly scheduled assignment with the standard initial
    /// statuses (`scheduled` / payout `pending` / instructor `pending`).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn scheduled(
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        instructor_id: Uuid,
        payment_amount: f64,
        payment_type: PaymentType,
        schedule_type: ScheduleType,
        booking_type: BookingType,
        assigned_by: Uuid,
    ) -> Self {
        Self {
            id: None,
            class_type_id: None,
            package_id: None,
            scheduled_class_id: None,
            container_id: None,
            date,
            start_time,
            end_time,
            instructor_id,
            payment_amount,
            payment_type,
            schedule_type,
            booking_type,
            class_status: ClassStatus::Scheduled,
            payment_status: PaymentStatus::Pending,
            instructor_status: InstructorStatus::Pending,
            assigned_by,
            calendar_month: None,
            is_adjustment: false,
            adjustment_reason: None,
            notes: None,
        }
    }

    /// Attaches a class type.
    #[must_use]
    pub const fn with_class_type(mut self, class_type_id: Uuid) -> Self {
        self.class_type_id = Some(class_type_id);
        self
    }

    /// Attaches a package.
    #[must_use]
    pub const fn with_package(mut self, package_id: Uuid) -> Self {
        self.package_id = Some(package_id);
        self
    }

    /// Attaches the weekly template the row was generated from.
    #[must_use]
    pub const fn with_template(mut self, scheduled_class_id: Uuid) -> Self {
        self.scheduled_class_id = Some(scheduled_class_id);
        self
    }

    /// Stamps the calendar month key.
    #[must_use]
    pub fn with_calendar_month(mut self, month_key: &str) -> Self {
        self.calendar_month = Some(month_key.to_string());
        self
    }

    /// Attaches operator notes when present.
    #[must_use]
    pub fn with_notes(mut self, notes: Option<&str>) -> Self {
        self.notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(ToString::to_string);
        self
    }

    /// Marks the row as a shortfall adjustment with its reason.
    #[must_use]
    pub fn as_adjustment(mut self, reason: &str) -> Self {
        self.is_adjustment = true;
        self.adjustment_reason = Some(reason.to_string());
        self
    }
}

/// Join row linking one assignment to one booking.
///
/// Each (`assignment_id`, `booking_code`) pair is unique in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentBooking {
    /// The linked assignment.
    pub assignment_id: Uuid,
    /// The linked booking's external code.
    pub booking_code: String,
    /// The container the link belongs to, when resolved.
    pub container_id: Option<Uuid>,
}

/// A weekly schedule template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    /// Template id, `None` before persistence.
    pub id: Option<Uuid>,
    /// Class type taught in this slot.
    pub class_type_id: Option<Uuid>,
    /// Day of week the slot repeats on.
    pub day_of_week: Weekday,
    /// Slot start time.
    pub start_time: NaiveTime,
    /// Slot end time.
    pub end_time: NaiveTime,
    /// Assigned instructor, when any.
    pub instructor_id: Option<Uuid>,
    /// Slot duration in minutes.
    pub duration_minutes: u32,
    /// Capacity of the slot.
    pub max_participants: u32,
    /// Whether the template is active.
    pub is_active: bool,
    /// Free-form notes.
    pub notes: Option<String>,
}
