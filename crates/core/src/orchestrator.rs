// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The assignment creation orchestrator.
//!
//! One sequential pass per request:
//! validate booking presence → check booking access → dispatch by kind →
//! generate → persist the batch → link bookings → side effects.
//!
//! Validation and boundary errors abort before any write. Once the batch
//! insert has committed, side-effect failures degrade to warnings in the
//! outcome rather than unwinding the rows — an assignment that exists with
//! missing bookkeeping beats one that silently vanished. There is no
//! optimistic-concurrency check before the insert; two operators can both
//! pass the conflict gate and double-book, an accepted race for a
//! low-concurrency admin tool.

use crate::conflicts;
use crate::error::{CoreError, CreationOutcome, SideEffectStep, SideEffectWarning};
use crate::invoice;
use crate::request::{
    AdhocRequest, CreateAssignmentRequest, CrashCourseRequest, MonthlyRequest, PackageRequest,
    ScheduleMethod, WeeklyRequest, WeeklySource,
};
use crate::shortfall::{
    AdjustmentRequest, FillOutcome, MonthlyShortfallAnalysis, analyze_with_recommendations,
    create_adjustment, fill_shortfall,
};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use shala_domain::{
    AccessStatus, Assignment, AssignmentBooking, Booking, BookingStatus, ClassPackage, ClassStatus,
    Conflict, Container, DomainError, ManualSelection, MonthBoundaries, ProposedSlot, Resolution,
    ScheduleType, WeeklySchedule, calculate_payment_amount, check_validity_dates,
    crash_course_dates, generate_weekly_recurrence, generate_weekly_series, is_date_in_month,
    month_boundaries, month_key, studio_today, validate_booking_cardinality,
    validate_selections_within_month, validity_window,
};
use shala_store::StoreClient;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

/// The top-level assignment creation service.
///
/// The store client is injected at construction so tests can substitute an
/// in-memory double.
pub struct AssignmentService<S> {
    store: S,
}

impl<S: StoreClient> AssignmentService<S> {
    /// Creates a service over the given store client.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store client.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Creates assignments for a request.
    ///
    /// `packages` is the caller's already-loaded package list; packages not
    /// present there are fetched from the store. `student_count` below 1 is
    /// treated as 1. The cancellation token is checked between store
    /// round-trips; cancelling discards un-persisted work.
    ///
    /// # Errors
    ///
    /// Returns an error when validation fails, a booking is missing or
    /// locked, a boundary is violated, a blocking conflict exists, or a
    /// required store write fails.
    pub async fn create_assignment(
        &self,
        request: CreateAssignmentRequest,
        packages: &[ClassPackage],
        student_count: u32,
        cancel: &CancellationToken,
    ) -> Result<CreationOutcome, CoreError> {
        let codes: Vec<String> = request.booking_codes().to_vec();
        if codes.is_empty() {
            return Err(CoreError::BookingRequired);
        }
        validate_booking_cardinality(codes.len(), request.kind(), request.booking_type())?;

        ensure_live(cancel)?;
        let (bookings, access_warnings) = self.check_booking_access(&codes).await?;
        ensure_live(cancel)?;

        let students = student_count.max(1);
        let mut outcome = match request {
            CreateAssignmentRequest::Adhoc(request) => {
                self.create_adhoc(&request, &bookings, students, cancel).await?
            }
            CreateAssignmentRequest::Weekly(request) => {
                self.create_weekly(&request, students, cancel).await?
            }
            CreateAssignmentRequest::Monthly(request) => {
                self.create_monthly(&request, students, cancel).await?
            }
            CreateAssignmentRequest::CrashCourse(request) => {
                self.create_crash_course(&request, packages, students, cancel)
                    .await?
            }
            CreateAssignmentRequest::Package(request) => {
                self.create_package(&request, packages, students, cancel).await?
            }
        };
        let mut warnings = access_warnings;
        warnings.append(&mut outcome.warnings);
        outcome.warnings = warnings;
        Ok(outcome)
    }

    /// Updates one assignment's class status.
    ///
    /// # Errors
    ///
    /// Returns an error when the store update fails.
    pub async fn update_assignment_status(
        &self,
        assignment_id: Uuid,
        status: ClassStatus,
    ) -> Result<(), CoreError> {
        self.store
            .update_assignment_status(assignment_id, status)
            .await?;
        info!(assignment = %assignment_id, status = status.as_str(), "assignment status updated");
        Ok(())
    }

    /// Updates one booking's lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns an error when the store update fails.
    pub async fn update_booking_status(
        &self,
        booking_code: &str,
        status: BookingStatus,
    ) -> Result<(), CoreError> {
        self.store.update_booking_status(booking_code, status).await?;
        Ok(())
    }

    /// Collects conflicts for a proposed slot (the advisory form check).
    ///
    /// # Errors
    ///
    /// Returns an error when the blocking scan's context rows cannot be
    /// fetched.
    pub async fn check_conflicts(
        &self,
        proposed: &ProposedSlot,
        class_type_id: Option<Uuid>,
    ) -> Result<Vec<Conflict>, CoreError> {
        conflicts::check_slot(&self.store, proposed, class_type_id).await
    }

    /// Analyzes an instructor's month against its guaranteed class count.
    ///
    /// # Errors
    ///
    /// Returns an error when the month rows cannot be fetched or the month
    /// key is malformed.
    pub async fn analyze_shortfall(
        &self,
        instructor_id: Uuid,
        calendar_month: &str,
        required: u32,
        preferred: &[Weekday],
    ) -> Result<MonthlyShortfallAnalysis, CoreError> {
        analyze_with_recommendations(&self.store, instructor_id, calendar_month, required, preferred)
            .await
    }

    /// Creates one adjustment class.
    ///
    /// # Errors
    ///
    /// See [`create_adjustment`].
    pub async fn create_adjustment_class(
        &self,
        request: &AdjustmentRequest,
    ) -> Result<(Uuid, Vec<SideEffectWarning>), CoreError> {
        create_adjustment(&self.store, request).await
    }

    /// Bulk-creates adjustment classes from recommended dates.
    pub async fn fill_monthly_shortfall(
        &self,
        base: &AdjustmentRequest,
        recommendations: &[shala_domain::AdjustmentRecommendation],
    ) -> FillOutcome {
        fill_shortfall(&self.store, base, recommendations).await
    }

    // -----------------------------------------------------------------
    // Access check
    // -----------------------------------------------------------------

    async fn check_booking_access(
        &self,
        codes: &[String],
    ) -> Result<(Vec<Booking>, Vec<SideEffectWarning>), CoreError> {
        let bookings = self.store.fetch_bookings(codes).await?;
        for code in codes {
            if !bookings.iter().any(|booking| &booking.booking_code == code) {
                return Err(CoreError::BookingNotFound { code: code.clone() });
            }
        }
        if bookings
            .iter()
            .any(|booking| booking.access_status == AccessStatus::OverdueLocked)
        {
            return Err(CoreError::AccessDenied {
                reason: String::from(
                    "Payment is overdue. Please clear outstanding dues before scheduling new classes.",
                ),
            });
        }

        let mut warnings = Vec::new();
        if bookings
            .iter()
            .any(|booking| booking.access_status == AccessStatus::OverdueGrace)
        {
            let message =
                "Payment is approaching overdue. Please settle dues soon to avoid service interruption.";
            warn!(reason = message, "grace period booking scheduled");
            warnings.push(SideEffectWarning::new(SideEffectStep::AccessGrace, message));
        }
        Ok((bookings, warnings))
    }

    // -----------------------------------------------------------------
    // Adhoc path
    // -----------------------------------------------------------------

    async fn create_adhoc(
        &self,
        request: &AdhocRequest,
        bookings: &[Booking],
        students: u32,
        cancel: &CancellationToken,
    ) -> Result<CreationOutcome, CoreError> {
        if request.date < studio_today() {
            return Err(CoreError::Domain(DomainError::DateInPast {
                date: request.date,
            }));
        }

        // Last-chance conflict gate; the form check is advisory only.
        let proposed = ProposedSlot {
            instructor_id: request.instructor_id,
            date: request.date,
            start: request.start_time,
            end: request.end_time,
        };
        match conflicts::gate(&self.store, &proposed, Some(request.class_type_id)).await? {
            Resolution::Blocked(conflict) => return Err(CoreError::ConflictBlocked(conflict)),
            Resolution::Advisory(conflict) => {
                warn!(message = %conflict.message, "scheduling conflict warning, proceeding");
            }
            Resolution::Clear => {}
        }
        ensure_live(cancel)?;

        let per_class =
            calculate_payment_amount(request.payment.payment_type, request.payment.amount, 1, students)?;

        // Fallback template link; adhoc rows carry any active schedule id.
        let template_id = match self.store.first_active_schedule().await {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "fallback schedule lookup failed");
                None
            }
        };

        let mut row = Assignment::scheduled(
            request.date,
            request.start_time,
            request.end_time,
            request.instructor_id,
            per_class,
            request.payment.payment_type,
            ScheduleType::Adhoc,
            request.bookings.booking_type,
            request.assigned_by,
        )
        .with_class_type(request.class_type_id)
        .with_notes(request.notes.as_deref());
        if let Some(template) = template_id {
            row = row.with_template(template);
        }

        ensure_live(cancel)?;
        let ids = self.store.insert_assignments(std::slice::from_ref(&row)).await?;
        let mut warnings = Vec::new();

        let container_id = match self.resolve_container(request, bookings).await {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(error = %err, "container resolution failed");
                warnings.push(SideEffectWarning::new(
                    SideEffectStep::Container,
                    format!("container resolution failed: {err}"),
                ));
                None
            }
        };
        if let Some(container) = container_id {
            if let Err(err) = self.store.attach_container(&ids, container).await {
                warn!(error = %err, "container attachment failed");
                warnings.push(SideEffectWarning::new(
                    SideEffectStep::Container,
                    format!("container attachment failed: {err}"),
                ));
            }
        }

        if let Err(err) = self
            .link_bookings(&ids, &request.bookings.codes, container_id)
            .await
        {
            // The adhoc row stands even when its links could not be written.
            warn!(error = %err, "booking association failed, assignment created");
            warnings.push(SideEffectWarning::new(
                SideEffectStep::LinkBookings,
                format!("assignment created but booking links failed: {err}"),
            ));
        } else {
            self.complete_bookings(&request.bookings.codes, &mut warnings)
                .await;
        }

        Ok(CreationOutcome {
            created: ids.len(),
            warnings,
        })
    }

    async fn resolve_container(
        &self,
        request: &AdhocRequest,
        bookings: &[Booking],
    ) -> Result<Uuid, CoreError> {
        let first_code = request.bookings.codes.first().ok_or(CoreError::BookingRequired)?;
        let key = month_key(request.date);
        let code = Container::code(first_code, &key);

        if let Some(existing) = self.store.find_container(&code).await? {
            if let Some(id) = existing.id {
                return Ok(id);
            }
        }

        let client_name = bookings
            .iter()
            .find(|booking| &booking.booking_code == first_code)
            .map(|booking| booking.client_name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(first_code);
        let container = Container {
            id: None,
            container_code: code,
            display_name: format!("{client_name} ({key})"),
            container_type: request.bookings.booking_type,
            instructor_id: Some(request.instructor_id),
            package_id: None,
            max_booking_count: 1,
            is_active: true,
        };
        Ok(self.store.insert_container(&container).await?)
    }

    // -----------------------------------------------------------------
    // Weekly path
    // -----------------------------------------------------------------

    async fn create_weekly(
        &self,
        request: &WeeklyRequest,
        students: u32,
        cancel: &CancellationToken,
    ) -> Result<CreationOutcome, CoreError> {
        let end_date = match request.end_date {
            Some(end) => end,
            None => year_end(request.start_date)?,
        };

        let (day_of_week, start_time, end_time, class_type_id, template_id) = match &request.source
        {
            WeeklySource::FromTemplate { template_id } => {
                let template = self
                    .store
                    .fetch_weekly_schedule(*template_id)
                    .await?
                    .ok_or(CoreError::TemplateNotFound { id: *template_id })?;
                // Template updates are part of the core write, not a side
                // effect: a stale template misleads every later series.
                self.store
                    .assign_schedule_instructor(
                        *template_id,
                        request.instructor_id,
                        request.notes.as_deref(),
                    )
                    .await?;
                (
                    template.day_of_week,
                    template.start_time,
                    template.end_time,
                    template.class_type_id,
                    Some(*template_id),
                )
            }
            WeeklySource::NewSchedule {
                day_of_week,
                duration_minutes,
            } => {
                let schedule = WeeklySchedule {
                    id: None,
                    class_type_id: request.class_type_id,
                    day_of_week: *day_of_week,
                    start_time: request.start_time,
                    end_time: request.end_time,
                    instructor_id: Some(request.instructor_id),
                    duration_minutes: *duration_minutes,
                    max_participants: 10,
                    is_active: true,
                    notes: request.notes.clone(),
                };
                let id = self.store.insert_weekly_schedule(&schedule).await?;
                (
                    *day_of_week,
                    request.start_time,
                    request.end_time,
                    request.class_type_id,
                    Some(id),
                )
            }
        };
        ensure_live(cancel)?;

        let dates = generate_weekly_series(request.start_date, end_date, day_of_week)?;
        let per_class =
            calculate_payment_amount(request.payment.payment_type, request.payment.amount, 1, students)?;

        let rows: Vec<Assignment> = dates
            .iter()
            .map(|date| {
                let mut row = Assignment::scheduled(
                    *date,
                    start_time,
                    end_time,
                    request.instructor_id,
                    per_class,
                    request.payment.payment_type,
                    ScheduleType::Weekly,
                    request.bookings.booking_type,
                    request.assigned_by,
                )
                .with_notes(request.notes.as_deref());
                if let Some(class_type) = class_type_id {
                    row = row.with_class_type(class_type);
                }
                if let Some(template) = template_id {
                    row = row.with_template(template);
                }
                row
            })
            .collect();

        ensure_live(cancel)?;
        let ids = self.store.insert_assignments(&rows).await?;
        let mut warnings = Vec::new();

        if let Err(err) = self.link_bookings(&ids, &request.bookings.codes, None).await {
            warn!(error = %err, "booking association failed for weekly series");
            warnings.push(SideEffectWarning::new(
                SideEffectStep::LinkBookings,
                format!("assignments created but booking links failed: {err}"),
            ));
        } else {
            self.complete_bookings(&request.bookings.codes, &mut warnings)
                .await;
        }

        Ok(CreationOutcome {
            created: ids.len(),
            warnings,
        })
    }

    // -----------------------------------------------------------------
    // Monthly path
    // -----------------------------------------------------------------

    async fn create_monthly(
        &self,
        request: &MonthlyRequest,
        students: u32,
        cancel: &CancellationToken,
    ) -> Result<CreationOutcome, CoreError> {
        let bounds = month_boundaries(request.start_date);

        let (slots, total_classes) = match &request.method {
            ScheduleMethod::WeeklyRecurrence {
                weekdays,
                total_classes,
                start_time,
                end_time,
            } => {
                let dates = generate_weekly_recurrence(
                    request.start_date,
                    weekdays,
                    *total_classes,
                    Some(bounds.end),
                )?;
                let slots = to_slots(&dates, *start_time, *end_time);
                (slots, *total_classes)
            }
            ScheduleMethod::ManualCalendar { selections } => {
                validate_selections_within_month(selections, &bounds)?;
                (selections.clone(), selection_count(selections))
            }
            ScheduleMethod::FixedCadence { .. } => {
                return Err(CoreError::Domain(DomainError::MissingField {
                    field: "monthly_assignment_method",
                }));
            }
        };
        enforce_month_boundary(&slots, &bounds)?;
        ensure_live(cancel)?;

        let per_class = calculate_payment_amount(
            request.payment.payment_type,
            request.payment.amount,
            total_classes,
            students,
        )?;
        let rows: Vec<Assignment> = slots
            .iter()
            .map(|slot| {
                Assignment::scheduled(
                    slot.date,
                    slot.start_time,
                    slot.end_time,
                    request.instructor_id,
                    per_class,
                    request.payment.payment_type,
                    ScheduleType::Monthly,
                    request.bookings.booking_type,
                    request.assigned_by,
                )
                .with_package(request.package_id)
                .with_calendar_month(&bounds.month_key)
                .with_notes(request.notes.as_deref())
            })
            .collect();

        ensure_live(cancel)?;
        let ids = self.store.insert_assignments(&rows).await?;
        let mut warnings = Vec::new();

        // For batch subscriptions a missing link is surfaced, not swallowed:
        // rows exist but the booking cannot see them.
        if let Err(err) = self.link_bookings(&ids, &request.bookings.codes, None).await {
            warn!(error = %err, "booking association failed for monthly batch");
            return Err(CoreError::LinkFailed { created: ids.len() });
        }
        self.complete_bookings(&request.bookings.codes, &mut warnings)
            .await;

        for code in &request.bookings.codes {
            if let Err(err) = self
                .store
                .mark_booking_recurring(code, request.start_date, Some(request.package_id))
                .await
            {
                warn!(booking = %code, error = %err, "failed to mark booking recurring");
                warnings.push(SideEffectWarning::new(
                    SideEffectStep::MarkRecurring,
                    format!("failed to mark {code} recurring: {err}"),
                ));
            }
        }

        warnings.extend(
            invoice::generate_first_month_invoices(
                &self.store,
                &request.bookings.codes,
                request.start_date,
                request.package_id,
            )
            .await,
        );

        if let ScheduleMethod::WeeklyRecurrence { weekdays, .. } = &request.method {
            self.log_shortfall(request.instructor_id, &bounds, total_classes, weekdays, &mut warnings)
                .await;
        }

        Ok(CreationOutcome {
            created: ids.len(),
            warnings,
        })
    }

    async fn log_shortfall(
        &self,
        instructor_id: Uuid,
        bounds: &MonthBoundaries,
        required: u32,
        weekdays: &[Weekday],
        warnings: &mut Vec<SideEffectWarning>,
    ) {
        match analyze_with_recommendations(
            &self.store,
            instructor_id,
            &bounds.month_key,
            required,
            weekdays,
        )
        .await
        {
            Ok(analysis) if analysis.has_shortfall() => {
                warn!(
                    month = %analysis.month_key,
                    shortfall = analysis.shortfall,
                    recommendations = analysis.recommendations.len(),
                    "scheduling shortfall detected"
                );
                warnings.push(SideEffectWarning::new(
                    SideEffectStep::Shortfall,
                    format!(
                        "month {} is short {} class(es); {} alternate date(s) available",
                        analysis.month_key,
                        -analysis.shortfall,
                        analysis.recommendations.len()
                    ),
                ));
            }
            Ok(analysis) => {
                info!(
                    month = %analysis.month_key,
                    scheduled = analysis.scheduled,
                    adjustments = analysis.adjustments,
                    "no scheduling shortfall"
                );
            }
            Err(err) => {
                warn!(error = %err, "shortfall detection failed");
                warnings.push(SideEffectWarning::new(
                    SideEffectStep::Shortfall,
                    format!("shortfall detection failed: {err}"),
                ));
            }
        }
    }

    // -----------------------------------------------------------------
    // Crash course path
    // -----------------------------------------------------------------

    async fn create_crash_course(
        &self,
        request: &CrashCourseRequest,
        packages: &[ClassPackage],
        students: u32,
        cancel: &CancellationToken,
    ) -> Result<CreationOutcome, CoreError> {
        let package = self.resolve_package(packages, request.package_id).await?;
        if package.class_count == 0 {
            return Err(CoreError::Domain(DomainError::InvalidClassCount { count: 0 }));
        }

        let per_class = calculate_payment_amount(
            request.payment.payment_type,
            request.payment.amount,
            package.class_count,
            students,
        )?;
        let window = package
            .effective_validity_days()
            .map(|days| validity_window(request.start_date, days));

        let slots: Vec<ManualSelection> = match &request.method {
            ScheduleMethod::WeeklyRecurrence {
                weekdays,
                start_time,
                end_time,
                ..
            } => {
                let dates = generate_weekly_recurrence(
                    request.start_date,
                    weekdays,
                    package.class_count,
                    window.map(|(_, end)| end),
                )?;
                to_slots(&dates, *start_time, *end_time)
            }
            ScheduleMethod::ManualCalendar { selections } => selections.clone(),
            ScheduleMethod::FixedCadence {
                cadence,
                start_time,
                end_time,
            } => {
                let dates = crash_course_dates(request.start_date, package.class_count, *cadence)?;
                to_slots(&dates, *start_time, *end_time)
            }
        };
        ensure_live(cancel)?;

        // Final validity-window check over the materialized dates.
        let dates: Vec<NaiveDate> = slots.iter().map(|slot| slot.date).collect();
        let report = check_validity_dates(&dates, window, package.class_count, studio_today());
        for warning in &report.warnings {
            warn!(package = %package.name, warning = %warning, "crash course warning");
        }
        if !report.is_valid() {
            if let (Some(offending), Some((window_start, window_end))) =
                (report.invalid.first(), window)
            {
                return Err(CoreError::Domain(DomainError::ValidityWindowViolation {
                    date: *offending,
                    window_start,
                    window_end,
                }));
            }
        }

        let rows: Vec<Assignment> = slots
            .iter()
            .map(|slot| {
                Assignment::scheduled(
                    slot.date,
                    slot.start_time,
                    slot.end_time,
                    request.instructor_id,
                    per_class,
                    request.payment.payment_type,
                    ScheduleType::Crash,
                    request.bookings.booking_type,
                    request.assigned_by,
                )
                .with_package(request.package_id)
                .with_notes(request.notes.as_deref())
            })
            .collect();

        ensure_live(cancel)?;
        let ids = self.store.insert_assignments(&rows).await?;
        let mut warnings = Vec::new();

        if let Err(err) = self.link_bookings(&ids, &request.bookings.codes, None).await {
            warn!(error = %err, "booking association failed for crash course batch");
            return Err(CoreError::LinkFailed { created: ids.len() });
        }
        self.complete_bookings(&request.bookings.codes, &mut warnings)
            .await;

        Ok(CreationOutcome {
            created: ids.len(),
            warnings,
        })
    }

    // -----------------------------------------------------------------
    // Package path
    // -----------------------------------------------------------------

    async fn create_package(
        &self,
        request: &PackageRequest,
        packages: &[ClassPackage],
        students: u32,
        cancel: &CancellationToken,
    ) -> Result<CreationOutcome, CoreError> {
        let package = self.resolve_package(packages, request.package_id).await?;
        if package.class_count == 0 {
            return Err(CoreError::Domain(DomainError::InvalidClassCount { count: 0 }));
        }

        let per_class = calculate_payment_amount(
            request.payment.payment_type,
            request.payment.amount,
            package.class_count,
            students,
        )?;
        let bounds = month_boundaries(request.start_date);

        let slots: Vec<ManualSelection> = match &request.method {
            ScheduleMethod::WeeklyRecurrence {
                weekdays,
                start_time,
                end_time,
                ..
            } => {
                // The validity window bounds the walk when the package has
                // one; otherwise the start month does.
                let bound = package
                    .effective_validity_days()
                    .map_or(bounds.end, |days| validity_window(request.start_date, days).1);
                let dates = generate_weekly_recurrence(
                    request.start_date,
                    weekdays,
                    package.class_count,
                    Some(bound),
                )?;
                to_slots(&dates, *start_time, *end_time)
            }
            ScheduleMethod::ManualCalendar { selections } => {
                validate_selections_within_month(selections, &bounds)?;
                selections.clone()
            }
            ScheduleMethod::FixedCadence { .. } => {
                return Err(CoreError::Domain(DomainError::MissingField {
                    field: "monthly_assignment_method",
                }));
            }
        };
        ensure_live(cancel)?;

        let rows: Vec<Assignment> = slots
            .iter()
            .map(|slot| {
                Assignment::scheduled(
                    slot.date,
                    slot.start_time,
                    slot.end_time,
                    request.instructor_id,
                    per_class,
                    request.payment.payment_type,
                    ScheduleType::Monthly,
                    request.bookings.booking_type,
                    request.assigned_by,
                )
                .with_package(request.package_id)
                // A validity-bounded walk can cross months; every row keys
                // the month it actually falls in.
                .with_calendar_month(&month_key(slot.date))
                .with_notes(request.notes.as_deref())
            })
            .collect();

        ensure_live(cancel)?;
        let ids = self.store.insert_assignments(&rows).await?;
        let mut warnings = Vec::new();

        if let Err(err) = self.link_bookings(&ids, &request.bookings.codes, None).await {
            warn!(error = %err, "booking association failed for package batch");
            return Err(CoreError::LinkFailed { created: ids.len() });
        }
        self.complete_bookings(&request.bookings.codes, &mut warnings)
            .await;

        Ok(CreationOutcome {
            created: ids.len(),
            warnings,
        })
    }

    // -----------------------------------------------------------------
    // Shared side effects
    // -----------------------------------------------------------------

    async fn resolve_package(
        &self,
        packages: &[ClassPackage],
        package_id: Uuid,
    ) -> Result<ClassPackage, CoreError> {
        if let Some(found) = packages.iter().find(|package| package.id == package_id) {
            return Ok(found.clone());
        }
        self.store
            .fetch_package(package_id)
            .await?
            .ok_or(CoreError::PackageNotFound { id: package_id })
    }

    async fn link_bookings(
        &self,
        assignment_ids: &[Uuid],
        codes: &[String],
        container_id: Option<Uuid>,
    ) -> Result<(), shala_store::StoreError> {
        if codes.is_empty() {
            return Ok(());
        }
        let links: Vec<AssignmentBooking> = assignment_ids
            .iter()
            .flat_map(|assignment_id| {
                codes.iter().map(move |code| AssignmentBooking {
                    assignment_id: *assignment_id,
                    booking_code: code.clone(),
                    container_id,
                })
            })
            .collect();
        self.store.insert_assignment_bookings(&links).await
    }

    async fn complete_bookings(&self, codes: &[String], warnings: &mut Vec<SideEffectWarning>) {
        for code in codes {
            if let Err(err) = self
                .store
                .update_booking_status(code, BookingStatus::Completed)
                .await
            {
                warn!(booking = %code, error = %err, "failed to update booking status");
                warnings.push(SideEffectWarning::new(
                    SideEffectStep::BookingStatus,
                    format!("failed to mark {code} completed: {err}"),
                ));
            }
        }
    }
}

fn ensure_live(cancel: &CancellationToken) -> Result<(), CoreError> {
    if cancel.is_cancelled() {
        return Err(CoreError::Cancelled);
    }
    Ok(())
}

fn to_slots(dates: &[NaiveDate], start_time: NaiveTime, end_time: NaiveTime) -> Vec<ManualSelection> {
    dates
        .iter()
        .map(|date| ManualSelection {
            date: *date,
            start_time,
            end_time,
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn selection_count(selections: &[ManualSelection]) -> u32 {
    selections.len() as u32
}

fn enforce_month_boundary(
    slots: &[ManualSelection],
    bounds: &MonthBoundaries,
) -> Result<(), CoreError> {
    for slot in slots {
        if !is_date_in_month(slot.date, bounds) {
            return Err(CoreError::Domain(DomainError::CalendarMonthViolation {
                date: slot.date,
                month_start: bounds.start,
                month_end: bounds.end,
            }));
        }
    }
    Ok(())
}

fn year_end(start: NaiveDate) -> Result<NaiveDate, CoreError> {
    NaiveDate::from_ymd_opt(start.year(), 12, 31).ok_or_else(|| {
        CoreError::Domain(DomainError::DateArithmeticOverflow {
            operation: String::from("computing the default series end date"),
        })
    })
}
