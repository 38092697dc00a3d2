// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Each handler translates the flat form payload into a typed core request,
//! invokes the service, and maps outcomes and errors back to the API
//! contract. No handler touches the store directly.

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AdjustmentApiRequest, AdjustmentResponse, ConflictCheckRequest, ConflictCheckResponse,
    ConflictDto, CreateAssignmentApiRequest, CreateAssignmentResponse, FillShortfallRequest,
    FillShortfallResponse, ManualSelectionDto, RecommendationDto, ShortfallRequest,
    ShortfallResponse, UpdateAssignmentStatusRequest, UpdateAssignmentStatusResponse, WarningDto,
};
use chrono::{NaiveDate, NaiveTime, Weekday};
use shala_core::{
    AdhocRequest, AdjustmentRequest, AssignmentService, BookingSelection, CrashCourseRequest,
    CreateAssignmentRequest, MonthlyRequest, PackageRequest, PaymentTerms, ScheduleMethod,
    SideEffectWarning, WeeklyRequest, WeeklySource,
};
use shala_domain::{
    AssignmentKind, BookingType, Cadence, ClassStatus, Conflict, ConflictKind, ManualSelection,
    PaymentType, ProposedSlot, Severity, format_date, parse_date, parse_time, weekday_from_index,
    weekday_index,
};
use shala_store::StoreClient;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Creates assignments from the flat form payload.
///
/// # Errors
///
/// Returns an error when the payload cannot be translated into a typed
/// request or the creation itself fails.
pub async fn create_assignment<S: StoreClient>(
    service: &AssignmentService<S>,
    request: CreateAssignmentApiRequest,
    cancel: &CancellationToken,
) -> Result<CreateAssignmentResponse, ApiError> {
    let kind: AssignmentKind = request
        .assignment_type
        .parse()
        .map_err(translate_domain_error)?;
    let typed = build_request(kind, &request)?;
    let student_count = request.student_count.unwrap_or(1);

    let outcome = service
        .create_assignment(typed, &[], student_count, cancel)
        .await
        .map_err(translate_core_error)?;
    tracing::info!(
        kind = kind.as_str(),
        created = outcome.created,
        warnings = outcome.warnings.len(),
        "assignments created"
    );

    Ok(CreateAssignmentResponse {
        success: true,
        count: outcome.created,
        warnings: outcome.warnings.iter().map(warning_dto).collect(),
    })
}

/// Updates one assignment's class status.
///
/// # Errors
///
/// Returns an error when the id or status is malformed, or the store
/// update fails.
pub async fn update_assignment_status<S: StoreClient>(
    service: &AssignmentService<S>,
    assignment_id: &str,
    request: UpdateAssignmentStatusRequest,
) -> Result<UpdateAssignmentStatusResponse, ApiError> {
    let id = parse_uuid("assignment_id", assignment_id)?;
    let status: ClassStatus = request.status.parse().map_err(translate_domain_error)?;
    service
        .update_assignment_status(id, status)
        .await
        .map_err(translate_core_error)?;
    Ok(UpdateAssignmentStatusResponse { success: true })
}

/// Runs the advisory conflict check for a proposed slot.
///
/// # Errors
///
/// Returns an error when the payload is malformed or the context rows
/// cannot be fetched.
pub async fn check_conflicts<S: StoreClient>(
    service: &AssignmentService<S>,
    request: ConflictCheckRequest,
) -> Result<ConflictCheckResponse, ApiError> {
    let proposed = ProposedSlot {
        instructor_id: parse_uuid("instructor_id", &request.instructor_id)?,
        date: parse_date_field(&request.date)?,
        start: parse_time_field(&request.start_time)?,
        end: parse_time_field(&request.end_time)?,
    };
    let class_type_id = request
        .class_type_id
        .as_deref()
        .map(|value| parse_uuid("class_type_id", value))
        .transpose()?;

    let mut conflicts = service
        .check_conflicts(&proposed, class_type_id)
        .await
        .map_err(translate_core_error)?;
    // Errors surface ahead of warnings.
    conflicts.sort_by_key(|conflict| match conflict.severity {
        Severity::Error => 0,
        Severity::Warning => 1,
    });

    Ok(ConflictCheckResponse {
        blocked: conflicts
            .iter()
            .any(|conflict| conflict.severity == Severity::Error),
        conflicts: conflicts.iter().map(conflict_dto).collect(),
    })
}

/// Analyzes an instructor's month against its guaranteed class count.
///
/// # Errors
///
/// Returns an error when the payload is malformed or the month rows cannot
/// be fetched.
pub async fn analyze_shortfall<S: StoreClient>(
    service: &AssignmentService<S>,
    request: ShortfallRequest,
) -> Result<ShortfallResponse, ApiError> {
    let instructor_id = parse_uuid("instructor_id", &request.instructor_id)?;
    let preferred = parse_weekdays(&request.preferred_days)?;

    let analysis = service
        .analyze_shortfall(
            instructor_id,
            &request.calendar_month,
            request.required_classes,
            &preferred,
        )
        .await
        .map_err(translate_core_error)?;

    Ok(ShortfallResponse {
        scheduled: analysis.scheduled,
        adjustments: analysis.adjustments,
        shortfall: analysis.shortfall,
        has_shortfall: analysis.has_shortfall(),
        recommendations: analysis
            .recommendations
            .iter()
            .map(|rec| RecommendationDto {
                date: format_date(rec.date),
                day_of_week: weekday_index(rec.weekday),
                reason: rec.reason.clone(),
            })
            .collect(),
    })
}

/// Creates one adjustment class.
///
/// # Errors
///
/// Returns an error when the payload is malformed or creation fails.
pub async fn create_adjustment<S: StoreClient>(
    service: &AssignmentService<S>,
    request: AdjustmentApiRequest,
) -> Result<AdjustmentResponse, ApiError> {
    let typed = adjustment_request(&request)?;
    let (assignment_id, warnings) = service
        .create_adjustment_class(&typed)
        .await
        .map_err(translate_core_error)?;
    Ok(AdjustmentResponse {
        success: true,
        assignment_id: assignment_id.to_string(),
        warnings: warnings.iter().map(warning_dto).collect(),
    })
}

/// Analyzes a month's shortfall and creates adjustments for every
/// recommended date.
///
/// # Errors
///
/// Returns an error when the payload is malformed or the analysis itself
/// fails; individual creation failures are reported in the response.
pub async fn fill_shortfall<S: StoreClient>(
    service: &AssignmentService<S>,
    request: FillShortfallRequest,
) -> Result<FillShortfallResponse, ApiError> {
    let instructor_id = parse_uuid("instructor_id", &request.instructor_id)?;
    let preferred = parse_weekdays(&request.preferred_days)?;

    let analysis = service
        .analyze_shortfall(
            instructor_id,
            &request.calendar_month,
            request.required_classes,
            &preferred,
        )
        .await
        .map_err(translate_core_error)?;

    if !analysis.has_shortfall() {
        return Ok(FillShortfallResponse {
            success: true,
            created: 0,
            failed: 0,
            errors: Vec::new(),
        });
    }
    let Some(first) = analysis.recommendations.first() else {
        return Ok(FillShortfallResponse {
            success: false,
            created: 0,
            failed: 0,
            errors: vec![format!(
                "Shortfall exists but no alternative dates are available in {}",
                request.calendar_month
            )],
        });
    };

    let base = AdjustmentRequest {
        instructor_id,
        package_id: parse_uuid("package_id", &request.package_id)?,
        month_key: request.calendar_month.clone(),
        date: first.date,
        start_time: parse_time_field(&request.start_time)?,
        end_time: parse_time_field(&request.end_time)?,
        reason: first.reason.clone(),
        booking_codes: request.booking_ids.clone(),
        booking_type: parse_booking_type(request.booking_type.as_deref(), BookingType::Individual)?,
        payment_amount: request.payment_amount,
        assigned_by: parse_uuid("assigned_by", &request.assigned_by)?,
        notes: request.notes.clone(),
    };

    let outcome = service
        .fill_monthly_shortfall(&base, &analysis.recommendations)
        .await;
    Ok(FillShortfallResponse {
        success: outcome.created > 0,
        created: outcome.created,
        failed: outcome.failed,
        errors: outcome.errors,
    })
}

// ---------------------------------------------------------------------------
// Payload translation
// ---------------------------------------------------------------------------

fn build_request(
    kind: AssignmentKind,
    request: &CreateAssignmentApiRequest,
) -> Result<CreateAssignmentRequest, ApiError> {
    let instructor_id = parse_uuid("instructor_id", &request.instructor_id)?;
    let assigned_by = parse_uuid("assigned_by", &request.assigned_by)?;
    let payment_type: PaymentType = request
        .payment_type
        .parse()
        .map_err(translate_domain_error)?;
    let payment =
        PaymentTerms::new(payment_type, request.payment_amount).map_err(translate_domain_error)?;

    match kind {
        AssignmentKind::Adhoc => {
            let bookings = bookings_for(request, BookingType::Individual)?;
            let typed = AdhocRequest::new(
                parse_uuid("class_type_id", required(request.class_type_id.as_deref(), "class_type_id")?)?,
                parse_date_field(required(request.date.as_deref(), "date")?)?,
                parse_time_field(required(request.start_time.as_deref(), "start_time")?)?,
                parse_time_field(required(request.end_time.as_deref(), "end_time")?)?,
                instructor_id,
                payment,
                bookings,
                assigned_by,
                request.notes.clone(),
            )
            .map_err(translate_domain_error)?;
            Ok(CreateAssignmentRequest::Adhoc(typed))
        }
        AssignmentKind::Weekly => {
            let bookings = bookings_for(request, BookingType::PublicGroup)?;
            let source = match request.selected_template_id.as_deref() {
                Some(template) => WeeklySource::FromTemplate {
                    template_id: parse_uuid("selected_template_id", template)?,
                },
                None => WeeklySource::NewSchedule {
                    day_of_week: parse_weekday(*required(request.day_of_week.as_ref(), "day_of_week")?)?,
                    duration_minutes: request.duration_minutes.unwrap_or(60),
                },
            };
            let class_type_id = request
                .class_type_id
                .as_deref()
                .map(|value| parse_uuid("class_type_id", value))
                .transpose()?;
            let end_date = request
                .end_date
                .as_deref()
                .map(parse_date_field)
                .transpose()?;
            let typed = WeeklyRequest::new(
                source,
                class_type_id,
                parse_date_field(required(request.start_date.as_deref(), "start_date")?)?,
                end_date,
                parse_time_field(required(request.start_time.as_deref(), "start_time")?)?,
                parse_time_field(required(request.end_time.as_deref(), "end_time")?)?,
                instructor_id,
                payment,
                bookings,
                assigned_by,
                request.notes.clone(),
            )
            .map_err(translate_domain_error)?;
            Ok(CreateAssignmentRequest::Weekly(typed))
        }
        AssignmentKind::Monthly => {
            let bookings = bookings_for(request, BookingType::Individual)?;
            let typed = MonthlyRequest::new(
                parse_uuid("package_id", required(request.package_id.as_deref(), "package_id")?)?,
                parse_date_field(required(request.start_date.as_deref(), "start_date")?)?,
                schedule_method(request)?,
                instructor_id,
                payment,
                bookings,
                assigned_by,
                request.notes.clone(),
            )
            .map_err(translate_domain_error)?;
            Ok(CreateAssignmentRequest::Monthly(typed))
        }
        AssignmentKind::CrashCourse => {
            let bookings = bookings_for(request, BookingType::Individual)?;
            let typed = CrashCourseRequest::new(
                parse_uuid("package_id", required(request.package_id.as_deref(), "package_id")?)?,
                parse_date_field(required(request.start_date.as_deref(), "start_date")?)?,
                schedule_method(request)?,
                instructor_id,
                payment,
                bookings,
                assigned_by,
                request.notes.clone(),
            )
            .map_err(translate_domain_error)?;
            Ok(CreateAssignmentRequest::CrashCourse(typed))
        }
        AssignmentKind::Package => {
            let bookings = bookings_for(request, BookingType::Individual)?;
            let typed = PackageRequest::new(
                parse_uuid("package_id", required(request.package_id.as_deref(), "package_id")?)?,
                parse_date_field(required(request.start_date.as_deref(), "start_date")?)?,
                schedule_method(request)?,
                instructor_id,
                payment,
                bookings,
                assigned_by,
                request.notes.clone(),
            )
            .map_err(translate_domain_error)?;
            Ok(CreateAssignmentRequest::Package(typed))
        }
    }
}

fn schedule_method(request: &CreateAssignmentApiRequest) -> Result<ScheduleMethod, ApiError> {
    let method = request
        .monthly_assignment_method
        .as_deref()
        .unwrap_or("weekly_recurrence");
    match method {
        "weekly_recurrence" => Ok(ScheduleMethod::WeeklyRecurrence {
            weekdays: parse_weekdays(required(request.weekly_days.as_deref(), "weekly_days")?)?,
            total_classes: request.total_classes.unwrap_or(0),
            start_time: parse_time_field(required(request.start_time.as_deref(), "start_time")?)?,
            end_time: parse_time_field(required(request.end_time.as_deref(), "end_time")?)?,
        }),
        "manual_calendar" => {
            let dtos = required(request.manual_selections.as_deref(), "manual_selections")?;
            Ok(ScheduleMethod::ManualCalendar {
                selections: parse_selections(dtos)?,
            })
        }
        "fixed_cadence" => {
            let cadence = match request.cadence.as_deref() {
                Some("daily") => Cadence::Daily,
                Some("weekly") | None => Cadence::Weekly,
                Some(other) => {
                    return Err(ApiError::InvalidInput {
                        field: String::from("cadence"),
                        message: format!("Unknown cadence '{other}'"),
                    });
                }
            };
            Ok(ScheduleMethod::FixedCadence {
                cadence,
                start_time: parse_time_field(required(request.start_time.as_deref(), "start_time")?)?,
                end_time: parse_time_field(required(request.end_time.as_deref(), "end_time")?)?,
            })
        }
        other => Err(ApiError::InvalidInput {
            field: String::from("monthly_assignment_method"),
            message: format!("Unknown assignment method '{other}'"),
        }),
    }
}

fn parse_selections(dtos: &[ManualSelectionDto]) -> Result<Vec<ManualSelection>, ApiError> {
    dtos.iter()
        .enumerate()
        .map(|(position, dto)| {
            let index = position + 1;
            let invalid = |what: &str, value: &str| ApiError::InvalidInput {
                field: String::from("manual_selections"),
                message: format!("Invalid {what} in selection {index}: '{value}'"),
            };
            Ok(ManualSelection {
                date: parse_date(&dto.date).map_err(|_| invalid("date", &dto.date))?,
                start_time: parse_time(&dto.start_time)
                    .map_err(|_| invalid("start time", &dto.start_time))?,
                end_time: parse_time(&dto.end_time)
                    .map_err(|_| invalid("end time", &dto.end_time))?,
            })
        })
        .collect()
}

fn adjustment_request(request: &AdjustmentApiRequest) -> Result<AdjustmentRequest, ApiError> {
    Ok(AdjustmentRequest {
        instructor_id: parse_uuid("instructor_id", &request.instructor_id)?,
        package_id: parse_uuid("package_id", &request.package_id)?,
        month_key: request.calendar_month.clone(),
        date: parse_date_field(&request.date)?,
        start_time: parse_time_field(&request.start_time)?,
        end_time: parse_time_field(&request.end_time)?,
        reason: request.adjustment_reason.clone(),
        booking_codes: request.booking_ids.clone(),
        booking_type: parse_booking_type(request.booking_type.as_deref(), BookingType::Individual)?,
        payment_amount: request.payment_amount,
        assigned_by: parse_uuid("assigned_by", &request.assigned_by)?,
        notes: request.notes.clone(),
    })
}

fn bookings_for(
    request: &CreateAssignmentApiRequest,
    default: BookingType,
) -> Result<BookingSelection, ApiError> {
    let booking_type = parse_booking_type(request.booking_type.as_deref(), default)?;
    Ok(BookingSelection::new(&request.booking_ids, booking_type))
}

// ---------------------------------------------------------------------------
// Field parsing
// ---------------------------------------------------------------------------

fn required<'a, T: ?Sized>(value: Option<&'a T>, field: &'static str) -> Result<&'a T, ApiError> {
    value.ok_or_else(|| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Missing required field: {field}"),
    })
}

fn parse_uuid(field: &'static str, value: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value.trim()).map_err(|_| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Invalid {field} '{value}': not a valid UUID"),
    })
}

fn parse_date_field(value: &str) -> Result<NaiveDate, ApiError> {
    parse_date(value).map_err(translate_domain_error)
}

fn parse_time_field(value: &str) -> Result<NaiveTime, ApiError> {
    parse_time(value).map_err(translate_domain_error)
}

fn parse_weekday(index: u8) -> Result<Weekday, ApiError> {
    weekday_from_index(index).map_err(translate_domain_error)
}

fn parse_weekdays(indices: &[u8]) -> Result<Vec<Weekday>, ApiError> {
    indices.iter().map(|index| parse_weekday(*index)).collect()
}

fn parse_booking_type(
    value: Option<&str>,
    default: BookingType,
) -> Result<BookingType, ApiError> {
    match value {
        None | Some("") => Ok(default),
        Some(text) => text.parse().map_err(translate_domain_error),
    }
}

fn warning_dto(warning: &SideEffectWarning) -> WarningDto {
    WarningDto {
        step: warning.step.as_str().to_string(),
        message: warning.message.clone(),
    }
}

fn conflict_dto(conflict: &Conflict) -> ConflictDto {
    ConflictDto {
        kind: match conflict.kind {
            ConflictKind::Instructor => String::from("instructor"),
            ConflictKind::Timing => String::from("timing"),
            ConflictKind::Resource => String::from("resource"),
            ConflictKind::Capacity => String::from("capacity"),
        },
        severity: match conflict.severity {
            Severity::Warning => String::from("warning"),
            Severity::Error => String::from("error"),
        },
        message: conflict.message.clone(),
        suggestions: conflict.suggestions.clone(),
    }
}
