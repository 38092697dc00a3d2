// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{date, per_class, single_booking, time};
use crate::request::{
    AdhocRequest, BookingSelection, CreateAssignmentRequest, MonthlyRequest, PaymentTerms,
    ScheduleMethod, WeeklyRequest, WeeklySource,
};
use shala_domain::{AssignmentKind, BookingType, Cadence, DomainError, PaymentType};
use uuid::Uuid;

#[test]
fn test_payment_terms_reject_bad_amounts() {
    assert!(matches!(
        PaymentTerms::new(PaymentType::PerClass, -5.0),
        Err(DomainError::InvalidPaymentAmount)
    ));
    assert!(PaymentTerms::new(PaymentType::PerClass, f64::NAN).is_err());
    assert!(PaymentTerms::new(PaymentType::PerClass, 0.0).is_ok());
}

#[test]
fn test_booking_selection_cleans_placeholder_codes() {
    let selection = BookingSelection::new(
        &[
            String::from(" SH-20250301-0001 "),
            String::from("undefined"),
            String::new(),
        ],
        BookingType::Individual,
    );
    assert_eq!(selection.codes, vec![String::from("SH-20250301-0001")]);
}

#[test]
fn test_adhoc_request_rejects_inverted_times() {
    let result = AdhocRequest::new(
        Uuid::new_v4(),
        date(2030, 6, 2),
        time(10, 0),
        time(9, 0),
        Uuid::new_v4(),
        per_class(500.0),
        single_booking("SH-20250301-0001", BookingType::Individual),
        Uuid::new_v4(),
        None,
    );
    assert!(matches!(result, Err(DomainError::EndNotAfterStart { .. })));
}

#[test]
fn test_weekly_new_schedule_requires_class_type() {
    let result = WeeklyRequest::new(
        WeeklySource::NewSchedule {
            day_of_week: chrono::Weekday::Mon,
            duration_minutes: 60,
        },
        None,
        date(2025, 3, 3),
        None,
        time(9, 0),
        time(10, 0),
        Uuid::new_v4(),
        per_class(500.0),
        single_booking("SH-20250301-0001", BookingType::PublicGroup),
        Uuid::new_v4(),
        None,
    );
    assert!(matches!(
        result,
        Err(DomainError::MissingField {
            field: "class_type_id"
        })
    ));
}

#[test]
fn test_monthly_request_rejects_empty_weekday_selection() {
    let result = MonthlyRequest::new(
        Uuid::new_v4(),
        date(2025, 3, 3),
        ScheduleMethod::WeeklyRecurrence {
            weekdays: Vec::new(),
            total_classes: 6,
            start_time: time(9, 0),
            end_time: time(10, 0),
        },
        Uuid::new_v4(),
        per_class(500.0),
        single_booking("SH-20250301-0001", BookingType::Individual),
        Uuid::new_v4(),
        None,
    );
    assert!(matches!(result, Err(DomainError::EmptyWeekdaySelection)));
}

#[test]
fn test_monthly_request_rejects_zero_class_count() {
    let result = MonthlyRequest::new(
        Uuid::new_v4(),
        date(2025, 3, 3),
        ScheduleMethod::WeeklyRecurrence {
            weekdays: vec![chrono::Weekday::Mon],
            total_classes: 0,
            start_time: time(9, 0),
            end_time: time(10, 0),
        },
        Uuid::new_v4(),
        per_class(500.0),
        single_booking("SH-20250301-0001", BookingType::Individual),
        Uuid::new_v4(),
        None,
    );
    assert!(matches!(
        result,
        Err(DomainError::InvalidClassCount { count: 0 })
    ));
}

#[test]
fn test_monthly_request_rejects_fixed_cadence() {
    let result = MonthlyRequest::new(
        Uuid::new_v4(),
        date(2025, 3, 3),
        ScheduleMethod::FixedCadence {
            cadence: Cadence::Weekly,
            start_time: time(9, 0),
            end_time: time(10, 0),
        },
        Uuid::new_v4(),
        per_class(500.0),
        single_booking("SH-20250301-0001", BookingType::Individual),
        Uuid::new_v4(),
        None,
    );
    assert!(result.is_err());
}

#[test]
fn test_request_kind_and_booking_accessors() {
    let request = CreateAssignmentRequest::Adhoc(
        AdhocRequest::new(
            Uuid::new_v4(),
            date(2030, 6, 2),
            time(9, 0),
            time(10, 0),
            Uuid::new_v4(),
            per_class(500.0),
            single_booking("SH-20250301-0001", BookingType::Individual),
            Uuid::new_v4(),
            None,
        )
        .unwrap(),
    );
    assert_eq!(request.kind(), AssignmentKind::Adhoc);
    assert_eq!(request.booking_codes(), &[String::from("SH-20250301-0001")]);
    assert_eq!(request.booking_type(), BookingType::Individual);
}
