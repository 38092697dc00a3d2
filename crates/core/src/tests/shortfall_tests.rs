// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{date, service, time};
use crate::error::CoreError;
use crate::shortfall::{AdjustmentRequest, analyze_with_recommendations, create_adjustment};
use chrono::Weekday;
use shala_domain::{Assignment, BookingType, DomainError, PaymentType, ScheduleType};
use uuid::Uuid;

async fn seed_monthly_mondays(
    store: &shala_store::MemoryStore,
    instructor: Uuid,
    month_key: &str,
) {
    // February 2025 Mondays: 3, 10, 17, 24.
    for day in [3, 10, 17, 24] {
        let row = Assignment::scheduled(
            date(2025, 2, day),
            time(7, 0),
            time(8, 0),
            instructor,
            500.0,
            PaymentType::PerClass,
            ScheduleType::Monthly,
            BookingType::Individual,
            Uuid::new_v4(),
        )
        .with_calendar_month(month_key);
        store.seed_assignment(row).await;
    }
}

fn adjustment_request(instructor: Uuid, month_key: &str, day: u32) -> AdjustmentRequest {
    AdjustmentRequest {
        instructor_id: instructor,
        package_id: Uuid::new_v4(),
        month_key: month_key.to_string(),
        date: date(2025, 2, day),
        start_time: time(7, 0),
        end_time: time(8, 0),
        reason: String::from("Calendar shortage"),
        booking_codes: vec![String::from("SH-20250201-0001")],
        booking_type: BookingType::Individual,
        payment_amount: 500.0,
        assigned_by: Uuid::new_v4(),
        notes: None,
    }
}

#[tokio::test]
async fn test_analysis_counts_scheduled_and_adjustments() {
    let svc = service();
    let instructor = Uuid::new_v4();
    seed_monthly_mondays(svc.store(), instructor, "2025-02").await;

    let analysis = svc
        .analyze_shortfall(instructor, "2025-02", 6, &[Weekday::Mon])
        .await
        .unwrap();
    assert_eq!(analysis.scheduled, 4);
    assert_eq!(analysis.adjustments, 0);
    assert_eq!(analysis.shortfall, -2);
    assert!(analysis.has_shortfall());
    // February 2025 has only 4 Mondays, so alternates are recommended.
    assert_eq!(analysis.recommendations.len(), 2);
    for recommendation in &analysis.recommendations {
        assert_ne!(recommendation.weekday, Weekday::Mon);
    }
}

#[tokio::test]
async fn test_analysis_without_shortfall_has_no_recommendations() {
    let svc = service();
    let instructor = Uuid::new_v4();
    seed_monthly_mondays(svc.store(), instructor, "2025-02").await;

    let analysis = svc
        .analyze_shortfall(instructor, "2025-02", 4, &[Weekday::Mon])
        .await
        .unwrap();
    assert_eq!(analysis.shortfall, 0);
    assert!(!analysis.has_shortfall());
    assert!(analysis.recommendations.is_empty());
}

#[tokio::test]
async fn test_create_adjustment_marks_row_and_links_booking() {
    let svc = service();
    let instructor = Uuid::new_v4();

    let (id, warnings) = svc
        .create_adjustment_class(&adjustment_request(instructor, "2025-02", 11))
        .await
        .unwrap();
    assert!(warnings.is_empty());

    let rows = svc.store().assignments().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, Some(id));
    assert!(rows[0].is_adjustment);
    assert_eq!(rows[0].adjustment_reason.as_deref(), Some("Calendar shortage"));
    assert_eq!(rows[0].calendar_month.as_deref(), Some("2025-02"));
    assert_eq!(svc.store().links().await.len(), 1);
}

#[tokio::test]
async fn test_create_adjustment_rejects_out_of_month_date() {
    let svc = service();
    let mut request = adjustment_request(Uuid::new_v4(), "2025-02", 11);
    request.date = date(2025, 3, 1);

    let result = svc.create_adjustment_class(&request).await;
    assert!(matches!(
        result,
        Err(CoreError::Domain(DomainError::CalendarMonthViolation { .. }))
    ));
}

#[tokio::test]
async fn test_create_adjustment_rejects_empty_reason() {
    let svc = service();
    let mut request = adjustment_request(Uuid::new_v4(), "2025-02", 11);
    request.reason = String::from("  ");

    let result = svc.create_adjustment_class(&request).await;
    assert!(matches!(
        result,
        Err(CoreError::Domain(DomainError::MissingField {
            field: "adjustment_reason"
        }))
    ));
}

#[tokio::test]
async fn test_create_adjustment_rejects_duplicate() {
    let svc = service();
    let instructor = Uuid::new_v4();
    let request = adjustment_request(instructor, "2025-02", 11);

    svc.create_adjustment_class(&request).await.unwrap();
    let result = svc.create_adjustment_class(&request).await;
    assert!(matches!(result, Err(CoreError::DuplicateAdjustment { .. })));
}

#[tokio::test]
async fn test_fill_shortfall_creates_recommended_dates() {
    let svc = service();
    let instructor = Uuid::new_v4();
    seed_monthly_mondays(svc.store(), instructor, "2025-02").await;

    let analysis = svc
        .analyze_shortfall(instructor, "2025-02", 6, &[Weekday::Mon])
        .await
        .unwrap();
    assert_eq!(analysis.recommendations.len(), 2);

    let base = adjustment_request(instructor, "2025-02", 11);
    let outcome = svc
        .fill_monthly_shortfall(&base, &analysis.recommendations)
        .await;
    assert_eq!(outcome.created, 2);
    assert_eq!(outcome.failed, 0);

    let follow_up = svc
        .analyze_shortfall(instructor, "2025-02", 6, &[Weekday::Mon])
        .await
        .unwrap();
    assert_eq!(follow_up.adjustments, 2);
    assert_eq!(follow_up.shortfall, 0);
    assert!(!follow_up.has_shortfall());
}

#[tokio::test]
async fn test_analyze_with_recommendations_direct() {
    let store = shala_store::MemoryStore::new();
    let instructor = Uuid::new_v4();
    let analysis = analyze_with_recommendations(&store, instructor, "2025-02", 2, &[Weekday::Mon])
        .await
        .unwrap();
    assert_eq!(analysis.scheduled, 0);
    assert_eq!(analysis.shortfall, -2);
    // With nothing scheduled the preferred Mondays themselves still exist,
    // so no alternates are needed.
    assert!(analysis.recommendations.is_empty());

    let (_, warnings) = create_adjustment(
        &store,
        &AdjustmentRequest {
            instructor_id: instructor,
            package_id: Uuid::new_v4(),
            month_key: String::from("2025-02"),
            date: date(2025, 2, 4),
            start_time: time(7, 0),
            end_time: time(8, 0),
            reason: String::from("Operator requested"),
            booking_codes: Vec::new(),
            booking_type: BookingType::Individual,
            payment_amount: 500.0,
            assigned_by: Uuid::new_v4(),
            notes: None,
        },
    )
    .await
    .unwrap();
    assert!(warnings.is_empty());
}
