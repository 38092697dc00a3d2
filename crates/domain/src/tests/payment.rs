// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, PaymentType, calculate_payment_amount, classes_per_month};

fn amount(payment_type: PaymentType, entered: f64, total: u32, students: u32) -> f64 {
    calculate_payment_amount(payment_type, entered, total, students).unwrap()
}

#[test]
fn test_per_class_is_amount_as_entered() {
    assert!((amount(PaymentType::PerClass, 500.0, 12, 3) - 500.0).abs() < f64::EPSILON);
}

#[test]
fn test_per_class_total_is_amount_as_entered() {
    assert!((amount(PaymentType::PerClassTotal, 1200.0, 8, 5) - 1200.0).abs() < f64::EPSILON);
}

#[test]
fn test_per_student_per_class_multiplies_students() {
    assert!((amount(PaymentType::PerStudentPerClass, 200.0, 12, 4) - 800.0).abs() < f64::EPSILON);
}

#[test]
fn test_per_member_divides_by_classes_per_month() {
    // 12 classes -> ceil(12/4) = 3 classes per month.
    let result = amount(PaymentType::PerMember, 3000.0, 12, 2);
    assert!((result - 2000.0).abs() < f64::EPSILON);
}

#[test]
fn test_monthly_divides_by_classes_per_month() {
    // 10 classes -> ceil(10/4) = 3.
    let result = amount(PaymentType::Monthly, 9000.0, 10, 1);
    assert!((result - 3000.0).abs() < f64::EPSILON);
}

#[test]
fn test_monthly_never_divides_by_zero() {
    // Zero classes floors at one class per month.
    let result = amount(PaymentType::Monthly, 4000.0, 0, 1);
    assert!((result - 4000.0).abs() < f64::EPSILON);
}

#[test]
fn test_total_duration_divides_by_total_classes() {
    let result = amount(PaymentType::TotalDuration, 6000.0, 12, 1);
    assert!((result - 500.0).abs() < f64::EPSILON);
}

#[test]
fn test_total_duration_with_zero_classes_returns_amount() {
    let result = amount(PaymentType::TotalDuration, 6000.0, 0, 1);
    assert!((result - 6000.0).abs() < f64::EPSILON);
}

#[test]
fn test_rejects_negative_amount() {
    assert!(matches!(
        calculate_payment_amount(PaymentType::PerClass, -1.0, 4, 1),
        Err(DomainError::InvalidPaymentAmount)
    ));
}

#[test]
fn test_rejects_non_finite_amount() {
    assert!(calculate_payment_amount(PaymentType::PerClass, f64::NAN, 4, 1).is_err());
    assert!(calculate_payment_amount(PaymentType::PerClass, f64::INFINITY, 4, 1).is_err());
}

#[test]
fn test_is_deterministic() {
    let first = amount(PaymentType::PerMember, 2500.0, 9, 3);
    let second = amount(PaymentType::PerMember, 2500.0, 9, 3);
    assert!((first - second).abs() < f64::EPSILON);
}

#[test]
fn test_classes_per_month_floors_at_one() {
    assert_eq!(classes_per_month(0), 1);
    assert_eq!(classes_per_month(1), 1);
    assert_eq!(classes_per_month(4), 1);
    assert_eq!(classes_per_month(5), 2);
    assert_eq!(classes_per_month(12), 3);
}
