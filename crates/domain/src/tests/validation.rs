// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AssignmentKind, BookingType, DomainError, allows_multiple_bookings, clean_booking_codes,
    is_valid_date, is_valid_time, is_valid_uuid, validate_booking_cardinality,
};

#[test]
fn test_is_valid_uuid() {
    assert!(is_valid_uuid("2f1b0a6e-9f2d-4c3b-8a1e-5d6c7b8a9f0e"));
    assert!(!is_valid_uuid(""));
    assert!(!is_valid_uuid("not-a-uuid"));
    assert!(!is_valid_uuid("2f1b0a6e-9f2d-4c3b-8a1e"));
}

#[test]
fn test_is_valid_date_fails_closed() {
    assert!(is_valid_date("2025-04-30"));
    assert!(!is_valid_date("2025-04-31"));
    assert!(!is_valid_date("30-04-2025"));
    assert!(!is_valid_date(""));
}

#[test]
fn test_is_valid_time_fails_closed() {
    assert!(is_valid_time("06:00"));
    assert!(is_valid_time("22:00:00"));
    assert!(!is_valid_time("25:00"));
    assert!(!is_valid_time("six"));
}

#[test]
fn test_validators_are_idempotent() {
    // Same input, same answer, every time.
    for _ in 0..2 {
        assert!(is_valid_uuid("2f1b0a6e-9f2d-4c3b-8a1e-5d6c7b8a9f0e"));
        assert!(is_valid_date("2025-04-30"));
        assert!(!is_valid_time("25:00"));
    }
}

#[test]
fn test_clean_booking_codes_drops_placeholders() {
    let raw = vec![
        String::from(" SH-20250101-0001 "),
        String::new(),
        String::from("null"),
        String::from("undefined"),
        String::from("   "),
        String::from("SH-20250101-0002"),
    ];
    assert_eq!(
        clean_booking_codes(&raw),
        vec![
            String::from("SH-20250101-0001"),
            String::from("SH-20250101-0002")
        ]
    );
}

#[test]
fn test_individual_bookings_are_always_single() {
    for kind in [
        AssignmentKind::Adhoc,
        AssignmentKind::Weekly,
        AssignmentKind::Monthly,
        AssignmentKind::CrashCourse,
        AssignmentKind::Package,
    ] {
        assert!(!allows_multiple_bookings(kind, BookingType::Individual));
    }
}

#[test]
fn test_private_group_single_for_adhoc_only() {
    assert!(!allows_multiple_bookings(
        AssignmentKind::Adhoc,
        BookingType::PrivateGroup
    ));
    assert!(allows_multiple_bookings(
        AssignmentKind::Monthly,
        BookingType::PrivateGroup
    ));
    assert!(allows_multiple_bookings(
        AssignmentKind::CrashCourse,
        BookingType::PrivateGroup
    ));
}

#[test]
fn test_corporate_and_public_group_allow_multiple() {
    assert!(allows_multiple_bookings(
        AssignmentKind::Adhoc,
        BookingType::Corporate
    ));
    assert!(allows_multiple_bookings(
        AssignmentKind::Weekly,
        BookingType::PublicGroup
    ));
}

#[test]
fn test_two_bookings_adhoc_private_group_is_rejected() {
    let result =
        validate_booking_cardinality(2, AssignmentKind::Adhoc, BookingType::PrivateGroup);
    assert!(matches!(result, Err(DomainError::TooManyBookings { count: 2 })));
}

#[test]
fn test_single_booking_always_passes_cardinality() {
    assert!(validate_booking_cardinality(1, AssignmentKind::Adhoc, BookingType::Individual).is_ok());
    assert!(
        validate_booking_cardinality(1, AssignmentKind::Monthly, BookingType::Individual).is_ok()
    );
}

#[test]
fn test_multiple_bookings_pass_where_allowed() {
    assert!(
        validate_booking_cardinality(3, AssignmentKind::Monthly, BookingType::Corporate).is_ok()
    );
}
