// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::{parse_date, parse_time};
use crate::error::DomainError;
use crate::types::{AssignmentKind, BookingType};
use uuid::Uuid;

/// Checks whether a string is a well-formed UUID.
///
/// Fail closed: anything that does not parse returns `false`.
#[must_use]
pub fn is_valid_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

/// Checks whether a string is a valid `YYYY-MM-DD` date.
///
/// Fail closed: anything that does not parse returns `false`.
#[must_use]
pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_ok()
}

/// Checks whether a string is a valid `HH:MM` or `HH:MM:SS` time.
///
/// Fail closed: anything that does not parse returns `false`.
#[must_use]
pub fn is_valid_time(value: &str) -> bool {
    parse_time(value).is_ok()
}

/// Drops empty and placeholder booking codes and trims the rest.
///
/// Form state can carry `""`, `"null"`, or `"undefined"` entries for
/// unselected rows; none of those name a booking.
#[must_use]
pub fn clean_booking_codes(codes: &[String]) -> Vec<String> {
    codes
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty() && *code != "null" && *code != "undefined")
        .map(ToString::to_string)
        .collect()
}

/// Whether an assignment kind + booking type combination admits more than
/// one linked booking.
///
/// Individual bookings are always single. Private groups are single for
/// adhoc sessions only. Everything else admits multiple bookings.
#[must_use]
pub const fn allows_multiple_bookings(kind: AssignmentKind, booking_type: BookingType) -> bool {
    match booking_type {
        BookingType::Individual => false,
        BookingType::PrivateGroup => !matches!(kind, AssignmentKind::Adhoc),
        BookingType::Corporate | BookingType::PublicGroup => true,
    }
}

/// Validates the booking-count invariant for an assignment kind.
///
/// # Errors
///
/// Returns `DomainError::TooManyBookings` when more than one booking is
/// supplied for a combination that admits only one.
pub const fn validate_booking_cardinality(
    count: usize,
    kind: AssignmentKind,
    booking_type: BookingType,
) -> Result<(), DomainError> {
    if count > 1 && !allows_multiple_bookings(kind, booking_type) {
        return Err(DomainError::TooManyBookings { count });
    }
    Ok(())
}
