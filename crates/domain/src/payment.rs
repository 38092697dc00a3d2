// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::PaymentType;

/// Average classes per month for a recurring schedule of `total_classes`.
///
/// Four weeks approximate one month; the floor of 1 keeps the monthly
/// policies from ever dividing by zero.
#[must_use]
pub const fn classes_per_month(total_classes: u32) -> u32 {
    let per_month = total_classes.div_ceil(4);
    if per_month == 0 { 1 } else { per_month }
}

/// Computes the per-class payout for an entered amount under a payment
/// policy.
///
/// Pure and deterministic: the same inputs always yield the same amount.
///
/// | policy | formula |
/// |---|---|
/// | `per_class` | amount |
/// | `per_student_per_class` | amount × students |
/// | `per_member` | (amount × students) ÷ `classes_per_month` |
/// | `monthly` | amount ÷ `classes_per_month` |
/// | `per_class_total` | amount |
/// | `total_duration` | amount ÷ total classes (amount when zero) |
///
/// # Errors
///
/// Returns `DomainError::InvalidPaymentAmount` when the amount is negative
/// or not a finite number.
pub fn calculate_payment_amount(
    payment_type: PaymentType,
    amount: f64,
    total_classes: u32,
    student_count: u32,
) -> Result<f64, DomainError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(DomainError::InvalidPaymentAmount);
    }
    let students = f64::from(student_count.max(1));

    let per_class = match payment_type {
        PaymentType::PerClass | PaymentType::PerClassTotal => amount,
        PaymentType::PerStudentPerClass => amount * students,
        PaymentType::PerMember => {
            (amount * students) / f64::from(classes_per_month(total_classes))
        }
        PaymentType::Monthly => amount / f64::from(classes_per_month(total_classes)),
        PaymentType::TotalDuration => {
            if total_classes == 0 {
                amount
            } else {
                amount / f64::from(total_classes)
            }
        }
    };
    Ok(per_class)
}
