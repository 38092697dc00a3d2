// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! First-month invoice generation for monthly subscriptions.
//!
//! Runs after monthly assignments are persisted. Everything here is
//! best-effort: an invoice that cannot be generated is reported as a
//! warning and can be regenerated later, it never unwinds the created
//! assignments.

use crate::error::{SideEffectStep, SideEffectWarning};
use chrono::NaiveDate;
use shala_domain::{InvoiceTerms, calculate_monthly_invoice, month_key};
use shala_store::StoreClient;
use tracing::{info, warn};
use uuid::Uuid;

/// Generates the prorated first-month invoice for each booking.
///
/// Sets the billing cycle anchor, computes the prorated amount with tax for
/// the start month, and invokes the platform's invoice function. Failures
/// are collected as warnings, one per degraded step.
pub async fn generate_first_month_invoices<S: StoreClient>(
    store: &S,
    booking_codes: &[String],
    start_date: NaiveDate,
    package_id: Uuid,
) -> Vec<SideEffectWarning> {
    let mut warnings = Vec::new();
    if booking_codes.is_empty() {
        return warnings;
    }

    let package = match store.fetch_package(package_id).await {
        Ok(Some(package)) => package,
        Ok(None) => {
            warnings.push(SideEffectWarning::new(
                SideEffectStep::Invoice,
                format!("package {package_id} not found; invoices skipped"),
            ));
            return warnings;
        }
        Err(err) => {
            warnings.push(SideEffectWarning::new(
                SideEffectStep::Invoice,
                format!("failed to load package {package_id}: {err}"),
            ));
            return warnings;
        }
    };

    let first_month = month_key(start_date);
    info!(
        bookings = booking_codes.len(),
        month = %first_month,
        monthly_price = package.price,
        "generating first month invoices"
    );

    for code in booking_codes {
        let user_id = match store.fetch_bookings(std::slice::from_ref(code)).await {
            Ok(rows) => rows.first().and_then(|booking| booking.user_id),
            Err(err) => {
                warnings.push(SideEffectWarning::new(
                    SideEffectStep::Invoice,
                    format!("could not load booking {code} for invoicing: {err}"),
                ));
                continue;
            }
        };

        if let Err(err) = store.set_billing_anchor(code, start_date).await {
            warnings.push(SideEffectWarning::new(
                SideEffectStep::BillingAnchor,
                format!("failed to set billing anchor for {code}: {err}"),
            ));
        }

        let terms = InvoiceTerms::new(code.clone(), user_id, start_date, package.price);
        let invoice = match calculate_monthly_invoice(&terms, &first_month) {
            Ok(invoice) => invoice,
            Err(err) => {
                warnings.push(SideEffectWarning::new(
                    SideEffectStep::Invoice,
                    format!("invoice calculation failed for {code}: {err}"),
                ));
                continue;
            }
        };

        match store.create_invoice(&invoice).await {
            Ok(()) => info!(booking = %code, total = invoice.total_amount, "first month invoice created"),
            Err(err) => {
                warn!(booking = %code, error = %err, "first month invoice failed");
                warnings.push(SideEffectWarning::new(
                    SideEffectStep::Invoice,
                    format!("invoice generation failed for {code}: {err}"),
                ));
            }
        }
    }

    warnings
}
