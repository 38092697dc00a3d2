// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly billing math: first-month proration, tax, and invoice layout.
//!
//! Billing follows calendar months, never rolling 30-day windows. The first
//! month is always prorated by the remaining eligible days from the start
//! date; later months bill the full monthly rate.

use crate::dates::{
    MonthBoundaries, month_boundaries, month_boundaries_for_key, month_key,
    remaining_days_in_month,
};
use crate::error::DomainError;
use chrono::{Days, NaiveDate};
use uuid::Uuid;

/// Default GST rate applied to invoices, percent.
pub const DEFAULT_TAX_RATE: f64 = 18.0;
/// Default grace period between invoice issue and due date, days.
pub const DEFAULT_GRACE_PERIOD_DAYS: u32 = 7;
/// Billing currency.
pub const CURRENCY: &str = "INR";
/// Invoice number prefix.
pub const INVOICE_PREFIX: &str = "SH";

/// First-month proration breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Proration {
    /// Billable days from the start date through month end.
    pub eligible_days: u32,
    /// Total days in the month.
    pub days_in_month: u32,
    /// The prorated amount, rounded to 2 decimals.
    pub prorated_amount: f64,
    /// The full monthly amount.
    pub full_amount: f64,
    /// Proration percentage, rounded to 2 decimals.
    pub percentage: f64,
    /// Human-readable proration note.
    pub note: String,
}

/// An amount with tax applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxedAmount {
    /// The base amount, rounded to 2 decimals.
    pub base: f64,
    /// The tax amount, rounded to 2 decimals.
    pub tax: f64,
    /// Base plus tax, rounded to 2 decimals.
    pub total: f64,
}

/// Inputs for a monthly invoice calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTerms {
    /// The billed booking's external code.
    pub booking_code: String,
    /// The billed client, when known.
    pub user_id: Option<Uuid>,
    /// The billing cycle anchor (subscription start date).
    pub start_date: NaiveDate,
    /// Full monthly price.
    pub monthly_price: f64,
    /// Tax rate, percent.
    pub tax_rate: f64,
    /// Days between month start and the due date.
    pub grace_period_days: u32,
}

impl InvoiceTerms {
    /// Creates terms with the default tax rate and grace period.
    #[must_use]
    pub const fn new(
        booking_code: String,
        user_id: Option<Uuid>,
        start_date: NaiveDate,
        monthly_price: f64,
    ) -> Self {
        Self {
            booking_code,
            user_id,
            start_date,
            monthly_price,
            tax_rate: DEFAULT_TAX_RATE,
            grace_period_days: DEFAULT_GRACE_PERIOD_DAYS,
        }
    }
}

/// A fully computed invoice for one booking and calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceCalculation {
    /// The billed booking's external code.
    pub booking_code: String,
    /// The billed client, when known.
    pub user_id: Option<Uuid>,
    /// The billed month key (`YYYY-MM`).
    pub calendar_month: String,
    /// First day of the billing period.
    pub period_start: NaiveDate,
    /// Last day of the billing period.
    pub period_end: NaiveDate,
    /// Base amount before tax.
    pub base_amount: f64,
    /// Applied tax rate, percent.
    pub tax_rate: f64,
    /// Tax amount.
    pub tax_amount: f64,
    /// Amount due.
    pub total_amount: f64,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Whether this is the first (prorated) billing month.
    pub is_first_month: bool,
    /// Proration breakdown, first month only.
    pub proration: Option<Proration>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the first-month proration for a subscription start date.
#[must_use]
pub fn first_month_proration(start: NaiveDate, monthly_price: f64) -> Proration {
    let bounds: MonthBoundaries = month_boundaries(start);
    let eligible_days = remaining_days_in_month(start);
    let fraction = f64::from(eligible_days) / f64::from(bounds.days_in_month);
    Proration {
        eligible_days,
        days_in_month: bounds.days_in_month,
        prorated_amount: round2(monthly_price * fraction),
        full_amount: monthly_price,
        percentage: round2(fraction * 100.0),
        note: format!(
            "Prorated: {eligible_days}/{} days of {}",
            bounds.days_in_month, bounds.month_key
        ),
    }
}

/// Applies a percentage tax rate to a base amount.
#[must_use]
pub fn with_tax(base: f64, rate: f64) -> TaxedAmount {
    let tax = round2(base * (rate / 100.0));
    TaxedAmount {
        base: round2(base),
        tax,
        total: round2(base + tax),
    }
}

/// Whether a month key names the subscription's first billing month.
#[must_use]
pub fn is_first_billing_month(start: NaiveDate, key: &str) -> bool {
    month_key(start) == key
}

/// Formats an invoice number: `SH-YYYYMM-NNNN`.
#[must_use]
pub fn invoice_number(key: &str, sequence: u32) -> String {
    let compact: String = key.chars().filter(char::is_ascii_digit).collect();
    format!("{INVOICE_PREFIX}-{compact}-{sequence:04}")
}

/// Calculates the invoice for one booking and calendar month.
///
/// The first billing month is prorated; any later month bills the full
/// monthly rate. The due date is the month start plus the grace period.
///
/// # Errors
///
/// Returns an error when the month key is malformed.
pub fn calculate_monthly_invoice(
    terms: &InvoiceTerms,
    key: &str,
) -> Result<InvoiceCalculation, DomainError> {
    let bounds = month_boundaries_for_key(key)?;
    let is_first = is_first_billing_month(terms.start_date, key);

    let (base, proration) = if is_first {
        let proration = first_month_proration(terms.start_date, terms.monthly_price);
        (proration.prorated_amount, Some(proration))
    } else {
        (terms.monthly_price, None)
    };

    let amounts = with_tax(base, terms.tax_rate);
    let due_date = bounds.start + Days::new(u64::from(terms.grace_period_days));

    Ok(InvoiceCalculation {
        booking_code: terms.booking_code.clone(),
        user_id: terms.user_id,
        calendar_month: bounds.month_key,
        period_start: bounds.start,
        period_end: bounds.end,
        base_amount: amounts.base,
        tax_rate: terms.tax_rate,
        tax_amount: amounts.tax,
        total_amount: amounts.total,
        due_date,
        is_first_month: is_first,
        proration,
    })
}
