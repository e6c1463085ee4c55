//! Match confidence scoring
//!
//! A pure, deterministic heuristic: four independent boolean signals,
//! each contributing a fixed weight, summed and clamped to 100. The
//! score is a rule table, not a probability; it must not be
//! renormalized or reinterpreted statistically.

use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::types::{PaymentRecord, StatementRow};

/// Weight for an exact amount match (absolute difference under one cent)
pub const AMOUNT_MATCH_WEIGHT: u8 = 40;
/// Weight for date proximity (within three calendar days, inclusive)
pub const DATE_PROXIMITY_WEIGHT: u8 = 30;
/// Weight for a reference substring match (case-sensitive)
pub const REFERENCE_MATCH_WEIGHT: u8 = 20;
/// Weight for a description/reference cross match (case-insensitive)
pub const DESCRIPTION_MATCH_WEIGHT: u8 = 10;

/// Maximum score after clamping
pub const MAX_SCORE: u8 = 100;

/// Date window for the proximity signal, in days
const DATE_WINDOW_DAYS: i64 = 3;

/// Compute the 0-100 match confidence between a bank row and a payment.
///
/// Signals are independent and additive:
/// amount +40, date proximity +30, reference substring +20,
/// description/reference cross match +10.
pub fn score(row: &StatementRow, payment: &PaymentRecord) -> u8 {
    let mut total: u32 = 0;

    if amounts_match(&row.amount, &payment.amount) {
        total += AMOUNT_MATCH_WEIGHT as u32;
    }

    if (row.date - payment.payment_date).num_days().abs() <= DATE_WINDOW_DAYS {
        total += DATE_PROXIMITY_WEIGHT as u32;
    }

    if let (Some(bank_ref), Some(payment_ref)) =
        (row.reference.as_deref(), payment.reference_number.as_deref())
    {
        // Case-sensitive on purpose; the reference number is an exact code.
        if contains_either(bank_ref, payment_ref) {
            total += REFERENCE_MATCH_WEIGHT as u32;
        }
    }

    if let Some(payment_ref) = payment.reference_number.as_deref() {
        let description = row.description.to_lowercase();
        let payment_ref = payment_ref.to_lowercase();
        if !description.is_empty()
            && !payment_ref.is_empty()
            && contains_either(&description, &payment_ref)
        {
            total += DESCRIPTION_MATCH_WEIGHT as u32;
        }
    }

    total.min(MAX_SCORE as u32) as u8
}

fn amounts_match(a: &BigDecimal, b: &BigDecimal) -> bool {
    // One-cent tolerance; exact string is fine since the tolerance is fixed.
    let tolerance = BigDecimal::from_str("0.01").unwrap_or_else(|_| BigDecimal::from(0));
    (a - b).abs() < tolerance
}

fn contains_either(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}
