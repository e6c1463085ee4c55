//! Per-status counts and sums over a match set

use bigdecimal::BigDecimal;
use std::collections::HashMap;

use crate::types::{ReconciliationMatch, ReconciliationSummary, StatusSummary};

/// Fold a listed match set into per-status and overall totals.
///
/// Pure read-side aggregation: the caller supplies the (already
/// filtered) matches, typically straight from a `list_matches` call.
pub fn summarize(matches: &[ReconciliationMatch]) -> ReconciliationSummary {
    let mut by_status: HashMap<_, StatusSummary> = HashMap::new();
    let mut total_amount = BigDecimal::from(0);

    for m in matches {
        let bucket = by_status.entry(m.status).or_insert_with(|| StatusSummary {
            count: 0,
            total_amount: BigDecimal::from(0),
        });
        bucket.count += 1;
        bucket.total_amount += &m.bank_amount;
        total_amount += &m.bank_amount;
    }

    ReconciliationSummary {
        by_status,
        total_count: matches.len(),
        total_amount,
    }
}
