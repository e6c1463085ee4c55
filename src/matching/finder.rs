//! Candidate search over the unreconciled payment pool
//!
//! Pool-agnostic: the caller supplies payments already restricted to
//! `reconciled = false`, the lookback window, and the active project
//! scope (see [`crate::traits::PaymentPool`]).

use std::collections::HashMap;

use crate::matching::scorer;
use crate::types::{PaymentRecord, ScoredCandidate, StatementRow};

/// Candidates below this confidence are noise and never surfaced
pub const MIN_CONFIDENCE: u8 = 30;
/// Maximum candidates returned per statement row
pub const MAX_CANDIDATES: usize = 5;

/// Score every pool payment against every statement row and return a
/// ranked shortlist per row index.
///
/// Each row index appears in the result, with an empty list when no
/// payment reaches the confidence threshold, so callers can distinguish
/// "row with no suggestions" from a missing row. Candidates are ordered
/// by confidence descending, ties broken by payment id ascending for
/// deterministic output.
pub fn find_candidates(
    rows: &[StatementRow],
    pool: &[PaymentRecord],
) -> HashMap<usize, Vec<ScoredCandidate>> {
    let mut result = HashMap::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let mut candidates: Vec<ScoredCandidate> = pool
            .iter()
            .map(|payment| ScoredCandidate {
                payment: payment.clone(),
                confidence: scorer::score(row, payment),
            })
            .filter(|candidate| candidate.confidence >= MIN_CONFIDENCE)
            .collect();

        candidates.sort_by(|a, b| {
            b.confidence
                .cmp(&a.confidence)
                .then_with(|| a.payment.id.cmp(&b.payment.id))
        });
        candidates.truncate(MAX_CANDIDATES);

        result.insert(index, candidates);
    }

    result
}
