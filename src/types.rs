//! Core types and data structures for the reconciliation engine

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One transaction line from an imported bank statement.
///
/// Statement rows are ephemeral: they live for a single reconciliation
/// session and are never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Date the transaction appeared on the statement
    pub date: NaiveDate,
    /// Free-text description from the bank
    pub description: String,
    /// Signed amount in currency units
    pub amount: BigDecimal,
    /// Optional bank reference code
    pub reference: Option<String>,
    /// Optional account identifier from the statement
    pub account: Option<String>,
}

impl StatementRow {
    /// Create a new statement row
    pub fn new(
        date: NaiveDate,
        description: String,
        amount: BigDecimal,
        reference: Option<String>,
        account: Option<String>,
    ) -> Self {
        Self {
            date,
            description,
            amount,
            reference,
            account,
        }
    }
}

/// A payment record from the external payment ledger.
///
/// Read-only to this engine: payments are created by billing workflows
/// elsewhere and surfaced here only as match candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Opaque identifier assigned by the payment ledger
    pub id: String,
    /// Payment amount in currency units
    pub amount: BigDecimal,
    /// Date the payment was recorded
    pub payment_date: NaiveDate,
    /// Optional reference number (receipt number, transfer reference, etc.)
    pub reference_number: Option<String>,
    /// Optional unit the payment belongs to
    pub unit_id: Option<String>,
    /// Optional bill the payment settles
    pub bill_id: Option<String>,
    /// Project scoping key
    pub project_id: Option<String>,
    /// Whether the payment has already been reconciled
    pub reconciled: bool,
}

/// Lifecycle status of a reconciliation match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Reserved for direct-import flows; never produced by candidate confirmation
    Pending,
    /// Initial status when an operator confirms a candidate
    Matched,
    /// Terminal: the match was reviewed and accepted
    Reviewed,
    /// Terminal: the match was reviewed and rejected
    Rejected,
}

impl MatchStatus {
    /// Whether a transition from `self` to `to` is permitted.
    ///
    /// The table is closed: only `Matched -> Reviewed` and
    /// `Matched -> Rejected` exist. `Pending` matches cannot move until
    /// a promotion path is defined for direct-import flows.
    pub fn can_transition_to(&self, to: MatchStatus) -> bool {
        matches!(
            (self, to),
            (MatchStatus::Matched, MatchStatus::Reviewed)
                | (MatchStatus::Matched, MatchStatus::Rejected)
        )
    }

    /// Terminal statuses permit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Reviewed | MatchStatus::Rejected)
    }

    /// Lowercase label used in exports
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Matched => "matched",
            MatchStatus::Reviewed => "reviewed",
            MatchStatus::Rejected => "rejected",
        }
    }
}

/// Persisted record of a bank-row-to-payment pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationMatch {
    /// Unique identifier for the match
    pub id: String,
    /// Project scope; None means cross-project/admin scope
    pub project_id: Option<String>,
    /// Date of the bank statement row
    pub bank_date: NaiveDate,
    /// Description from the bank statement row
    pub bank_description: String,
    /// Amount from the bank statement row
    pub bank_amount: BigDecimal,
    /// Reference from the bank statement row, if any
    pub bank_reference: Option<String>,
    /// Account from the bank statement row, if any
    pub bank_account: Option<String>,
    /// Identifier of the matched payment record
    pub matched_payment_id: String,
    /// Confidence score fixed at creation time; never re-derived
    pub match_confidence: u8,
    /// Current lifecycle status
    pub status: MatchStatus,
    /// Optional reviewer notes recorded on status changes
    pub notes: Option<String>,
    /// User who confirmed the match
    pub created_by: String,
    /// User who performed the most recent status change
    pub reviewed_by: Option<String>,
    /// When the match was created
    pub created_at: NaiveDateTime,
    /// When the match was last updated
    pub updated_at: NaiveDateTime,
}

impl ReconciliationMatch {
    /// Create a new match in the initial `Matched` status
    pub fn new(
        project_id: Option<String>,
        row: &StatementRow,
        matched_payment_id: String,
        match_confidence: u8,
        created_by: String,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id,
            bank_date: row.date,
            bank_description: row.description.clone(),
            bank_amount: row.amount.clone(),
            bank_reference: row.reference.clone(),
            bank_account: row.account.clone(),
            matched_payment_id,
            match_confidence,
            status: MatchStatus::Matched,
            notes: None,
            created_by,
            reviewed_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this match still blocks its payment from being matched again
    pub fn is_active(&self) -> bool {
        self.status != MatchStatus::Rejected
    }
}

/// Filters for listing matches; all criteria are optional and conjunctive
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchFilter {
    /// Restrict to a project scope
    pub project_id: Option<String>,
    /// Restrict to a single status
    pub status: Option<MatchStatus>,
    /// Earliest bank date, inclusive
    pub date_from: Option<NaiveDate>,
    /// Latest bank date, inclusive
    pub date_to: Option<NaiveDate>,
    /// Minimum confidence score, inclusive
    pub min_confidence: Option<u8>,
}

impl MatchFilter {
    /// Whether a match satisfies every set criterion
    pub fn matches(&self, m: &ReconciliationMatch) -> bool {
        if let Some(ref project_id) = self.project_id {
            if m.project_id.as_deref() != Some(project_id.as_str()) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if m.status != status {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if m.bank_date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if m.bank_date > to {
                return false;
            }
        }
        if let Some(min) = self.min_confidence {
            if m.match_confidence < min {
                return false;
            }
        }
        true
    }
}

/// A payment proposed as a possible match for a bank row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The candidate payment
    pub payment: PaymentRecord,
    /// Heuristic confidence score, 0 to 100
    pub confidence: u8,
}

/// A single malformed statement line, reported alongside the parsed rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseError {
    /// 1-based line number within the raw statement text
    pub line: usize,
    /// Human-readable description of the problem
    pub message: String,
}

/// Partial-success result of parsing a statement: salvageable rows plus
/// the errors for lines that could not be parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStatement {
    /// Successfully parsed rows, in statement order
    pub rows: Vec<StatementRow>,
    /// Errors for lines that were dropped
    pub errors: Vec<ParseError>,
}

/// Per-id outcome of a bulk status update.
///
/// Every input id appears exactly once, in `succeeded` or in `failed`;
/// one id's failure never rolls back the others.
#[derive(Debug)]
pub struct BulkStatusOutcome {
    /// Ids whose status change was persisted
    pub succeeded: Vec<String>,
    /// Ids that failed, with the error for each
    pub failed: Vec<(String, ReconcileError)>,
}

/// Count and amount totals for one status bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    /// Number of matches in this status
    pub count: usize,
    /// Sum of bank amounts for matches in this status
    pub total_amount: BigDecimal,
}

/// Derived counts and sums over a filtered match set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    /// Totals grouped by status
    pub by_status: std::collections::HashMap<MatchStatus, StatusSummary>,
    /// Overall match count
    pub total_count: usize,
    /// Overall sum of bank amounts
    pub total_amount: BigDecimal,
}

/// Errors that can occur in the reconciliation engine
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Match not found: {0}")]
    MatchNotFound(String),
    #[error("Invalid status transition from {from:?} to {to:?}")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },
    #[error("Payment {0} is already attached to an active match")]
    Conflict(String),
    #[error("Export error: {0}")]
    Export(String),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
