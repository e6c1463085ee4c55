//! Traits for storage abstraction and external collaborators

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::*;

/// Storage abstraction for reconciliation matches
///
/// This trait lets the engine work with any storage backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these
/// methods. Each method is a single-record transactional unit; backends
/// that talk to a remote store should surface unavailability as
/// `ReconcileError::Storage` and leave retries to the caller.
#[async_trait]
pub trait MatchStorage: Send + Sync {
    /// Save a newly created match
    async fn save_match(&mut self, m: &ReconciliationMatch) -> ReconcileResult<()>;

    /// Get a match by ID
    async fn get_match(&self, match_id: &str) -> ReconcileResult<Option<ReconciliationMatch>>;

    /// Update an existing match
    async fn update_match(&mut self, m: &ReconciliationMatch) -> ReconcileResult<()>;

    /// Hard-delete a match
    async fn delete_match(&mut self, match_id: &str) -> ReconcileResult<()>;

    /// List matches satisfying the filter, ordered by creation time descending
    async fn list_matches(&self, filter: &MatchFilter)
        -> ReconcileResult<Vec<ReconciliationMatch>>;

    /// Find an active (non-rejected) match already attached to a payment
    async fn find_active_match_for_payment(
        &self,
        payment_id: &str,
    ) -> ReconcileResult<Option<ReconciliationMatch>>;
}

/// Read-side collaborator contract for the external payment ledger.
///
/// Implementations must return only payments with `reconciled = false`
/// and `payment_date >= date_from`, scoped to `project_id` when one is
/// given. The engine never writes through this trait; flipping a
/// payment's reconciled flag once its match is reviewed is a host-system
/// integration point.
#[async_trait]
pub trait PaymentPool: Send + Sync {
    /// Fetch the unreconciled payments eligible as match candidates
    async fn unreconciled_payments(
        &self,
        project_id: Option<&str>,
        date_from: NaiveDate,
    ) -> ReconcileResult<Vec<PaymentRecord>>;
}

/// Trait for implementing custom match validation rules
pub trait MatchValidator: Send + Sync {
    /// Validate the inputs of a match before it is created
    fn validate_create(
        &self,
        row: &StatementRow,
        payment_id: &str,
        confidence: u8,
        created_by: &str,
    ) -> ReconcileResult<()>;
}

/// Default match validator with the baseline creation rules
pub struct DefaultMatchValidator;

impl MatchValidator for DefaultMatchValidator {
    fn validate_create(
        &self,
        row: &StatementRow,
        payment_id: &str,
        confidence: u8,
        created_by: &str,
    ) -> ReconcileResult<()> {
        crate::utils::validation::validate_confidence(confidence)?;
        crate::utils::validation::validate_bank_row(row)?;

        if payment_id.trim().is_empty() {
            return Err(ReconcileError::Validation(
                "Matched payment ID cannot be empty".to_string(),
            ));
        }

        if created_by.trim().is_empty() {
            return Err(ReconcileError::Validation(
                "Creating user cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
