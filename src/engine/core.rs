//! Main engine orchestrator that coordinates parsing, candidate search,
//! and the match lifecycle

use chrono::{Months, NaiveDate};
use std::collections::HashMap;

use crate::engine::MatchManager;
use crate::matching;
use crate::report;
use crate::statement;
use crate::traits::*;
use crate::types::*;

/// How far back the candidate payment pool reaches, in months
pub const LOOKBACK_MONTHS: u32 = 6;

/// Reconciliation engine that ties the components together.
///
/// Each public operation is a synchronous unit of work over the match
/// storage and the external payment pool; the engine holds no session
/// state of its own. Parsed rows and candidate maps belong to the
/// caller's reconciliation session.
pub struct ReconciliationEngine<S: MatchStorage, P: PaymentPool> {
    match_manager: MatchManager<S>,
    pool: P,
}

impl<S: MatchStorage, P: PaymentPool> ReconciliationEngine<S, P> {
    /// Create a new engine with the given match storage and payment pool
    pub fn new(storage: S, pool: P) -> Self {
        Self {
            match_manager: MatchManager::new(storage),
            pool,
        }
    }

    /// Create a new engine with a custom match validator
    pub fn with_validator(storage: S, pool: P, validator: Box<dyn MatchValidator>) -> Self {
        Self {
            match_manager: MatchManager::with_validator(storage, validator),
            pool,
        }
    }

    // Statement operations
    /// Parse raw statement text into rows and per-line errors
    pub fn parse_statement(&self, raw: &str) -> ParsedStatement {
        statement::parse(raw)
    }

    /// Fetch the eligible payment pool and build a ranked candidate
    /// shortlist for every statement row.
    ///
    /// The pool is restricted to unreconciled payments dated within the
    /// last six months of `as_of`, scoped to `project_id` when given.
    pub async fn suggest_candidates(
        &self,
        rows: &[StatementRow],
        project_id: Option<&str>,
        as_of: NaiveDate,
    ) -> ReconcileResult<HashMap<usize, Vec<ScoredCandidate>>> {
        let date_from = as_of
            .checked_sub_months(Months::new(LOOKBACK_MONTHS))
            .unwrap_or(NaiveDate::MIN);
        let pool = self
            .pool
            .unreconciled_payments(project_id, date_from)
            .await?;

        Ok(matching::find_candidates(rows, &pool))
    }

    // Match lifecycle operations
    /// Persist an operator-confirmed candidate as a match
    pub async fn confirm_match(
        &mut self,
        project_id: Option<String>,
        row: &StatementRow,
        matched_payment_id: &str,
        confidence: u8,
        created_by: &str,
    ) -> ReconcileResult<ReconciliationMatch> {
        self.match_manager
            .create_match(project_id, row, matched_payment_id, confidence, created_by)
            .await
    }

    /// Get a match by ID
    pub async fn get_match(
        &self,
        match_id: &str,
    ) -> ReconcileResult<Option<ReconciliationMatch>> {
        self.match_manager.get_match(match_id).await
    }

    /// Apply a status transition to a single match
    pub async fn update_status(
        &mut self,
        match_id: &str,
        new_status: MatchStatus,
        notes: Option<String>,
        acting_user: &str,
    ) -> ReconcileResult<ReconciliationMatch> {
        self.match_manager
            .update_status(match_id, new_status, notes, acting_user)
            .await
    }

    /// Apply a status transition to each ID independently, reporting
    /// partial success
    pub async fn bulk_update_status(
        &mut self,
        match_ids: &[String],
        new_status: MatchStatus,
        acting_user: &str,
    ) -> BulkStatusOutcome {
        self.match_manager
            .bulk_update_status(match_ids, new_status, acting_user)
            .await
    }

    /// Hard-delete a match
    pub async fn delete_match(&mut self, match_id: &str) -> ReconcileResult<()> {
        self.match_manager.delete_match(match_id).await
    }

    /// List matches satisfying the filter
    pub async fn list_matches(
        &self,
        filter: &MatchFilter,
    ) -> ReconcileResult<Vec<ReconciliationMatch>> {
        self.match_manager.list_matches(filter).await
    }

    // Reporting operations
    /// Compute per-status counts and sums over the filtered match set
    pub async fn summarize(&self, filter: &MatchFilter) -> ReconcileResult<ReconciliationSummary> {
        let matches = self.match_manager.list_matches(filter).await?;
        Ok(report::summary::summarize(&matches))
    }

    /// Export the filtered match set as BOM-prefixed CSV bytes
    pub async fn export_csv(&self, filter: &MatchFilter) -> ReconcileResult<Vec<u8>> {
        let matches = self.match_manager.list_matches(filter).await?;
        report::export::export_matches(&matches)
    }
}
