//! Match lifecycle management

use crate::traits::*;
use crate::types::*;

/// Match manager for handling the match store and its status lifecycle
pub struct MatchManager<S: MatchStorage> {
    pub(crate) storage: S,
    validator: Box<dyn MatchValidator>,
}

impl<S: MatchStorage> MatchManager<S> {
    /// Create a new match manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultMatchValidator),
        }
    }

    /// Create a new match manager with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn MatchValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a match for a confirmed candidate.
    ///
    /// The new match starts in `Matched` status. Fails with `Validation`
    /// on bad inputs and with `Conflict` when the payment already has an
    /// active (non-rejected) match.
    pub async fn create_match(
        &mut self,
        project_id: Option<String>,
        row: &StatementRow,
        matched_payment_id: &str,
        confidence: u8,
        created_by: &str,
    ) -> ReconcileResult<ReconciliationMatch> {
        self.validator
            .validate_create(row, matched_payment_id, confidence, created_by)?;

        if self
            .storage
            .find_active_match_for_payment(matched_payment_id)
            .await?
            .is_some()
        {
            return Err(ReconcileError::Conflict(matched_payment_id.to_string()));
        }

        let m = ReconciliationMatch::new(
            project_id,
            row,
            matched_payment_id.to_string(),
            confidence,
            created_by.to_string(),
        );

        self.storage.save_match(&m).await?;

        Ok(m)
    }

    /// Get a match by ID
    pub async fn get_match(
        &self,
        match_id: &str,
    ) -> ReconcileResult<Option<ReconciliationMatch>> {
        self.storage.get_match(match_id).await
    }

    /// Get a match by ID, returning an error if not found
    pub async fn get_match_required(
        &self,
        match_id: &str,
    ) -> ReconcileResult<ReconciliationMatch> {
        self.storage
            .get_match(match_id)
            .await?
            .ok_or_else(|| ReconcileError::MatchNotFound(match_id.to_string()))
    }

    /// Apply a status transition to a single match.
    ///
    /// Enforces the transition table: `Matched` may move to `Reviewed`
    /// or `Rejected`; terminal statuses permit nothing. The confidence
    /// score set at creation is never recomputed here.
    pub async fn update_status(
        &mut self,
        match_id: &str,
        new_status: MatchStatus,
        notes: Option<String>,
        acting_user: &str,
    ) -> ReconcileResult<ReconciliationMatch> {
        let mut m = self.get_match_required(match_id).await?;

        if !m.status.can_transition_to(new_status) {
            return Err(ReconcileError::InvalidTransition {
                from: m.status,
                to: new_status,
            });
        }

        m.status = new_status;
        m.reviewed_by = Some(acting_user.to_string());
        if notes.is_some() {
            m.notes = notes;
        }
        m.updated_at = chrono::Utc::now().naive_utc();

        self.storage.update_match(&m).await?;

        Ok(m)
    }

    /// Apply a status transition to each ID independently.
    ///
    /// Best-effort batch semantics: every id is attempted, one failure
    /// never aborts or rolls back the others, and every input id appears
    /// exactly once in the outcome.
    pub async fn bulk_update_status(
        &mut self,
        match_ids: &[String],
        new_status: MatchStatus,
        acting_user: &str,
    ) -> BulkStatusOutcome {
        let mut outcome = BulkStatusOutcome {
            succeeded: Vec::new(),
            failed: Vec::new(),
        };

        for match_id in match_ids {
            match self
                .update_status(match_id, new_status, None, acting_user)
                .await
            {
                Ok(_) => outcome.succeeded.push(match_id.clone()),
                Err(e) => outcome.failed.push((match_id.clone(), e)),
            }
        }

        outcome
    }

    /// Hard-delete a match.
    ///
    /// The referenced payment is untouched: deleting a reviewed match
    /// does not un-reconcile its payment.
    pub async fn delete_match(&mut self, match_id: &str) -> ReconcileResult<()> {
        // Ensure the match exists so absence is a MatchNotFound, not a
        // storage-specific error.
        self.get_match_required(match_id).await?;
        self.storage.delete_match(match_id).await
    }

    /// List matches satisfying the filter
    pub async fn list_matches(
        &self,
        filter: &MatchFilter,
    ) -> ReconcileResult<Vec<ReconciliationMatch>> {
        self.storage.list_matches(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryMatchStore;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    fn sample_row() -> StatementRow {
        StatementRow::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "Transfer ABC".to_string(),
            BigDecimal::from(1500),
            Some("REF123".to_string()),
            None,
        )
    }

    #[tokio::test]
    async fn create_starts_in_matched_status() {
        let mut manager = MatchManager::new(MemoryMatchStore::new());
        let m = manager
            .create_match(None, &sample_row(), "pay1", 90, "operator")
            .await
            .unwrap();

        assert_eq!(m.status, MatchStatus::Matched);
        assert_eq!(m.match_confidence, 90);
        assert_eq!(m.matched_payment_id, "pay1");
        assert!(manager.get_match(&m.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn create_rejects_invalid_inputs() {
        let mut manager = MatchManager::new(MemoryMatchStore::new());

        let result = manager
            .create_match(None, &sample_row(), "pay1", 101, "operator")
            .await;
        assert!(matches!(result, Err(ReconcileError::Validation(_))));

        let result = manager
            .create_match(None, &sample_row(), "", 50, "operator")
            .await;
        assert!(matches!(result, Err(ReconcileError::Validation(_))));

        let mut row = sample_row();
        row.description = "  ".to_string();
        let result = manager.create_match(None, &row, "pay1", 50, "operator").await;
        assert!(matches!(result, Err(ReconcileError::Validation(_))));
    }

    #[tokio::test]
    async fn second_active_match_for_same_payment_conflicts() {
        let mut manager = MatchManager::new(MemoryMatchStore::new());
        manager
            .create_match(None, &sample_row(), "pay1", 90, "operator")
            .await
            .unwrap();

        let result = manager
            .create_match(None, &sample_row(), "pay1", 70, "operator")
            .await;
        assert!(matches!(result, Err(ReconcileError::Conflict(_))));
    }

    #[tokio::test]
    async fn rejected_match_frees_its_payment() {
        let mut manager = MatchManager::new(MemoryMatchStore::new());
        let first = manager
            .create_match(None, &sample_row(), "pay1", 90, "operator")
            .await
            .unwrap();
        manager
            .update_status(&first.id, MatchStatus::Rejected, None, "reviewer")
            .await
            .unwrap();

        // The rejection released the payment for a new match.
        let second = manager
            .create_match(None, &sample_row(), "pay1", 70, "operator")
            .await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn update_status_enforces_the_transition_table() {
        let mut manager = MatchManager::new(MemoryMatchStore::new());
        let m = manager
            .create_match(None, &sample_row(), "pay1", 90, "operator")
            .await
            .unwrap();

        let reviewed = manager
            .update_status(&m.id, MatchStatus::Reviewed, Some("ok".to_string()), "rev")
            .await
            .unwrap();
        assert_eq!(reviewed.status, MatchStatus::Reviewed);
        assert_eq!(reviewed.reviewed_by.as_deref(), Some("rev"));
        assert_eq!(reviewed.notes.as_deref(), Some("ok"));

        // Terminal: no way out of Reviewed.
        for target in [
            MatchStatus::Pending,
            MatchStatus::Matched,
            MatchStatus::Reviewed,
            MatchStatus::Rejected,
        ] {
            let result = manager.update_status(&m.id, target, None, "rev").await;
            assert!(matches!(
                result,
                Err(ReconcileError::InvalidTransition { .. })
            ));
        }
    }

    #[tokio::test]
    async fn pending_match_cannot_be_promoted() {
        // A direct-import backend may hold Pending matches; the closed
        // transition table keeps them frozen until a promotion path exists.
        let mut store = MemoryMatchStore::new();
        let mut pending = ReconciliationMatch::new(
            None,
            &sample_row(),
            "pay1".to_string(),
            50,
            "importer".to_string(),
        );
        pending.status = MatchStatus::Pending;
        store.save_match(&pending).await.unwrap();

        let mut manager = MatchManager::new(store);
        for target in [
            MatchStatus::Matched,
            MatchStatus::Reviewed,
            MatchStatus::Rejected,
        ] {
            let result = manager
                .update_status(&pending.id, target, None, "reviewer")
                .await;
            assert!(matches!(
                result,
                Err(ReconcileError::InvalidTransition {
                    from: MatchStatus::Pending,
                    ..
                })
            ));
        }
    }

    #[tokio::test]
    async fn update_status_unknown_id_is_not_found() {
        let mut manager = MatchManager::new(MemoryMatchStore::new());
        let result = manager
            .update_status("missing", MatchStatus::Reviewed, None, "rev")
            .await;
        assert!(matches!(result, Err(ReconcileError::MatchNotFound(_))));
    }

    #[tokio::test]
    async fn bulk_update_reports_partial_success() {
        let mut manager = MatchManager::new(MemoryMatchStore::new());
        let good = manager
            .create_match(None, &sample_row(), "pay1", 90, "operator")
            .await
            .unwrap();
        let already_rejected = manager
            .create_match(None, &sample_row(), "pay2", 60, "operator")
            .await
            .unwrap();
        manager
            .update_status(&already_rejected.id, MatchStatus::Rejected, None, "rev")
            .await
            .unwrap();

        let outcome = manager
            .bulk_update_status(
                &[good.id.clone(), already_rejected.id.clone()],
                MatchStatus::Reviewed,
                "rev",
            )
            .await;

        assert_eq!(outcome.succeeded, vec![good.id.clone()]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, already_rejected.id);

        // The success persisted despite the sibling failure.
        let persisted = manager.get_match(&good.id).await.unwrap().unwrap();
        assert_eq!(persisted.status, MatchStatus::Reviewed);
    }

    #[tokio::test]
    async fn delete_is_hard_and_unknown_id_fails() {
        let mut manager = MatchManager::new(MemoryMatchStore::new());
        let m = manager
            .create_match(None, &sample_row(), "pay1", 90, "operator")
            .await
            .unwrap();

        manager.delete_match(&m.id).await.unwrap();
        assert!(manager.get_match(&m.id).await.unwrap().is_none());

        let result = manager.delete_match(&m.id).await;
        assert!(matches!(result, Err(ReconcileError::MatchNotFound(_))));
    }
}
