//! In-memory storage implementations for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory match store for testing and development
#[derive(Debug, Clone, Default)]
pub struct MemoryMatchStore {
    matches: Arc<RwLock<HashMap<String, ReconciliationMatch>>>,
}

impl MemoryMatchStore {
    /// Create a new in-memory match store
    pub fn new() -> Self {
        Self {
            matches: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.matches.write().unwrap().clear();
    }
}

#[async_trait]
impl MatchStorage for MemoryMatchStore {
    async fn save_match(&mut self, m: &ReconciliationMatch) -> ReconcileResult<()> {
        self.matches
            .write()
            .unwrap()
            .insert(m.id.clone(), m.clone());
        Ok(())
    }

    async fn get_match(&self, match_id: &str) -> ReconcileResult<Option<ReconciliationMatch>> {
        Ok(self.matches.read().unwrap().get(match_id).cloned())
    }

    async fn update_match(&mut self, m: &ReconciliationMatch) -> ReconcileResult<()> {
        if self.matches.read().unwrap().contains_key(&m.id) {
            self.matches
                .write()
                .unwrap()
                .insert(m.id.clone(), m.clone());
            Ok(())
        } else {
            Err(ReconcileError::MatchNotFound(m.id.clone()))
        }
    }

    async fn delete_match(&mut self, match_id: &str) -> ReconcileResult<()> {
        if self.matches.write().unwrap().remove(match_id).is_some() {
            Ok(())
        } else {
            Err(ReconcileError::MatchNotFound(match_id.to_string()))
        }
    }

    async fn list_matches(
        &self,
        filter: &MatchFilter,
    ) -> ReconcileResult<Vec<ReconciliationMatch>> {
        let matches = self.matches.read().unwrap();
        let mut filtered: Vec<ReconciliationMatch> = matches
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        // Newest first, id as tiebreaker for stable pagination.
        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(filtered)
    }

    async fn find_active_match_for_payment(
        &self,
        payment_id: &str,
    ) -> ReconcileResult<Option<ReconciliationMatch>> {
        let matches = self.matches.read().unwrap();
        Ok(matches
            .values()
            .find(|m| m.matched_payment_id == payment_id && m.is_active())
            .cloned())
    }
}

/// In-memory payment pool for testing and development.
///
/// Applies the collaborator query contract: only unreconciled payments
/// within the date window and project scope are returned.
#[derive(Debug, Clone, Default)]
pub struct MemoryPaymentPool {
    payments: Arc<RwLock<Vec<PaymentRecord>>>,
}

impl MemoryPaymentPool {
    /// Create a pool seeded with the given payments
    pub fn new(payments: Vec<PaymentRecord>) -> Self {
        Self {
            payments: Arc::new(RwLock::new(payments)),
        }
    }

    /// Add a payment to the pool
    pub fn add_payment(&self, payment: PaymentRecord) {
        self.payments.write().unwrap().push(payment);
    }
}

#[async_trait]
impl PaymentPool for MemoryPaymentPool {
    async fn unreconciled_payments(
        &self,
        project_id: Option<&str>,
        date_from: NaiveDate,
    ) -> ReconcileResult<Vec<PaymentRecord>> {
        let payments = self.payments.read().unwrap();
        Ok(payments
            .iter()
            .filter(|p| !p.reconciled)
            .filter(|p| p.payment_date >= date_from)
            .filter(|p| {
                project_id.is_none() || p.project_id.as_deref() == project_id
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn sample_match(payment_id: &str) -> ReconciliationMatch {
        let row = StatementRow::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "Transfer".to_string(),
            BigDecimal::from(100),
            None,
            None,
        );
        ReconciliationMatch::new(
            None,
            &row,
            payment_id.to_string(),
            60,
            "operator".to_string(),
        )
    }

    #[tokio::test]
    async fn save_and_get_round_trip() {
        let mut store = MemoryMatchStore::new();
        let m = sample_match("pay1");
        store.save_match(&m).await.unwrap();

        let retrieved = store.get_match(&m.id).await.unwrap();
        assert_eq!(retrieved, Some(m));
    }

    #[tokio::test]
    async fn update_unknown_match_fails() {
        let mut store = MemoryMatchStore::new();
        let m = sample_match("pay1");
        let result = store.update_match(&m).await;
        assert!(matches!(result, Err(ReconcileError::MatchNotFound(_))));
    }

    #[tokio::test]
    async fn active_match_lookup_ignores_rejected() {
        let mut store = MemoryMatchStore::new();
        let mut m = sample_match("pay1");
        m.status = MatchStatus::Rejected;
        store.save_match(&m).await.unwrap();

        assert!(store
            .find_active_match_for_payment("pay1")
            .await
            .unwrap()
            .is_none());

        let active = sample_match("pay1");
        store.save_match(&active).await.unwrap();
        let found = store.find_active_match_for_payment("pay1").await.unwrap();
        assert_eq!(found.map(|f| f.id), Some(active.id));
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let mut store = MemoryMatchStore::new();
        let mut reviewed = sample_match("pay1");
        reviewed.status = MatchStatus::Reviewed;
        store.save_match(&reviewed).await.unwrap();
        store.save_match(&sample_match("pay2")).await.unwrap();

        let filter = MatchFilter {
            status: Some(MatchStatus::Reviewed),
            ..Default::default()
        };
        let listed = store.list_matches(&filter).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, reviewed.id);
    }

    #[tokio::test]
    async fn pool_applies_the_query_contract() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let pool = MemoryPaymentPool::new(vec![
            PaymentRecord {
                id: "in-window".to_string(),
                amount: BigDecimal::from(100),
                payment_date: date,
                reference_number: None,
                unit_id: None,
                bill_id: None,
                project_id: Some("proj1".to_string()),
                reconciled: false,
            },
            PaymentRecord {
                id: "reconciled".to_string(),
                amount: BigDecimal::from(100),
                payment_date: date,
                reference_number: None,
                unit_id: None,
                bill_id: None,
                project_id: Some("proj1".to_string()),
                reconciled: true,
            },
            PaymentRecord {
                id: "too-old".to_string(),
                amount: BigDecimal::from(100),
                payment_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                reference_number: None,
                unit_id: None,
                bill_id: None,
                project_id: Some("proj1".to_string()),
                reconciled: false,
            },
        ]);

        let fetched = pool
            .unreconciled_payments(
                Some("proj1"),
                NaiveDate::from_ymd_opt(2023, 7, 5).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, "in-window");
    }
}
