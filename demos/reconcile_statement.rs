//! Bank statement reconciliation walkthrough

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::utils::{MemoryMatchStore, MemoryPaymentPool};
use reconciliation_core::{MatchFilter, MatchStatus, PaymentRecord, ReconciliationEngine};
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏦 Reconciliation Core - Statement Matching Example\n");

    // Seed the payment pool the way a billing system would.
    let pool = MemoryPaymentPool::new(vec![
        PaymentRecord {
            id: "pay-1001".to_string(),
            amount: BigDecimal::from_str("1500.00")?,
            payment_date: NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
            reference_number: Some("REF123".to_string()),
            unit_id: Some("unit-12".to_string()),
            bill_id: None,
            project_id: Some("proj1".to_string()),
            reconciled: false,
        },
        PaymentRecord {
            id: "pay-1002".to_string(),
            amount: BigDecimal::from_str("320.00")?,
            payment_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            reference_number: None,
            unit_id: None,
            bill_id: Some("bill-88".to_string()),
            project_id: Some("proj1".to_string()),
            reconciled: false,
        },
    ]);

    let mut engine = ReconciliationEngine::new(MemoryMatchStore::new(), pool);

    // 1. Parse the bank statement.
    println!("📄 Parsing bank statement...");
    let raw = "date,description,amount,reference\n\
               2024-01-05,Transfer ABC,1500.00,REF123\n\
               2024-01-04,Card settlement,320.00,\n\
               2024-01-07,Unknown deposit,42.00,";
    let parsed = engine.parse_statement(raw);
    println!(
        "  ✓ {} rows parsed, {} errors\n",
        parsed.rows.len(),
        parsed.errors.len()
    );

    // 2. Build candidate shortlists.
    println!("🔍 Searching for match candidates...");
    let as_of = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let candidates = engine
        .suggest_candidates(&parsed.rows, Some("proj1"), as_of)
        .await?;

    for (index, row) in parsed.rows.iter().enumerate() {
        let list = &candidates[&index];
        if list.is_empty() {
            println!("  • {} ({}): no suggestion", row.description, row.amount);
        } else {
            for candidate in list {
                println!(
                    "  • {} ({}): {} at confidence {}",
                    row.description, row.amount, candidate.payment.id, candidate.confidence
                );
            }
        }
    }
    println!();

    // 3. Confirm the operator's selections.
    println!("✅ Confirming matches...");
    let first = engine
        .confirm_match(
            Some("proj1".to_string()),
            &parsed.rows[0],
            "pay-1001",
            candidates[&0][0].confidence,
            "demo-operator",
        )
        .await?;
    let second = engine
        .confirm_match(
            Some("proj1".to_string()),
            &parsed.rows[1],
            "pay-1002",
            candidates[&1][0].confidence,
            "demo-operator",
        )
        .await?;
    println!("  ✓ Created {} and {}\n", first.id, second.id);

    // 4. Review in bulk.
    println!("📋 Reviewing matches...");
    let outcome = engine
        .bulk_update_status(
            &[first.id.clone(), second.id.clone()],
            MatchStatus::Reviewed,
            "demo-reviewer",
        )
        .await;
    println!(
        "  ✓ {} reviewed, {} failed\n",
        outcome.succeeded.len(),
        outcome.failed.len()
    );

    // 5. Summarize and export.
    let summary = engine.summarize(&MatchFilter::default()).await?;
    println!(
        "📊 Summary: {} matches totalling {}",
        summary.total_count, summary.total_amount
    );

    let csv = engine.export_csv(&MatchFilter::default()).await?;
    println!("💾 Export: {} bytes of BOM-prefixed CSV", csv.len());

    Ok(())
}
