//! # Reconciliation Core
//!
//! A bank reconciliation matching engine: ingest a bank statement,
//! propose and score match candidates against an unreconciled payment
//! pool, and manage the resulting matches through their lifecycle.
//!
//! ## Features
//!
//! - **Statement parsing**: lenient, partial-success parsing of delimited
//!   bank statement files
//! - **Candidate scoring**: a pure four-signal additive confidence
//!   heuristic (amount, date proximity, reference, description)
//! - **Candidate search**: ranked, thresholded, capped shortlists per
//!   statement row
//! - **Match lifecycle**: matched/reviewed/rejected state machine with
//!   single and best-effort bulk transitions
//! - **Reporting**: per-status summaries and BOM-prefixed CSV export
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   storage and a mockable payment-pool collaborator
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::utils::{MemoryMatchStore, MemoryPaymentPool};
//! use reconciliation_core::ReconciliationEngine;
//!
//! let storage = MemoryMatchStore::new();
//! let pool = MemoryPaymentPool::new(vec![]);
//! let engine = ReconciliationEngine::new(storage, pool);
//! let parsed = engine.parse_statement("date,description,amount\n2024-01-05,Transfer,10.00");
//! assert_eq!(parsed.rows.len(), 1);
//! ```

pub mod engine;
pub mod matching;
pub mod report;
pub mod statement;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use engine::*;
pub use matching::*;
pub use report::*;
pub use traits::*;
pub use types::*;
