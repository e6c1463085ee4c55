//! Match lifecycle management and the engine orchestrator

pub mod core;
pub mod matches;

pub use self::core::{ReconciliationEngine, LOOKBACK_MONTHS};
pub use self::matches::MatchManager;
