//! Candidate generation and confidence scoring

pub mod finder;
pub mod scorer;

pub use finder::{find_candidates, MAX_CANDIDATES, MIN_CONFIDENCE};
pub use scorer::score;
