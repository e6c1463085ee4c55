//! Read-side reporting over the match store

pub mod export;
pub mod summary;

pub use export::export_matches;
pub use summary::summarize;
