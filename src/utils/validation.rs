//! Validation utilities

use crate::types::*;

/// Confidence scores above this value are invalid
const MAX_CONFIDENCE: u8 = 100;

/// Validate that a confidence score is within 0-100
pub fn validate_confidence(confidence: u8) -> ReconcileResult<()> {
    if confidence > MAX_CONFIDENCE {
        return Err(ReconcileError::Validation(format!(
            "Confidence must be between 0 and 100, got {}",
            confidence
        )));
    }
    Ok(())
}

/// Validate that a bank row carries the fields a match needs
pub fn validate_bank_row(row: &StatementRow) -> ReconcileResult<()> {
    if row.description.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Bank description cannot be empty".to_string(),
        ));
    }
    Ok(())
}
