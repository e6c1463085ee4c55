//! CSV export of match records
//!
//! Output is UTF-8 with a leading byte-order marker so spreadsheet
//! tools pick up the encoding and render date/currency columns
//! correctly. Fields are quoted only when they contain the delimiter,
//! a quote, or a line break.

use csv::{QuoteStyle, WriterBuilder};

use crate::types::{ReconcileError, ReconcileResult, ReconciliationMatch};

/// UTF-8 byte-order marker expected by spreadsheet imports
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

const HEADER: &[&str] = &[
    "bank_date",
    "bank_description",
    "bank_amount",
    "bank_reference",
    "matched_payment_id",
    "match_confidence",
    "status",
];

/// Serialize matches to BOM-prefixed CSV bytes.
///
/// The header row is always present; an empty match set yields a
/// header-only export. Identical input produces byte-identical output.
pub fn export_matches(matches: &[ReconciliationMatch]) -> ReconcileResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer
        .write_record(HEADER)
        .map_err(|e| ReconcileError::Export(e.to_string()))?;

    for m in matches {
        writer
            .write_record(&[
                m.bank_date.format("%Y-%m-%d").to_string(),
                m.bank_description.clone(),
                m.bank_amount.to_string(),
                m.bank_reference.clone().unwrap_or_default(),
                m.matched_payment_id.clone(),
                m.match_confidence.to_string(),
                m.status.as_str().to_string(),
            ])
            .map_err(|e| ReconcileError::Export(e.to_string()))?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| ReconcileError::Export(e.to_string()))?;

    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + body.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}
