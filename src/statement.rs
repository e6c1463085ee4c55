//! Bank statement parsing
//!
//! Turns raw comma-delimited statement text into validated
//! [`StatementRow`]s. Parsing is lenient by policy: the header line is
//! always discarded, blank or too-short lines are skipped without
//! comment, and unparsable amounts fall back to zero so the row survives
//! for operator review. Only an unparsable date drops a data row, and
//! that is reported as a [`ParseError`] rather than failing the parse.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::str::FromStr;

use crate::types::{ParseError, ParsedStatement, StatementRow};

/// Data lines need at least date, description, and amount columns
const MIN_COLUMNS: usize = 3;

/// Parse raw statement text into rows and per-line errors.
///
/// The first line is treated as a header and skipped unconditionally.
/// Each remaining non-empty line is split on commas into
/// `date, description, amount, reference, account`; the last two
/// columns are optional. Lines with fewer than three columns are
/// silently skipped to tolerate trailing blanks.
pub fn parse(raw: &str) -> ParsedStatement {
    let mut rows = Vec::new();
    let mut errors = Vec::new();

    // A BOM on the first line is harmless since the header is discarded.
    for (index, line) in raw.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < MIN_COLUMNS {
            continue;
        }

        let date = match parse_date(fields[0]) {
            Some(date) => date,
            None => {
                errors.push(ParseError {
                    line: index + 1,
                    message: format!("unparsable date '{}'", fields[0]),
                });
                continue;
            }
        };

        // Unparsable amounts keep the row with a zero amount; callers
        // treat zero-amount rows as suspect.
        let amount =
            BigDecimal::from_str(fields[2]).unwrap_or_else(|_| BigDecimal::from(0));

        rows.push(StatementRow {
            date,
            description: fields[1].to_string(),
            amount,
            reference: optional_field(fields.get(3)),
            account: optional_field(fields.get(4)),
        });
    }

    ParsedStatement { rows, errors }
}

fn parse_date(field: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(field, "%d/%m/%Y"))
        .ok()
}

fn optional_field(field: Option<&&str>) -> Option<String> {
    field
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string)
}
