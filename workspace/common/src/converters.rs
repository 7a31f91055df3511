//! Locale-aware amount parsing.
//!
//! Amounts arrive from the web form in es-AR format, with `.` as thousands
//! separator and `,` as decimal separator (`"1.234,56"`). Storage and the
//! filter engine work on `Decimal`, so raw strings are normalized here.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

/// Parses an es-AR formatted amount string into a `Decimal`.
///
/// Thousands separators are stripped and the decimal comma is rewritten to
/// a dot before parsing. Empty or unparseable input yields `None`; callers
/// treat that as "no value" rather than an error.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = trimmed.replace('.', "").replace(',', ".");
    match Decimal::from_str(&normalized) {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("Ignoring unparseable amount input: {:?}", raw);
            None
        }
    }
}
