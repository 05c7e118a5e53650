//! Sequential invoice identifier generation.

use chrono::{Datelike, Utc};

use crate::models::AppSettings;

/// Format an invoice identifier from its parts: configured prefix, calendar
/// year, and the sequence number zero-padded to four digits. Padding never
/// truncates, so sequence 10000 renders as `10000`.
pub fn format_invoice_id(prefix: &str, year: i32, sequence: u32) -> String {
    format!("{}{}-{:04}", prefix, year, sequence)
}

/// Next invoice identifier for the current wall-clock year.
///
/// Reads the settings counter without advancing it. The store increments
/// the counter only after an invoice has actually been appended, so an
/// aborted creation never burns a number.
pub fn next_invoice_id(settings: &AppSettings) -> String {
    format_invoice_id(
        &settings.invoice_prefix,
        Utc::now().year(),
        settings.next_invoice_number,
    )
}
