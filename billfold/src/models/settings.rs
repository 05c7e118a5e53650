//! Invoice numbering and tax settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Numbering and tax settings, persisted as a single document.
///
/// `next_invoice_number` is the sequence number the next created invoice
/// will receive. The store advances it exactly once per successful
/// creation; it is never decremented when an invoice is deleted, so issued
/// numbers are not reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AppSettings {
    #[validate(length(min = 1, message = "Invoice prefix is required"))]
    pub invoice_prefix: String,
    #[validate(range(min = 1, message = "Next invoice number must be at least 1"))]
    pub next_invoice_number: u32,
    #[validate(range(min = 0.0, max = 1.0, message = "Tax rate must be between 0 and 1"))]
    pub default_tax_rate: f64,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            invoice_prefix: "INV-".to_string(),
            next_invoice_number: 1,
            default_tax_rate: 0.0,
        }
    }
}
