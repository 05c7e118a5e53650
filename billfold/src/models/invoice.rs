//! Invoice data models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::LineItem;

/// Invoice workflow status.
///
/// The set is flat: any status may follow any other, so a paid invoice can
/// be moved back to draft by an edit. No transition graph is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    /// Parse a stored status string, defaulting to `Draft` for anything
    /// unrecognized.
    pub fn from_string(s: &str) -> Self {
        match s {
            "sent" => InvoiceStatus::Sent,
            "paid" => InvoiceStatus::Paid,
            "overdue" => InvoiceStatus::Overdue,
            _ => InvoiceStatus::Draft,
        }
    }
}

/// An invoice record held by the invoice registry.
///
/// `subtotal`, `tax_amount`, and `total` are derived from the line items
/// and tax rate at creation and update time; they are stored, not entered.
/// `customer_name` is a snapshot taken when the invoice is written and is
/// deliberately not re-synchronized when the customer is later renamed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Formatted identifier such as `INV-2026-0007`, assigned by the
    /// numbering scheme rather than generated randomly.
    pub id: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    /// Tax rate as a fraction, e.g. `0.1` for 10%.
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub notes: Option<String>,
    pub status: InvoiceStatus,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Input for creating a new invoice.
///
/// Any supplied status is ignored: creation always yields a draft.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvoice {
    pub customer_id: Uuid,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    #[validate(length(min = 1, message = "An invoice needs at least one item"))]
    pub items: Vec<LineItem>,
    /// Explicit rate for this invoice; when absent, the settings' default
    /// tax rate applies.
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0, message = "Tax rate must be between 0 and 1"))]
    pub tax_rate: Option<f64>,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: InvoiceStatus,
}

/// Input for updating an existing invoice. Unlike creation, the status is
/// honored here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateInvoice {
    pub id: String,
    pub customer_id: Uuid,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    #[validate(length(min = 1, message = "An invoice needs at least one item"))]
    pub items: Vec<LineItem>,
    #[validate(range(min = 0.0, max = 1.0, message = "Tax rate must be between 0 and 1"))]
    pub tax_rate: f64,
    pub notes: Option<String>,
    pub status: InvoiceStatus,
}
