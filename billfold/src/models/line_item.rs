//! Invoice line item model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A billable row within an invoice.
///
/// `total` is derived from `quantity * unit_price`. The numeric fields
/// are private, so in code the setters are the only way to change them
/// and both recompute the total. A decoded payload can still carry an
/// arbitrary total; the invoice registry checks stored totals against
/// their inputs before accepting items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    pub description: String,
    quantity: f64,
    unit_price: f64,
    total: f64,
}

impl LineItem {
    /// Create a line item with its total computed from the inputs.
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        LineItem {
            id: Uuid::new_v4(),
            description: description.into(),
            quantity,
            unit_price,
            total: quantity * unit_price,
        }
    }

    /// Build a line item from raw form text. Unparsable numeric input is
    /// coerced to zero rather than rejected, and overflowing input parses
    /// to infinity; save-time validation refuses both.
    pub fn from_form(description: &str, quantity: &str, unit_price: &str) -> Self {
        Self::new(description, parse_amount(quantity), parse_amount(unit_price))
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Set the quantity and recompute the total.
    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
        self.total = self.quantity * self.unit_price;
    }

    /// Set the unit price and recompute the total.
    pub fn set_unit_price(&mut self, unit_price: f64) {
        self.unit_price = unit_price;
        self.total = self.quantity * self.unit_price;
    }
}

/// Parse a numeric form field, coercing anything unparsable to zero.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}
