//! Invoice totals computation.
//!
//! Pure functions over line items: no clock, no storage, no side effects.
//! Amounts are native floating-point end to end; rounding to two decimals
//! is a presentation concern and never happens here.

use serde::{Deserialize, Serialize};

use crate::models::LineItem;

/// Derived invoice amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// Compute subtotal, tax amount, and grand total for a set of line items.
///
/// The subtotal sums the items' stored totals, zero for an empty set, and
/// item order does not affect the result. `tax_rate` is a fraction in
/// [0, 1]; a rate of zero yields a tax amount of exactly zero.
pub fn compute_totals(items: &[LineItem], tax_rate: f64) -> InvoiceTotals {
    let subtotal: f64 = items.iter().map(|item| item.total()).sum();
    let tax_amount = subtotal * tax_rate;
    InvoiceTotals {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount,
    }
}
