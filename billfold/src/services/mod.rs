//! Engine services: registries, totals, numbering, and metrics.

pub mod metrics;
pub mod numbering;
pub mod store;
pub mod totals;

pub use metrics::{get_metrics, init_metrics};
pub use numbering::{format_invoice_id, next_invoice_id};
pub use store::BillingStore;
pub use totals::{compute_totals, InvoiceTotals};
