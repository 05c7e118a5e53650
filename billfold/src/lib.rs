//! Billfold: a small-business billing engine.
//!
//! Customer and invoice registries with derived totals, sequential invoice
//! numbering, settings, and best-effort key-value persistence, plus
//! adapter seams for export rendering and share links. All registry
//! operations are synchronous; persistence failures are absorbed so the
//! in-memory state stays authoritative.

pub mod adapters;
pub mod models;
pub mod services;
pub mod startup;
pub mod storage;

pub use services::store::BillingStore;
pub use startup::Application;
