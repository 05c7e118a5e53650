//! Data models for the billfold engine.

pub mod customer;
pub mod invoice;
pub mod line_item;
pub mod settings;

pub use customer::{CreateCustomer, Customer, UpdateCustomer};
pub use invoice::{CreateInvoice, Invoice, InvoiceStatus, UpdateInvoice};
pub use line_item::{parse_amount, LineItem};
pub use settings::AppSettings;
