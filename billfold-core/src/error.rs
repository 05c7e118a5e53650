use thiserror::Error;
use uuid::Uuid;

/// Error type shared by every billfold operation.
///
/// Registry methods are atomic with respect to the in-memory collections:
/// any of these errors means the operation left state unchanged. Storage
/// faults run the other way: the store logs and swallows them after the
/// in-memory mutation has already been applied.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Customer not found: {0}")]
    CustomerNotFound(Uuid),

    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    #[error("Customer {customer_id} is referenced by {invoice_count} invoice(s) and cannot be deleted")]
    CustomerInUse {
        customer_id: Uuid,
        invoice_count: usize,
    },

    #[error("Storage error: {0}")]
    Storage(anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(anyhow::Error),
}

impl From<config::ConfigError> for BillingError {
    fn from(err: config::ConfigError) -> Self {
        BillingError::Config(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for BillingError {
    fn from(err: std::io::Error) -> Self {
        BillingError::Storage(anyhow::Error::new(err))
    }
}

impl From<serde_json::Error> for BillingError {
    fn from(err: serde_json::Error) -> Self {
        BillingError::Storage(anyhow::Error::new(err))
    }
}
