//! Key-value persistence gateway.
//!
//! Billing state lives in memory; persistence is a best-effort side effect
//! behind a narrow gateway. Three independent JSON documents are stored
//! under fixed keys, and the store layer guarantees failures never reach
//! registry callers: unreadable documents fall back to defaults and failed
//! writes are logged and swallowed.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use billfold_core::error::BillingError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, warn};

use crate::services::metrics::STORAGE_ERRORS_TOTAL;

/// Document key for the customer registry.
pub const CUSTOMERS_KEY: &str = "customers";
/// Document key for the invoice registry.
pub const INVOICES_KEY: &str = "invoices";
/// Document key for the settings record.
pub const SETTINGS_KEY: &str = "settings";

/// Raw document storage keyed by name.
///
/// Implementations move opaque strings; encoding and the fall-back-to-
/// default policy live above the trait, so backends stay interchangeable.
pub trait StorageGateway {
    /// Fetch the stored payload for `key`, `None` when absent.
    fn load(&self, key: &str) -> Result<Option<String>, BillingError>;

    /// Persist `payload` under `key`, replacing any previous value.
    fn save(&self, key: &str, payload: &str) -> Result<(), BillingError>;
}

/// Load and decode a document, falling back to `default` on a missing key,
/// an unreadable payload, or a gateway failure. Reads never fail outward.
pub fn load_or_default<T, G>(gateway: &G, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    G: StorageGateway,
{
    match gateway.load(key) {
        Ok(Some(payload)) => match serde_json::from_str(&payload) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = key, error = %e, "Stored document is unreadable, using defaults");
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            warn!(key = key, error = %e, "Failed to load document, using defaults");
            default
        }
    }
}

/// Encode and save a document, logging and swallowing any failure. Writes
/// are best-effort: the in-memory state has already advanced and stays
/// authoritative for the rest of the session.
pub fn persist<T, G>(gateway: &G, key: &str, value: &T)
where
    T: Serialize,
    G: StorageGateway,
{
    let payload = match serde_json::to_string(value) {
        Ok(payload) => payload,
        Err(e) => {
            error!(key = key, error = %e, "Failed to serialize document");
            STORAGE_ERRORS_TOTAL.with_label_values(&[key]).inc();
            return;
        }
    };

    if let Err(e) = gateway.save(key, &payload) {
        error!(key = key, error = %e, "Failed to persist document");
        STORAGE_ERRORS_TOTAL.with_label_values(&[key]).inc();
    }
}
