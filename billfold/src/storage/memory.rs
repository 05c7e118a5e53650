//! In-memory storage backend for tests and ephemeral embedding.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use billfold_core::error::BillingError;

use super::StorageGateway;

/// HashMap-backed storage. Clones share the same underlying map, so a
/// store reopened over a clone observes previously saved documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    documents: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a document directly, bypassing the store layer. Lets tests
    /// seed pre-existing or corrupt payloads.
    pub fn seed(&self, key: &str, payload: &str) {
        self.documents().insert(key.to_string(), payload.to_string());
    }

    /// Raw payload currently stored under `key`.
    pub fn payload(&self, key: &str) -> Option<String> {
        self.documents().get(key).cloned()
    }

    fn documents(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.documents.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageGateway for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, BillingError> {
        Ok(self.documents().get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), BillingError> {
        self.documents().insert(key.to_string(), payload.to_string());
        Ok(())
    }
}
