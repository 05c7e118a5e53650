//! Application composition root: configuration to a ready store.

use billfold_core::config::BillingConfig;
use billfold_core::error::BillingError;
use tracing::info;

use crate::services::store::BillingStore;
use crate::storage::JsonFileStorage;

/// A billing store wired to file-backed storage per configuration.
pub struct Application {
    store: BillingStore<JsonFileStorage>,
}

impl Application {
    /// Build the application: open the data directory and load persisted
    /// state into the store.
    pub fn build(config: &BillingConfig) -> Result<Self, BillingError> {
        let storage = JsonFileStorage::new(config.data_dir.clone())?;
        let store = BillingStore::open(storage);
        info!(data_dir = %config.data_dir.display(), "Application ready");
        Ok(Application { store })
    }

    pub fn store(&self) -> &BillingStore<JsonFileStorage> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut BillingStore<JsonFileStorage> {
        &mut self.store
    }
}
