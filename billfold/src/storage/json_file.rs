//! File-backed storage: one JSON document per key.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use billfold_core::error::BillingError;
use tracing::info;

use super::StorageGateway;

/// Stores each document as `<data_dir>/<key>.json`.
///
/// The billing documents are independent files, so a failed write of one
/// never corrupts the others.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    data_dir: PathBuf,
}

impl JsonFileStorage {
    /// Open a storage rooted at `data_dir`, creating the directory if it
    /// does not exist yet.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, BillingError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))
            .map_err(BillingError::Storage)?;
        info!(data_dir = %data_dir.display(), "JSON file storage ready");
        Ok(JsonFileStorage { data_dir })
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl StorageGateway for JsonFileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, BillingError> {
        let path = self.document_path(key);
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BillingError::Storage(
                anyhow::Error::new(e).context(format!("Failed to read {}", path.display())),
            )),
        }
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), BillingError> {
        let path = self.document_path(key);
        fs::write(&path, payload).map_err(|e| {
            BillingError::Storage(
                anyhow::Error::new(e).context(format!("Failed to write {}", path.display())),
            )
        })
    }
}
