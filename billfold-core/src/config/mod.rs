use crate::error::BillingError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct BillingConfig {
    /// Directory holding the persisted JSON documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BillingConfig {
    fn default() -> Self {
        BillingConfig {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

impl BillingConfig {
    pub fn load() -> Result<Self, BillingError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("BILLFOLD").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
