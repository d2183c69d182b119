//! Configuration types for Hitlist

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::HitlistError;

/// Runtime configuration (hitlist.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Directory holding the JSON documents; in-memory when absent
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Dice seed; OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Fallback tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: None,
            log_filter: default_log_filter(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> crate::Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(HitlistError::Config("logFilter must not be empty".to_string()));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the file values
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, seed: Option<u64>) -> Self {
        if data_dir.is_some() {
            self.data_dir = data_dir;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }
}
