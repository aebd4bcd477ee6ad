//! Configuration for keystore

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Backend;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storage backend
    #[serde(default)]
    pub backend: Backend,

    /// Path to the store directory
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

/// Default store directory (`~/.local/share/tripplanner/store` on Linux)
pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("store")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            store_path: default_store_path(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("keystore").join("config.yml")),
            Some(PathBuf::from("keystore.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
