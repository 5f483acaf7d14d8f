//! Config store for loading and saving belayer-config.json.

use std::path::{Path, PathBuf};

use crate::error::{BelayerError, Result};

use super::{BelayerConfig, paths::config_path};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    pub fn for_project(project_root: &Path) -> Self {
        Self::from_path(config_path(project_root))
    }

    pub fn from_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<BelayerConfig> {
        if !self.config_path.exists() {
            return Err(BelayerError::ConfigurationMissing {
                path: self.config_path.clone(),
            });
        }
        let content = std::fs::read_to_string(&self.config_path).map_err(|e| {
            BelayerError::io(
                format!("Failed to read config file: {}", self.config_path.display()),
                e,
            )
        })?;
        serde_json::from_str(&content).map_err(|source| BelayerError::ConfigurationInvalid {
            path: self.config_path.clone(),
            source,
        })
    }

    /// Overwrite the configuration file with `config`.
    pub fn save(&self, config: &BelayerConfig) -> Result<()> {
        let mut content = serde_json::to_string_pretty(config).map_err(|source| {
            BelayerError::ConfigurationInvalid {
                path: self.config_path.clone(),
                source,
            }
        })?;
        content.push('\n');
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BelayerError::io(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        std::fs::write(&self.config_path, content).map_err(|e| {
            BelayerError::io(
                format!(
                    "Failed to write config file: {}",
                    self.config_path.display()
                ),
                e,
            )
        })?;
        tracing::debug!(path = %self.config_path.display(), "saved configuration");
        Ok(())
    }
}
