//! Application context for unified dependency injection.

use std::path::{Path, PathBuf};

use crate::config::{ConfigStore, config_path, install_dir};
use crate::error::{BelayerError, Result};

/// Unified application context for dependency injection.
///
/// Every command receives the project root explicitly instead of reading
/// the current directory, so tests can point it at a scratch directory.
#[derive(Debug, Clone)]
pub struct AppContext {
    project_root: PathBuf,
}

impl AppContext {
    /// Create a new context rooted at `project_root`.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Create a context for the current working directory.
    pub fn current() -> Result<Self> {
        let project_root = std::env::current_dir()
            .map_err(|e| BelayerError::io("Failed to determine current directory", e))?;
        Ok(Self::new(project_root))
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config_path(&self) -> PathBuf {
        config_path(&self.project_root)
    }

    pub fn config_store(&self) -> ConfigStore {
        ConfigStore::for_project(&self.project_root)
    }

    /// Resolve a configured install path against the project root.
    pub fn install_dir(&self, install_path: &str) -> PathBuf {
        install_dir(&self.project_root, install_path)
    }
}
