//! Component names and the directories they map to.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{BelayerError, Result};

/// A validated component name: exactly one plain path segment.
///
/// The same name is interpolated into the remote sparse path and the local
/// destination, so separators and dot segments are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentName(String);

impl ComponentName {
    pub fn parse(name: &str) -> Result<Self> {
        let reason = if name.is_empty() {
            Some("must not be empty")
        } else if name == "." || name == ".." {
            Some("must not be a relative directory reference")
        } else if name.contains(['/', '\\']) {
            Some("must not contain path separators")
        } else if name.contains('\0') {
            Some("must not contain NUL bytes")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(BelayerError::InvalidComponentName {
                name: name.to_string(),
                reason,
            }),
            None => Ok(Self(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Repository-relative path of this component under `remote_root`.
    pub fn remote_path(&self, remote_root: &str) -> String {
        let root = remote_root.trim_matches('/');
        if root.is_empty() {
            self.0.clone()
        } else {
            format!("{root}/{}", self.0)
        }
    }

    /// Local destination of this component under `install_dir`.
    pub fn destination(&self, install_dir: &Path) -> PathBuf {
        install_dir.join(&self.0)
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// List immediate subdirectories of `dir`, sorted by name.
///
/// Plain files and the repository's own `.git` directory are skipped.
pub fn list_component_dirs(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| BelayerError::io(format!("Failed to read directory: {}", dir.display()), e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            BelayerError::io(
                format!("Failed to read directory entry: {}", dir.display()),
                e,
            )
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == ".git" {
            continue;
        }
        if entry.path().is_dir() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
