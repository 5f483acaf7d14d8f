//! Config path resolution helpers.

use std::path::{Path, PathBuf};

/// Fixed name of the configuration file at the project root.
pub const CONFIG_FILE_NAME: &str = "belayer-config.json";

pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

/// Resolve the configured install path against the project root.
///
/// The path is always project-relative: a leading separator (as in the
/// default `/src/components/`) does not make it absolute.
pub fn install_dir(project_root: &Path, install_path: &str) -> PathBuf {
    let relative = install_path.trim_start_matches(['/', '\\']);
    let relative = relative.trim_end_matches(['/', '\\']);
    if relative.is_empty() {
        project_root.to_path_buf()
    } else {
        project_root.join(relative)
    }
}
