//! Add command implementation.
//!
//! Materializes one component directory from the remote repository and
//! moves it under the configured install path.

use std::path::PathBuf;

use crate::component::ComponentName;
use crate::context::AppContext;
use crate::error::{BelayerError, Result};
use crate::fs::move_dir;
use crate::git::{GitFetcher, RemoteFetcher, SparseRequest};

use super::repo_spec;

/// Outcome of a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReport {
    pub component: String,
    /// Absolute path the component now lives at
    pub destination: PathBuf,
}

#[derive(Debug)]
pub struct AddCommand<F = GitFetcher> {
    ctx: AppContext,
    fetcher: F,
}

impl AddCommand<GitFetcher> {
    /// Create an add command that clones with the git client under the
    /// project root.
    pub fn new(ctx: AppContext) -> Self {
        let fetcher = GitFetcher::new(ctx.project_root().to_path_buf());
        Self { ctx, fetcher }
    }
}

impl<F: RemoteFetcher> AddCommand<F> {
    pub fn with_fetcher(ctx: AppContext, fetcher: F) -> Self {
        Self { ctx, fetcher }
    }

    pub fn execute(&self, name: &str) -> Result<AddReport> {
        let name = ComponentName::parse(name)?;
        let config = self.ctx.config_store().load()?;

        let destination = name.destination(&self.ctx.install_dir(&config.install_path));
        // symlink_metadata so a dangling link still counts as occupied
        if destination.symlink_metadata().is_ok() {
            return Err(BelayerError::DestinationConflict {
                component: name.to_string(),
                destination,
            });
        }

        let remote_path = name.remote_path(config.remote_root_path());
        let request = SparseRequest::install(repo_spec(&config), remote_path.clone());
        let checkout = self.fetcher.checkout(&request)?;

        let source = checkout.path(&remote_path);
        if !source.is_dir() {
            return Err(BelayerError::fetch(
                "component lookup",
                format!(
                    "component \"{}\" not found at '{}' in {}",
                    name, remote_path, config.github_repo
                ),
            ));
        }

        move_dir(&source, &destination)?;

        if let Err(err) = checkout.close() {
            tracing::warn!(error = %err, "failed to remove temporary clone");
        }

        tracing::info!(
            component = %name,
            destination = %destination.display(),
            "installed component"
        );
        Ok(AddReport {
            component: name.to_string(),
            destination,
        })
    }
}
