//! List command implementation.
//!
//! Clones only the configured remote root and reports the component
//! directories found under it.

use crate::component::list_component_dirs;
use crate::context::AppContext;
use crate::error::{BelayerError, Result};
use crate::git::{GitFetcher, RemoteFetcher, SparseRequest};

use super::repo_spec;

/// Components available under the configured remote root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListReport {
    /// Alias of the configured library
    pub alias: String,
    /// Remote root that was enumerated
    pub remote_root: String,
    /// Component directory names, sorted
    pub components: Vec<String>,
}

impl ListReport {
    /// No component directories exist under the remote root. Not an error.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[derive(Debug)]
pub struct ListCommand<F = GitFetcher> {
    ctx: AppContext,
    fetcher: F,
}

impl ListCommand<GitFetcher> {
    /// Create a list command that clones with the git client under the
    /// project root.
    pub fn new(ctx: AppContext) -> Self {
        let fetcher = GitFetcher::new(ctx.project_root().to_path_buf());
        Self { ctx, fetcher }
    }
}

impl<F: RemoteFetcher> ListCommand<F> {
    pub fn with_fetcher(ctx: AppContext, fetcher: F) -> Self {
        Self { ctx, fetcher }
    }

    pub fn execute(&self) -> Result<ListReport> {
        let config = self.ctx.config_store().load()?;
        let remote_root = config.remote_root_path().to_string();

        let request = SparseRequest::listing(repo_spec(&config), remote_root.clone());
        let checkout = self.fetcher.checkout(&request)?;

        let root_dir = checkout.path(&remote_root);
        if !root_dir.is_dir() {
            return Err(BelayerError::fetch(
                "remote root lookup",
                format!("'{}' does not exist in {}", remote_root, config.github_repo),
            ));
        }
        let components = list_component_dirs(&root_dir)?;

        if let Err(err) = checkout.close() {
            tracing::warn!(error = %err, "failed to remove temporary clone");
        }

        tracing::info!(
            count = components.len(),
            remote_root = %remote_root,
            "listed components"
        );
        Ok(ListReport {
            alias: config.alias,
            remote_root,
            components,
        })
    }
}
