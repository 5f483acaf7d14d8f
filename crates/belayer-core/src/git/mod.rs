//! Git operations for fetching components.
//!
//! This module provides a narrow interface over the git client:
//! - Shallow, blob-filtered, sparse clones into a scoped temp directory
//! - Cone-mode scoping to the remote root or one component
//! - Token injection and redaction for private repositories

mod fetcher;
mod spec;

pub use fetcher::{GitFetcher, RemoteFetcher, SparseCheckout, SparseRequest, TEMP_CLONE_PREFIX};
pub use spec::RepoSpec;
