//! High-level commands for belayer operations.
//!
//! These are the operations the CLI dispatches to. Each is generic over
//! [`RemoteFetcher`](crate::git::RemoteFetcher) so it can run against a
//! fake in tests.

pub mod add;
pub mod list;

pub use add::{AddCommand, AddReport};
pub use list::{ListCommand, ListReport};

use crate::config::BelayerConfig;
use crate::git::RepoSpec;

/// Build the repository spec, resolving the token per the config's
/// credential source.
pub(crate) fn repo_spec(config: &BelayerConfig) -> RepoSpec {
    let token = config.resolve_token();
    if config.is_private && token.is_none() {
        tracing::warn!(
            "repository is marked private but no access token is available; cloning without one"
        );
    }
    RepoSpec::new(&config.github_repo).with_token(token)
}
