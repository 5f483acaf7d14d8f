//! Belayer Core Library
//!
//! Pulls individual component directories out of a remote git repository
//! into a local project, driven by a small per-project configuration.

pub mod commands;
pub mod component;
pub mod config;
pub mod context;
pub mod error;
pub mod fs;
pub mod git;

pub use error::{BelayerError, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{BelayerConfig, ConfigStore, CredentialSource};

    // Commands
    pub use crate::commands::{AddCommand, AddReport, ListCommand, ListReport};

    // Git
    pub use crate::git::{GitFetcher, RemoteFetcher, RepoSpec, SparseCheckout, SparseRequest};

    pub use crate::component::ComponentName;
    pub use crate::context::AppContext;
    pub use crate::error::BelayerError;
}
