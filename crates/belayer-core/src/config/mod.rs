//! Project configuration
//!
//! A single JSON record at the project root captures the remote repository
//! and where its components are installed.

pub mod paths;
pub mod schema;
pub mod store;

pub use paths::{CONFIG_FILE_NAME, config_path, install_dir};
pub use schema::{
    BelayerConfig, CredentialSource, DEFAULT_ALIAS, DEFAULT_INSTALL_PATH, DEFAULT_REMOTE_ROOT,
    TOKEN_ENV_VAR,
};
pub use store::ConfigStore;
