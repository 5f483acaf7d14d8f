//! Configuration schema for belayer-config.json
//!
//! The record is flat: every field is a scalar and the file is rewritten
//! whole on each setup run.

use serde::{Deserialize, Serialize};

/// Default install path, relative to the project root.
pub const DEFAULT_INSTALL_PATH: &str = "/src/components/";

/// Default alias for a configured component library.
pub const DEFAULT_ALIAS: &str = "belayer-ui";

/// Default folder inside the remote repository that holds components.
pub const DEFAULT_REMOTE_ROOT: &str = "src/components";

/// Environment variable consulted when the token is not stored in the file.
pub const TOKEN_ENV_VAR: &str = "BELAYER_GITHUB_TOKEN";

/// Where the access token for a private repository comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CredentialSource {
    /// Stored in plain text as `githubToken`.
    #[default]
    ConfigFile,
    /// Read from `BELAYER_GITHUB_TOKEN` at fetch time.
    Environment,
}

impl CredentialSource {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Root configuration structure for belayer-config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BelayerConfig {
    /// Local directory, relative to the project root, receiving components
    #[serde(default = "default_install_path")]
    pub install_path: String,

    /// Remote repository URL
    pub github_repo: String,

    /// Whether the repository requires authentication
    #[serde(default)]
    pub is_private: bool,

    /// Access token forwarded to git (only with `credentialSource: configFile`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    /// Human-facing library name
    #[serde(default = "default_alias")]
    pub alias: String,

    /// Folder inside the remote repository holding components
    #[serde(default = "default_remote_root")]
    pub remote_root: String,

    #[serde(default, skip_serializing_if = "CredentialSource::is_default")]
    pub credential_source: CredentialSource,
}

fn default_install_path() -> String {
    DEFAULT_INSTALL_PATH.to_string()
}

fn default_alias() -> String {
    DEFAULT_ALIAS.to_string()
}

fn default_remote_root() -> String {
    DEFAULT_REMOTE_ROOT.to_string()
}

impl BelayerConfig {
    /// Create a public-repository config with default paths and alias.
    pub fn new(github_repo: impl Into<String>) -> Self {
        Self {
            install_path: default_install_path(),
            github_repo: github_repo.into(),
            is_private: false,
            github_token: None,
            alias: default_alias(),
            remote_root: default_remote_root(),
            credential_source: CredentialSource::default(),
        }
    }

    pub fn with_install_path(mut self, install_path: impl Into<String>) -> Self {
        self.install_path = install_path.into();
        self
    }

    pub fn with_remote_root(mut self, remote_root: impl Into<String>) -> Self {
        self.remote_root = remote_root.into();
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Mark the repository private, with the token stored in the file.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.is_private = true;
        self.github_token = Some(token.into());
        self.credential_source = CredentialSource::ConfigFile;
        self
    }

    /// Mark the repository private, with the token read from the environment.
    pub fn with_env_token(mut self) -> Self {
        self.is_private = true;
        self.github_token = None;
        self.credential_source = CredentialSource::Environment;
        self
    }

    /// The remote root with surrounding slashes removed, as git expects it.
    pub fn remote_root_path(&self) -> &str {
        self.remote_root.trim_matches('/')
    }

    /// Resolve the token to forward to git, if the repository is private.
    pub fn resolve_token(&self) -> Option<String> {
        self.resolve_token_with(|key| std::env::var(key).ok())
    }

    /// Like [`resolve_token`](Self::resolve_token), reading environment
    /// variables through `lookup`.
    pub fn resolve_token_with<F>(&self, lookup: F) -> Option<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        if !self.is_private {
            return None;
        }
        let token = match self.credential_source {
            CredentialSource::ConfigFile => self.github_token.clone(),
            CredentialSource::Environment => lookup(TOKEN_ENV_VAR),
        };
        token.filter(|token| !token.trim().is_empty())
    }
}
