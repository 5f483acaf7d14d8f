//! Git source specification types.

use url::Url;

/// Username GitHub accepts alongside a personal access token.
const TOKEN_USERNAME: &str = "x-access-token";

const REDACTED: &str = "***";

/// A remote repository plus the credential forwarded to git, if any.
#[derive(Clone, PartialEq, Eq)]
pub struct RepoSpec {
    /// Repository URL as configured (e.g., "https://github.com/org/repo.git")
    pub url: String,
    /// Personal access token for private repositories
    pub token: Option<String>,
}

impl std::fmt::Debug for RepoSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoSpec")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| REDACTED))
            .finish()
    }
}

impl RepoSpec {
    /// Create a new RepoSpec with just a repo URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
        }
    }

    /// Set the access token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// The URL handed to `git clone`.
    ///
    /// For http(s) URLs the token travels as userinfo. Other schemes
    /// (ssh, file, scp-like `git@host:path`) get the plain URL and the
    /// token is dropped.
    pub fn clone_url(&self) -> String {
        let Some(token) = self.token.as_deref() else {
            return self.url.clone();
        };

        match Url::parse(&self.url) {
            Ok(mut parsed) if matches!(parsed.scheme(), "http" | "https") => {
                if parsed.set_username(TOKEN_USERNAME).is_ok()
                    && parsed.set_password(Some(token)).is_ok()
                {
                    return parsed.to_string();
                }
                tracing::warn!(url = %self.url, "could not attach access token to repository URL");
                self.url.clone()
            }
            _ => {
                tracing::warn!(
                    url = %self.url,
                    "access token only applies to http(s) repository URLs; ignoring it"
                );
                self.url.clone()
            }
        }
    }

    /// Replace every occurrence of the token in `text`.
    pub fn redact(&self, text: &str) -> String {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() => text.replace(token, REDACTED),
            _ => text.to_string(),
        }
    }
}
