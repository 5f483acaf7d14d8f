//! Git fetcher for sparse, blob-filtered clones of a component repository.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::error::{BelayerError, Result};

use super::RepoSpec;

/// Prefix of the per-invocation clone directory.
pub const TEMP_CLONE_PREFIX: &str = "belayer-temp-clone-";

/// Inherited variables that would point git at some other repository.
const GIT_ENV_OVERRIDES: [&str; 4] = [
    "GIT_DIR",
    "GIT_WORK_TREE",
    "GIT_INDEX_FILE",
    "GIT_COMMON_DIR",
];

/// What to materialize from a remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseRequest {
    pub repo: RepoSpec,
    /// Cone-mode path prefixes inside the repository
    pub paths: Vec<String>,
    /// Pull file content for the scoped paths after setting the cone
    pub materialize: bool,
}

impl SparseRequest {
    /// Directory enumeration under `root`; no pull.
    pub fn listing(repo: RepoSpec, root: impl Into<String>) -> Self {
        Self {
            repo,
            paths: scoped_paths(root.into()),
            materialize: false,
        }
    }

    /// Full content of a single subdirectory.
    pub fn install(repo: RepoSpec, path: impl Into<String>) -> Self {
        Self {
            repo,
            paths: scoped_paths(path.into()),
            materialize: true,
        }
    }
}

/// An empty path means the repository root, i.e. no sparse scope.
fn scoped_paths(path: String) -> Vec<String> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![trimmed.to_string()]
    }
}

/// A temporary clone owned by a single command invocation.
///
/// The directory is deleted when this value is dropped, on success and
/// error paths alike.
#[derive(Debug)]
pub struct SparseCheckout {
    dir: TempDir,
}

impl SparseCheckout {
    pub fn new(dir: TempDir) -> Self {
        Self { dir }
    }

    /// Root of the working tree.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a repository-relative location inside the working tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root().to_path_buf(), |acc, segment| acc.join(segment))
    }

    /// Delete the clone, reporting failures instead of ignoring them.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| {
            BelayerError::io(
                format!("Failed to remove temporary clone: {}", path.display()),
                e,
            )
        })
    }
}

/// Narrow seam between the commands and however the clone is produced.
pub trait RemoteFetcher {
    fn checkout(&self, request: &SparseRequest) -> Result<SparseCheckout>;
}

impl<T: RemoteFetcher + ?Sized> RemoteFetcher for &T {
    fn checkout(&self, request: &SparseRequest) -> Result<SparseCheckout> {
        (**self).checkout(request)
    }
}

/// Fetches by spawning the `git` command-line client.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    work_dir: PathBuf,
}

impl GitFetcher {
    /// Create a fetcher that places temporary clones under `work_dir`.
    pub fn new(work_dir: PathBuf) -> Self {
        Self { work_dir }
    }

    /// Ensure git version is 2.25+ (required for sparse checkout).
    pub fn ensure_git_version() -> Result<()> {
        let output = Command::new("git")
            .arg("--version")
            .output()
            .map_err(|e| BelayerError::GitUnavailable(format!("Failed to invoke git: {e}")))?;
        if !output.status.success() {
            return Err(BelayerError::GitUnavailable(
                "Failed to run git --version".to_string(),
            ));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let (major, minor) = parse_git_version(&stdout).ok_or_else(|| {
            BelayerError::GitUnavailable(format!(
                "Unexpected git version output: {}",
                stdout.trim()
            ))
        })?;
        if major > 2 || (major == 2 && minor >= 25) {
            return Ok(());
        }
        Err(BelayerError::GitUnavailable(
            "Git 2.25+ is required for sparse checkout. Please upgrade git.".to_string(),
        ))
    }

    fn temp_clone_dir(&self) -> Result<TempDir> {
        std::fs::create_dir_all(&self.work_dir).map_err(|e| {
            BelayerError::io(
                format!("Failed to create directory: {}", self.work_dir.display()),
                e,
            )
        })?;
        tempfile::Builder::new()
            .prefix(TEMP_CLONE_PREFIX)
            .tempdir_in(&self.work_dir)
            .map_err(|e| {
                BelayerError::io(
                    format!(
                        "Failed to create temporary clone directory in {}",
                        self.work_dir.display()
                    ),
                    e,
                )
            })
    }

    /// Run a git command, mapping a non-zero exit to `FetchFailure`.
    fn run_git(repo: &RepoSpec, step: &str, cwd: Option<&Path>, args: &[&str]) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.args(args).env("GIT_TERMINAL_PROMPT", "0");
        for key in GIT_ENV_OVERRIDES {
            cmd.env_remove(key);
        }
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        tracing::debug!(step, args = %repo.redact(&args.join(" ")), "running git");

        let output = cmd
            .output()
            .map_err(|e| BelayerError::fetch(step, format!("Failed to invoke git: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(BelayerError::fetch(step, repo.redact(&detail)));
        }
        Ok(())
    }
}

impl RemoteFetcher for GitFetcher {
    fn checkout(&self, request: &SparseRequest) -> Result<SparseCheckout> {
        Self::ensure_git_version()?;

        let checkout = SparseCheckout::new(self.temp_clone_dir()?);
        let dir = checkout
            .root()
            .to_str()
            .ok_or_else(|| BelayerError::fetch("git clone", "Invalid temporary clone path"))?
            .to_string();
        let repo = &request.repo;
        let clone_url = repo.clone_url();

        // Tree metadata only; blobs arrive on demand for the sparse cone.
        Self::run_git(
            repo,
            "git clone",
            None,
            &[
                "clone",
                "--depth=1",
                "--filter=blob:none",
                "--sparse",
                &clone_url,
                &dir,
            ],
        )?;

        Self::run_git(
            repo,
            "git sparse-checkout init",
            Some(checkout.root()),
            &["sparse-checkout", "init", "--cone"],
        )?;

        if request.paths.is_empty() {
            Self::run_git(
                repo,
                "git sparse-checkout disable",
                Some(checkout.root()),
                &["sparse-checkout", "disable"],
            )?;
        } else {
            let mut set_args = vec!["sparse-checkout", "set"];
            set_args.extend(request.paths.iter().map(String::as_str));
            Self::run_git(
                repo,
                "git sparse-checkout set",
                Some(checkout.root()),
                &set_args,
            )?;
        }

        if request.materialize {
            Self::run_git(
                repo,
                "git pull",
                Some(checkout.root()),
                &["pull", "--ff-only"],
            )?;
        }

        Ok(checkout)
    }
}

/// Extract `(major, minor)` from `git --version` output.
pub(crate) fn parse_git_version(output: &str) -> Option<(u32, u32)> {
    let version = output.split_whitespace().nth(2)?;
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}
