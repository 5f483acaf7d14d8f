#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::Command;

use belayer_core::error::{BelayerError, Result};
use belayer_core::git::{RemoteFetcher, SparseCheckout, SparseRequest};
use tempfile::TempDir;

const GIT_ENV_OVERRIDES: [&str; 4] = [
    "GIT_DIR",
    "GIT_WORK_TREE",
    "GIT_INDEX_FILE",
    "GIT_COMMON_DIR",
];

pub fn git_command() -> Command {
    let mut cmd = Command::new("git");
    for key in GIT_ENV_OVERRIDES {
        cmd.env_remove(key);
    }
    cmd
}

pub fn run_git(repo: &Path, args: &[&str]) {
    let status = git_command()
        .args(args)
        .current_dir(repo)
        .status()
        .expect("Failed to invoke git");
    assert!(status.success(), "git command failed: {:?}", args);
}

pub fn write_file(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().expect("file has parent"))
        .expect("Failed to create parent dir");
    std::fs::write(path, content).expect("Failed to write file");
}

/// Build a committed repository from `(relative path, content)` pairs.
pub fn init_component_repo(repo: &Path, files: &[(&str, &str)]) -> String {
    std::fs::create_dir_all(repo).expect("Failed to create repo dir");
    run_git(repo, &["init"]);
    run_git(repo, &["checkout", "-b", "main"]);
    run_git(repo, &["config", "user.email", "test@example.com"]);
    run_git(repo, &["config", "user.name", "Test User"]);
    run_git(repo, &["config", "commit.gpgsign", "false"]);
    run_git(repo, &["config", "uploadpack.allowFilter", "true"]);

    write_file(&repo.join("README.md"), "root file");
    for (relative, content) in files {
        write_file(&repo.join(relative), content);
    }

    run_git(repo, &["add", "."]);
    run_git(repo, &["commit", "-m", "init"]);

    url::Url::from_directory_path(repo)
        .expect("repo root should convert to file URL")
        .to_string()
}

/// Fetcher that copies the requested paths out of a local directory tree
/// and records every request it receives.
pub struct DirectoryFetcher {
    source: PathBuf,
    work_dir: PathBuf,
    pub requests: RefCell<Vec<SparseRequest>>,
}

impl DirectoryFetcher {
    pub fn new(source: PathBuf, work_dir: PathBuf) -> Self {
        Self {
            source,
            work_dir,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl RemoteFetcher for DirectoryFetcher {
    fn checkout(&self, request: &SparseRequest) -> Result<SparseCheckout> {
        self.requests.borrow_mut().push(request.clone());
        std::fs::create_dir_all(&self.work_dir).expect("Failed to create work dir");
        let dir = tempfile::Builder::new()
            .prefix("belayer-temp-clone-")
            .tempdir_in(&self.work_dir)
            .expect("Failed to create temp clone");

        for path in &request.paths {
            let src = self.source.join(path);
            if src.is_dir() {
                copy_tree(&src, &dir.path().join(path));
            }
        }
        Ok(SparseCheckout::new(dir))
    }
}

/// Fetcher that always fails the way an unreachable remote does.
pub struct FailingFetcher {
    pub requests: RefCell<Vec<SparseRequest>>,
}

impl FailingFetcher {
    pub fn new() -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl RemoteFetcher for FailingFetcher {
    fn checkout(&self, request: &SparseRequest) -> Result<SparseCheckout> {
        self.requests.borrow_mut().push(request.clone());
        Err(BelayerError::FetchFailure {
            step: "git clone".to_string(),
            message: "fatal: repository not found".to_string(),
        })
    }
}

pub fn copy_tree(src: &Path, dst: &Path) {
    std::fs::create_dir_all(dst).expect("Failed to create dir");
    for entry in std::fs::read_dir(src).expect("Failed to read dir") {
        let entry = entry.expect("Failed to read entry");
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            copy_tree(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), &target).expect("Failed to copy file");
        }
    }
}

/// Scratch project with a temp root; keeps the TempDir alive.
pub struct TestProject {
    pub temp: TempDir,
    pub project: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let project = temp.path().join("project");
        std::fs::create_dir_all(&project).expect("Failed to create project dir");
        Self { temp, project }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }
}
