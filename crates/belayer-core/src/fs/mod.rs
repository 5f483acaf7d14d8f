//! Filesystem primitives shared across features.

use std::fs;
use std::path::Path;

use crate::error::{BelayerError, Result};

/// Move a directory tree from `src` to `dst`, replacing any existing `dst`.
///
/// Missing parents of `dst` are created. A plain rename is tried first;
/// when that fails (e.g. across filesystems) the tree is copied and the
/// source removed.
pub fn move_dir(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(BelayerError::io(
            format!("Source is not a directory: {}", src.display()),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    }

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BelayerError::io(
                format!("Failed to create directory: {}", parent.display()),
                e,
            )
        })?;
    }

    if dst.symlink_metadata().is_ok() {
        tracing::warn!(path = %dst.display(), "replacing existing destination");
        remove_path(dst)?;
    }

    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::debug!(error = %err, "rename failed; falling back to copy");
            copy_tree(src, dst)?;
            fs::remove_dir_all(src).map_err(|e| {
                BelayerError::io(format!("Failed to remove {}", src.display()), e)
            })
        }
    }
}

fn remove_path(path: &Path) -> Result<()> {
    let is_dir = path
        .symlink_metadata()
        .is_ok_and(|meta| meta.file_type().is_dir());
    let result = if is_dir {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| BelayerError::io(format!("Failed to remove {}", path.display()), e))
}

/// Copy a directory tree, excluding .git directories.
///
/// Symlinks are recreated as links, never followed.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(|e| {
        BelayerError::io(format!("Failed to create directory: {}", dst.display()), e)
    })?;
    let entries = fs::read_dir(src)
        .map_err(|e| BelayerError::io(format!("Failed to read directory: {}", src.display()), e))?;
    for entry in entries {
        let entry = entry
            .map_err(|e| BelayerError::io(format!("Failed to read {}", src.display()), e))?;
        let file_name = entry.file_name();
        if file_name == ".git" {
            continue;
        }
        let src_path = entry.path();
        let dst_path = dst.join(&file_name);
        let file_type = entry
            .file_type()
            .map_err(|e| BelayerError::io(format!("Failed to stat {}", src_path.display()), e))?;
        if file_type.is_symlink() {
            copy_symlink(&src_path, &dst_path)?;
        } else if file_type.is_dir() {
            copy_tree(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).map_err(|e| {
                BelayerError::io(format!("Failed to copy {}", src_path.display()), e)
            })?;
        }
    }
    Ok(())
}

fn copy_symlink(src_link: &Path, dst_link: &Path) -> Result<()> {
    let target = fs::read_link(src_link)
        .map_err(|e| BelayerError::io(format!("Failed to read link {}", src_link.display()), e))?;
    create_symlink(&target, src_link, dst_link).map_err(|e| {
        BelayerError::io(format!("Failed to create link {}", dst_link.display()), e)
    })
}

#[cfg(unix)]
fn create_symlink(target: &Path, _src_link: &Path, dst_link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, dst_link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, src_link: &Path, dst_link: &Path) -> std::io::Result<()> {
    if src_link.is_dir() {
        std::os::windows::fs::symlink_dir(target, dst_link)
    } else {
        std::os::windows::fs::symlink_file(target, dst_link)
    }
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_target: &Path, _src_link: &Path, _dst_link: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "Symlinks are not supported on this platform",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn move_creates_missing_parents() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("clone/src/components/Button");
        write(&src.join("index.js"), "button");
        write(&src.join("styles/button.css"), "css");

        let dst = temp.path().join("project/src/components/Button");
        move_dir(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dst.join("index.js")).unwrap(), "button");
        assert_eq!(
            fs::read_to_string(dst.join("styles/button.css")).unwrap(),
            "css"
        );
    }

    #[test]
    fn move_replaces_existing_destination() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write(&src.join("new.js"), "new");
        let dst = temp.path().join("dst");
        write(&dst.join("old.js"), "old");

        move_dir(&src, &dst).unwrap();

        assert!(dst.join("new.js").exists());
        assert!(!dst.join("old.js").exists());
    }

    #[test]
    fn copy_tree_skips_git_metadata() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write(&src.join("index.js"), "x");
        write(&src.join(".git/HEAD"), "ref");
        let dst = temp.path().join("dst");

        copy_tree(&src, &dst).unwrap();

        assert!(dst.join("index.js").exists());
        assert!(!dst.join(".git").exists());
    }

    #[cfg(unix)]
    #[test]
    fn copy_tree_recreates_symlinks_without_following() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write(&src.join("assets/logo.svg"), "svg");
        std::os::unix::fs::symlink("assets", src.join("assets-link")).unwrap();
        // Cycle back to the component root.
        std::os::unix::fs::symlink("..", src.join("assets/parent")).unwrap();
        let dst = temp.path().join("dst");

        copy_tree(&src, &dst).unwrap();

        let link = dst.join("assets-link");
        assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), Path::new("assets"));
        assert_eq!(fs::read_to_string(link.join("logo.svg")).unwrap(), "svg");

        let cycle = dst.join("assets/parent");
        assert!(cycle.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&cycle).unwrap(), Path::new(".."));
    }

    #[test]
    fn move_missing_source_errors() {
        let temp = TempDir::new().unwrap();
        let result = move_dir(&temp.path().join("nope"), &temp.path().join("dst"));
        assert!(result.is_err());
    }
}
