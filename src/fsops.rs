//! Filesystem helpers shared by the workspace and cache layers

use crate::error::{WeftError, WeftResult};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Copy a single file, creating parent directories of the destination
pub fn copy_file(from: &Path, to: &Path) -> WeftResult<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| WeftError::io(format!("creating directory {}", parent.display()), e))?;
    }

    fs::copy(from, to)
        .map_err(|e| WeftError::copy_failed(from, to, e))
        .map(|_| ())
}

/// Copy a directory tree into `to`, skipping `.git` directories
pub fn copy_dir(from: &Path, to: &Path) -> WeftResult<()> {
    for entry in WalkDir::new(from).into_iter().filter_entry(|e| {
        !(e.file_type().is_dir() && e.file_name() == ".git")
    }) {
        let entry = entry.map_err(|e| {
            WeftError::io(format!("walking {}", from.display()), e.into())
        })?;

        let rel = entry
            .path()
            .strip_prefix(from)
            .map_err(|_| WeftError::PathInvalid {
                path: entry.path().to_path_buf(),
                reason: format!("not under {}", from.display()),
            })?;
        let dest = to.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)
                .map_err(|e| WeftError::io(format!("creating directory {}", dest.display()), e))?;
        } else {
            copy_file(entry.path(), &dest)?;
        }
    }

    Ok(())
}

/// Remove a directory tree and recreate it empty
pub fn clean_dir(dir: &Path) -> WeftResult<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .map_err(|e| WeftError::io(format!("removing {}", dir.display()), e))?;
    }
    fs::create_dir_all(dir)
        .map_err(|e| WeftError::io(format!("creating directory {}", dir.display()), e))
}

/// True when `dir` does not exist or contains no entries
pub fn is_missing_or_empty(dir: &Path) -> WeftResult<bool> {
    if !dir.exists() {
        return Ok(true);
    }
    let mut entries = fs::read_dir(dir)
        .map_err(|e| WeftError::io(format!("reading directory {}", dir.display()), e))?;
    Ok(entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copy_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.txt");
        fs::write(&src, "hello").unwrap();

        let dst = temp.path().join("nested/deep/b.txt");
        copy_file(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst).unwrap(), "hello");
    }

    #[test]
    fn copy_dir_skips_git() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::create_dir_all(src.join(".git")).unwrap();
        fs::write(src.join("f.txt"), "x").unwrap();
        fs::write(src.join("sub/g.txt"), "y").unwrap();
        fs::write(src.join(".git/config"), "z").unwrap();

        let dst = temp.path().join("dst");
        copy_dir(&src, &dst).unwrap();

        assert!(dst.join("f.txt").exists());
        assert!(dst.join("sub/g.txt").exists());
        assert!(!dst.join(".git").exists());
    }

    #[test]
    fn clean_dir_empties() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("d");
        fs::create_dir_all(dir.join("inner")).unwrap();
        fs::write(dir.join("f"), "x").unwrap();

        clean_dir(&dir).unwrap();

        assert!(dir.exists());
        assert!(is_missing_or_empty(&dir).unwrap());
    }

    #[test]
    fn missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(is_missing_or_empty(&temp.path().join("nope")).unwrap());
    }
}
