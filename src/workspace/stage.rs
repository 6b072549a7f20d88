//! Source staging
//!
//! Copies caller-supplied component source into the workspace staging area
//! and points the bootstrap entry file at it. Two modes: a lone component
//! file is staged next to its siblings and renamed to the canonical entry
//! name; a whole root folder is staged as-is and must already contain the
//! entry component at the path the caller named.

use super::{Workspace, CANONICAL_ENTRY};
use crate::error::{WeftError, WeftResult};
use crate::fsops;
use std::path::{Component, Path};
use tracing::debug;

/// Stage `entry` into the workspace and rewrite the bootstrap import.
///
/// Returns the staged entry path relative to the workspace `src/` directory,
/// forward-slash normalized regardless of platform.
pub fn stage(ws: &Workspace, entry: &Path, root_folder: Option<&Path>) -> WeftResult<String> {
    // One staged component tree at a time, even after a failed prior build.
    fsops::clean_dir(&ws.staging_dir())?;

    let staged_rel = match root_folder {
        None => stage_single_file(ws, entry)?,
        Some(root) => stage_tree(ws, entry, root)?,
    };

    ws.write_bootstrap(&staged_rel)?;
    debug!("Staged entry {}", staged_rel);
    Ok(staged_rel)
}

fn stage_single_file(ws: &Workspace, entry: &Path) -> WeftResult<String> {
    if !entry.is_file() {
        return Err(WeftError::PathNotFound(entry.to_path_buf()));
    }

    let parent = match entry.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fsops::copy_dir(parent, &ws.staging_dir())?;

    // A non-canonical entry gets an App.ui copy alongside the original.
    let name = entry
        .file_name()
        .ok_or_else(|| WeftError::PathInvalid {
            path: entry.to_path_buf(),
            reason: "entry has no file name".to_string(),
        })?;
    if name != CANONICAL_ENTRY {
        fsops::copy_file(entry, &ws.staging_dir().join(CANONICAL_ENTRY))?;
    }

    Ok(format!("app/{CANONICAL_ENTRY}"))
}

fn stage_tree(ws: &Workspace, entry: &Path, root: &Path) -> WeftResult<String> {
    if !root.is_dir() {
        return Err(WeftError::PathNotFound(root.to_path_buf()));
    }

    fsops::copy_dir(root, &ws.staging_dir())?;

    // The entry may be given relative to the root folder or prefixed with it.
    let rel = entry.strip_prefix(root).unwrap_or(entry);
    let rel_slash = forward_slashes(rel)?;

    let staged_entry = ws.staging_dir().join(rel);
    if !staged_entry.is_file() {
        return Err(WeftError::NoDefaultEntryFound {
            expected: rel_slash,
            dir: ws.staging_dir(),
        });
    }

    Ok(format!("app/{rel_slash}"))
}

/// Normalize a relative path to forward slashes, rejecting anything that
/// could escape the staging area.
fn forward_slashes(path: &Path) -> WeftResult<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => {
                return Err(WeftError::PathInvalid {
                    path: path.to_path_buf(),
                    reason: "entry path must be relative and stay inside the root folder"
                        .to_string(),
                })
            }
        }
    }
    if parts.is_empty() {
        return Err(WeftError::PathInvalid {
            path: path.to_path_buf(),
            reason: "empty entry path".to_string(),
        });
    }
    Ok(parts.join("/"))
}
