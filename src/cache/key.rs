//! Content-addressed build identifiers
//!
//! A build id is derived from the bytes of every regular file under the
//! staged source tree. Per-file sha256 digests are sorted before being
//! combined, so the id is independent of directory enumeration order and
//! stable across platforms.

use crate::error::{WeftError, WeftResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Short fixed prefix of every build id
const BUILD_ID_PREFIX: &str = "b";

/// Hex characters of the combined digest kept in the id
const BUILD_ID_HEX_LEN: usize = 8;

/// Hash one file's contents, returning the full hex digest
fn hash_file(path: &Path) -> WeftResult<String> {
    let contents = fs::read(path).map_err(|e| WeftError::Io {
        context: format!("reading staged file {}", path.display()),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&contents);
    Ok(hex::encode(hasher.finalize()))
}

/// Compute the build id for the staged tree rooted at `root`.
///
/// Byte-identical trees always yield the same id regardless of walk order;
/// any single-byte change in any nested file changes it.
pub fn compute_build_id(root: &Path) -> WeftResult<String> {
    let mut digests = Vec::new();

    for entry in WalkDir::new(root) {
        let entry =
            entry.map_err(|e| WeftError::io(format!("walking {}", root.display()), e.into()))?;
        if entry.file_type().is_file() {
            digests.push(hash_file(entry.path())?);
        }
    }

    // Sort, then combine: the id must not depend on traversal order.
    digests.sort_unstable();

    let mut hasher = Sha256::new();
    for digest in &digests {
        hasher.update(digest.as_bytes());
    }
    let combined = hex::encode(hasher.finalize());

    let build_id = format!("{BUILD_ID_PREFIX}{}", &combined[..BUILD_ID_HEX_LEN]);
    debug!("Computed build id {} over {} files", build_id, digests.len());
    Ok(build_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_tree(root: &Path, files: &[(&str, &str)]) {
        for (rel, content) in files {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }

    #[test]
    fn id_shape() {
        let temp = TempDir::new().unwrap();
        write_tree(temp.path(), &[("App.ui", "<p>hi</p>")]);

        let id = compute_build_id(temp.path()).unwrap();
        assert_eq!(id.len(), 9);
        assert!(id.starts_with('b'));
        assert!(id[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn identical_trees_same_id() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let files = [
            ("App.ui", "<p>root</p>"),
            ("widgets/Button.ui", "<button/>"),
            ("widgets/deep/Icon.ui", "<svg/>"),
        ];
        write_tree(a.path(), &files);
        // Create in reverse order so on-disk enumeration is likely to differ.
        let mut reversed = files;
        reversed.reverse();
        write_tree(b.path(), &reversed);

        assert_eq!(
            compute_build_id(a.path()).unwrap(),
            compute_build_id(b.path()).unwrap()
        );
    }

    #[test]
    fn single_byte_change_changes_id() {
        let temp = TempDir::new().unwrap();
        write_tree(
            temp.path(),
            &[("App.ui", "<p>root</p>"), ("widgets/Button.ui", "<button/>")],
        );
        let before = compute_build_id(temp.path()).unwrap();

        fs::write(temp.path().join("widgets/Button.ui"), "<button />").unwrap();
        let after = compute_build_id(temp.path()).unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn id_is_the_sorted_digest_combination() {
        let temp = TempDir::new().unwrap();
        // Written in an order that differs from digest order.
        write_tree(temp.path(), &[("z.ui", "zzz"), ("a.ui", "aaa")]);

        let mut digests: Vec<String> = ["zzz", "aaa"]
            .iter()
            .map(|content| hex::encode(Sha256::digest(content.as_bytes())))
            .collect();
        digests.sort_unstable();

        let mut hasher = Sha256::new();
        for digest in &digests {
            hasher.update(digest.as_bytes());
        }
        let expected = format!("b{}", &hex::encode(hasher.finalize())[..8]);

        assert_eq!(compute_build_id(temp.path()).unwrap(), expected);
    }

    #[test]
    fn id_ignores_file_layout() {
        // Only file bytes feed the id, so the same contents under different
        // nesting (hence a different walk order) must agree.
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        write_tree(a.path(), &[("App.ui", "<p/>"), ("deep/nested/B.ui", "<b/>")]);
        write_tree(b.path(), &[("x/App.ui", "<p/>"), ("B.ui", "<b/>")]);

        assert_eq!(
            compute_build_id(a.path()).unwrap(),
            compute_build_id(b.path()).unwrap()
        );
    }

    #[test]
    fn empty_tree_has_stable_id() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        assert_eq!(
            compute_build_id(a.path()).unwrap(),
            compute_build_id(b.path()).unwrap()
        );
    }
}
