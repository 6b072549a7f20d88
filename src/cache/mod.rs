//! Durable per-build artifact cache
//!
//! On-disk directory keyed by build id, laid out as
//! `<root>/<buildId>/bundle/{bundle.js,bundle.css}`. A build directory is a
//! hit when its script bundle exists; artifacts are never mutated after they
//! are written, only deleted wholesale by `cache clear`.

pub mod key;

pub use key::compute_build_id;

use crate::error::{WeftError, WeftResult};
use crate::fsops;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Script bundle filename, always present and non-empty on a finished build
pub const SCRIPT_BUNDLE: &str = "bundle.js";

/// Style bundle filename, always present, possibly a zero-length placeholder
pub const STYLE_BUNDLE: &str = "bundle.css";

/// Locations of one finished (or in-progress) build's outputs
#[derive(Debug, Clone)]
pub struct BuildArtifact {
    /// Content-hash-derived cache key
    pub build_id: String,
    /// Directory holding both bundles
    pub output_dir: PathBuf,
    /// `<output_dir>/bundle.js`
    pub script: PathBuf,
    /// `<output_dir>/bundle.css`
    pub style: PathBuf,
}

/// On-disk cache of build artifacts
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn artifact(&self, build_id: &str) -> BuildArtifact {
        let output_dir = self.root.join(build_id).join("bundle");
        BuildArtifact {
            build_id: build_id.to_string(),
            script: output_dir.join(SCRIPT_BUNDLE),
            style: output_dir.join(STYLE_BUNDLE),
            output_dir,
        }
    }

    /// Return the artifact for `build_id` if its script bundle already exists
    pub fn lookup(&self, build_id: &str) -> Option<BuildArtifact> {
        let artifact = self.artifact(build_id);
        if artifact.script.is_file() {
            debug!("Cache hit for {}", build_id);
            Some(artifact)
        } else {
            debug!("Cache miss for {}", build_id);
            None
        }
    }

    /// Create the output directory for a fresh build
    pub fn prepare(&self, build_id: &str) -> WeftResult<BuildArtifact> {
        let artifact = self.artifact(build_id);
        fs::create_dir_all(&artifact.output_dir).map_err(|e| {
            WeftError::io(
                format!("creating cache directory {}", artifact.output_dir.display()),
                e,
            )
        })?;
        Ok(artifact)
    }

    /// Build ids currently present in the cache
    pub fn list(&self) -> WeftResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root)
            .map_err(|e| WeftError::io(format!("reading cache root {}", self.root.display()), e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| WeftError::io(format!("reading cache root {}", self.root.display()), e))?;
            if entry.path().is_dir() {
                ids.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Delete every cached artifact
    pub fn clear(&self) -> WeftResult<()> {
        fsops::clean_dir(&self.root)
    }
}
