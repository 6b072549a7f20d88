//! Configuration for the build pipeline
//!
//! Loaded from a project-local `weft.toml` when present, otherwise defaults.
//! Every field can also be set per-build from the CLI.

use crate::error::{WeftError, WeftResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Upstream skeleton cloned into a freshly created workspace
pub const DEFAULT_TEMPLATE_URL: &str = "https://github.com/weft-ui/weft-template";

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Shared build workspace, wiped and rebuilt on variant mismatch
    pub workspace_dir: PathBuf,

    /// Durable artifact cache root
    pub cache_dir: PathBuf,

    /// Template repository cloned when the workspace is (re)created
    pub template_url: String,

    /// Default package manager (overridable per build)
    pub package_manager: String,

    /// Budget for each external tool invocation
    pub tool_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_dir: PathBuf::from(".weft/workspace"),
            cache_dir: PathBuf::from(".weft/cache"),
            template_url: DEFAULT_TEMPLATE_URL.to_string(),
            package_manager: "npm".to_string(),
            tool_timeout_secs: 600,
        }
    }
}

impl Config {
    /// Default project-local config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("weft.toml")
    }

    /// Load configuration from `path`, or from `weft.toml` in the current
    /// directory. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> WeftResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| WeftError::io(format!("reading config from {}", path.display()), e))?;

        let config: Self = toml::from_str(&content).map_err(|e| WeftError::ConfigInvalid {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if config.tool_timeout_secs == 0 {
            return Err(WeftError::ConfigInvalid {
                path,
                reason: "tool_timeout_secs must be greater than zero".to_string(),
            });
        }

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.package_manager, "npm");
        assert_eq!(config.tool_timeout_secs, 600);
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("weft.toml");
        std::fs::write(&path, "package_manager = \"pnpm\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.package_manager, "pnpm");
        assert_eq!(config.workspace_dir, PathBuf::from(".weft/workspace"));
    }

    #[test]
    fn reject_zero_timeout() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("weft.toml");
        std::fs::write(&path, "tool_timeout_secs = 0\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, WeftError::ConfigInvalid { .. }));
    }

    #[test]
    fn reject_unknown_field() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("weft.toml");
        std::fs::write(&path, "no_such_field = true\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, WeftError::ConfigInvalid { .. }));
    }
}
