//! Error types for weft
//!
//! All modules use `WeftResult<T>` as their return type. Pipeline errors are
//! fatal to the build that raised them; nothing in the pipeline retries.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for weft operations
pub type WeftResult<T> = Result<T, WeftError>;

/// All errors that can occur in weft
#[derive(Error, Debug)]
pub enum WeftError {
    // Environment errors
    #[error("Required tool not found on PATH: {name}")]
    ToolNotFound { name: String },

    #[error("{tool} timed out after {seconds}s in {dir}")]
    ToolTimedOut {
        tool: String,
        seconds: u64,
        dir: PathBuf,
    },

    // Workspace errors
    #[error("Failed to fetch workspace template {url}: {reason}")]
    TemplateFetchFailed { url: String, reason: String },

    #[error("Dependency install failed: {package_manager} in {dir}: {reason}")]
    DependencyInstallFailed {
        package_manager: String,
        dir: PathBuf,
        reason: String,
    },

    // Staging errors
    #[error("No default entry component found: expected {expected} under {dir}")]
    NoDefaultEntryFound { expected: String, dir: PathBuf },

    // Bundler errors
    #[error("Bundle compilation failed: {tool} in {dir}: {reason}")]
    BundleCompileFailed {
        tool: String,
        dir: PathBuf,
        reason: String,
    },

    #[error("Could not locate build assets in {dir}: {reason}")]
    AssetLocateFailed { dir: PathBuf, reason: String },

    #[error("Failed to copy {from} to {to}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid path: {path}: {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl WeftError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a copy error
    pub fn copy_failed(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CopyFailed {
            from: from.into(),
            to: to.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::ToolNotFound { name } if name == "git" => {
                Some("Install git and make sure it is on PATH".to_string())
            }
            Self::ToolNotFound { name } => Some(format!(
                "Install Node.js and make sure `{name}` is on PATH"
            )),
            Self::TemplateFetchFailed { .. } => {
                Some("Check network access to the template repository".to_string())
            }
            Self::DependencyInstallFailed {
                package_manager,
                dir,
                ..
            } => Some(format!(
                "Try running `{package_manager} install` manually in {}",
                dir.display()
            )),
            _ => None,
        }
    }
}
