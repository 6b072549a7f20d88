//! Shared build workspace management
//!
//! The workspace is a single long-lived directory tree holding the cloned
//! template skeleton, its installed base dependencies, and the staging area
//! component source is copied into before each compile. It represents exactly
//! one variant at a time; a request for the other variant wipes and rebuilds
//! it from scratch.

pub mod stage;

use crate::error::{WeftError, WeftResult};
use crate::fsops;
use crate::tools::ToolRunner;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension of component sources
pub const COMPONENT_EXT: &str = "ui";

/// Canonical entry component filename
pub const CANONICAL_ENTRY: &str = "App.ui";

/// Bootstrap import path restored after every reset
const DEFAULT_ENTRY_IMPORT: &str = "app/App.ui";

const MARKER_FILE: &str = ".weft-variant";
const BOOTSTRAP_REL: &str = "src/main.js";
const TYPEDECL_REL: &str = "src/weft.d.ts";
const STAGING_REL: &str = "src/app";
const OUTPUT_REL: &str = "dist";
const ASSET_OUTPUT_REL: &str = "dist/assets";
const PREPROCESSOR_CONFIG: &str = "preprocessor.config.cjs";

/// Workspace configuration axis; switching forces reinitialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Scripts only, no style preprocessing
    Plain,
    /// Style-preprocessor config present in the workspace
    Styled,
}

impl Variant {
    /// Variant implied by the build options
    pub fn from_flag(use_style_preprocessor: bool) -> Self {
        if use_style_preprocessor {
            Self::Styled
        } else {
            Self::Plain
        }
    }

    fn from_marker(s: &str) -> Option<Self> {
        match s {
            "plain" => Some(Self::Plain),
            "styled" => Some(Self::Styled),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Styled => "styled",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to the shared on-disk build environment
pub struct Workspace {
    root: PathBuf,
    template_url: String,
}

impl Workspace {
    /// Create a handle; nothing is touched on disk until [`Workspace::ensure`]
    pub fn new(root: impl Into<PathBuf>, template_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            template_url: template_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Staging area component source is copied into
    pub fn staging_dir(&self) -> PathBuf {
        self.root.join(STAGING_REL)
    }

    /// Fixed location the bundler writes generated index assets to
    pub fn asset_output_dir(&self) -> PathBuf {
        self.root.join(ASSET_OUTPUT_REL)
    }

    fn bootstrap_path(&self) -> PathBuf {
        self.root.join(BOOTSTRAP_REL)
    }

    fn marker_path(&self) -> PathBuf {
        self.root.join(MARKER_FILE)
    }

    /// Variant recorded by the marker file, if any
    pub fn current_variant(&self) -> Option<Variant> {
        fs::read_to_string(self.marker_path())
            .ok()
            .and_then(|s| Variant::from_marker(s.trim()))
    }

    /// Make sure the workspace exists and matches `variant`, rebuilding the
    /// baseline from scratch when it is absent, empty, or mismatched.
    pub async fn ensure(
        &self,
        runner: &dyn ToolRunner,
        package_manager: &str,
        variant: Variant,
    ) -> WeftResult<()> {
        if fsops::is_missing_or_empty(&self.root)? {
            return self.materialize(runner, package_manager, variant).await;
        }

        match self.current_variant() {
            Some(current) if current == variant => {
                debug!("Workspace at {} matches variant {}", self.root.display(), variant);
                Ok(())
            }
            current => {
                info!(
                    "Workspace variant mismatch ({:?} vs requested {}), rebuilding",
                    current, variant
                );
                self.materialize(runner, package_manager, variant).await
            }
        }
    }

    /// Wipe and rebuild the baseline: clone the template, write the default
    /// bootstrap and type placeholder, install base dependencies.
    async fn materialize(
        &self,
        runner: &dyn ToolRunner,
        package_manager: &str,
        variant: Variant,
    ) -> WeftResult<()> {
        info!("Creating {} build workspace at {}", variant, self.root.display());

        if self.root.exists() {
            fs::remove_dir_all(&self.root)
                .map_err(|e| WeftError::io(format!("removing {}", self.root.display()), e))?;
        }
        if let Some(parent) = self.root.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    WeftError::io(format!("creating directory {}", parent.display()), e)
                })?;
            }
        }

        let clone_args = vec![
            "clone".to_string(),
            "--depth".to_string(),
            "1".to_string(),
            self.template_url.clone(),
            self.root.to_string_lossy().into_owned(),
        ];
        let out = runner.run("git", &clone_args, Path::new(".")).await?;
        if !out.success {
            return Err(WeftError::TemplateFetchFailed {
                url: self.template_url.clone(),
                reason: out.stderr.trim().to_string(),
            });
        }

        self.write_bootstrap(DEFAULT_ENTRY_IMPORT)?;
        self.write_typedecl()?;
        fs::create_dir_all(self.staging_dir())
            .map_err(|e| WeftError::io("creating staging directory", e))?;

        if variant == Variant::Styled {
            self.write_preprocessor_config()?;
        }

        let out = runner
            .run(package_manager, &["install".to_string()], &self.root)
            .await?;
        if !out.success {
            return Err(WeftError::DependencyInstallFailed {
                package_manager: package_manager.to_string(),
                dir: self.root.clone(),
                reason: out.stderr.trim().to_string(),
            });
        }

        // Marker goes last: a crash mid-materialize leaves no marker, which
        // the next ensure() treats as a mismatch and rebuilds.
        fs::write(self.marker_path(), format!("{}\n", variant.as_str()))
            .map_err(|e| WeftError::io("writing workspace variant marker", e))?;

        info!("Workspace ready at {}", self.root.display());
        Ok(())
    }

    /// Rewrite the bootstrap entry file to import `entry_rel` (a
    /// forward-slash path relative to `src/`).
    pub fn write_bootstrap(&self, entry_rel: &str) -> WeftResult<()> {
        let content = format!(
            "import App from './{entry_rel}';\n\nexport default new App({{ target: document.body }});\n"
        );
        let path = self.bootstrap_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| WeftError::io(format!("creating directory {}", parent.display()), e))?;
        }
        fs::write(&path, content)
            .map_err(|e| WeftError::io(format!("writing bootstrap {}", path.display()), e))
    }

    fn write_typedecl(&self) -> WeftResult<()> {
        fs::write(
            self.root.join(TYPEDECL_REL),
            "/// <reference types=\"weft\" />\n",
        )
        .map_err(|e| WeftError::io("writing type reference placeholder", e))
    }

    fn write_preprocessor_config(&self) -> WeftResult<()> {
        let content = "module.exports = {\n  content: [\"./src/**/*.ui\", \"./src/**/*.html\"],\n};\n";
        fs::write(self.root.join(PREPROCESSOR_CONFIG), content)
            .map_err(|e| WeftError::io("writing style preprocessor config", e))
    }

    /// Remove the bundler output tree. A compile that failed partway can
    /// leave assets behind; they must never survive into the next asset
    /// discovery.
    pub fn clear_output(&self) -> WeftResult<()> {
        let output = self.root.join(OUTPUT_REL);
        if output.exists() {
            fs::remove_dir_all(&output)
                .map_err(|e| WeftError::io(format!("removing {}", output.display()), e))?;
        }
        Ok(())
    }

    /// Clear staged source and bundler output back to the baseline so the
    /// next, unrelated build starts clean.
    pub fn reset(&self) -> WeftResult<()> {
        debug!("Resetting workspace at {}", self.root.display());
        fsops::clean_dir(&self.staging_dir())?;
        self.clear_output()?;
        self.write_bootstrap(DEFAULT_ENTRY_IMPORT)
    }
}
