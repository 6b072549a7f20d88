//! Build coordination
//!
//! Owns the shared workspace and the artifact cache and runs the pipeline:
//! ensure baseline, stage source, compute the build id, short-circuit on a
//! cache hit, otherwise install dependencies, compile, and reconcile the
//! outputs into the cache.

use crate::bundler;
use crate::cache::{compute_build_id, BuildArtifact, CacheStore};
use crate::config::Config;
use crate::deps;
use crate::error::{WeftError, WeftResult};
use crate::tools::{ProcessRunner, ToolRunner};
use crate::workspace::{stage, Variant, Workspace};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

/// Options for one build call
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Package manager executable, must resolve on PATH
    pub package_manager: String,
    /// Workspace variant axis
    pub use_style_preprocessor: bool,
    /// Multi-file component tree root; `None` means single-file mode
    pub root_folder: Option<PathBuf>,
}

impl BuildOptions {
    /// Options with the configured default package manager
    pub fn from_config(config: &Config) -> Self {
        Self {
            package_manager: config.package_manager.clone(),
            use_style_preprocessor: false,
            root_folder: None,
        }
    }
}

/// Component build coordinator
pub struct Builder {
    // Shared mutable workspace: concurrent build calls serialize on this
    // lock instead of corrupting each other's staged source.
    workspace: Mutex<Workspace>,
    cache: CacheStore,
    runner: Arc<dyn ToolRunner>,
}

impl Builder {
    /// Coordinator backed by real process spawning
    pub fn new(config: &Config) -> Self {
        let runner = ProcessRunner::new(Duration::from_secs(config.tool_timeout_secs));
        Self::with_runner(config, Arc::new(runner))
    }

    /// Coordinator with a caller-supplied tool runner (tests use a mock)
    pub fn with_runner(config: &Config, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            workspace: Mutex::new(Workspace::new(
                &config.workspace_dir,
                &config.template_url,
            )),
            cache: CacheStore::new(&config.cache_dir),
            runner,
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Build `entry` into a script+style bundle, reusing the cache when the
    /// staged source tree hashes to an already-built id.
    pub async fn build_component(
        &self,
        entry: &Path,
        opts: &BuildOptions,
    ) -> WeftResult<BuildArtifact> {
        // Validate the tool eagerly, before touching shared state.
        self.runner.probe(&opts.package_manager).await?;

        let variant = Variant::from_flag(opts.use_style_preprocessor);
        let ws = self.workspace.lock().await;

        ws.ensure(self.runner.as_ref(), &opts.package_manager, variant)
            .await?;

        let staged = stage::stage(&ws, entry, opts.root_folder.as_deref())?;
        let build_id = compute_build_id(&ws.staging_dir())?;

        if let Some(artifact) = self.cache.lookup(&build_id) {
            info!("Reusing cached build {} for {}", build_id, staged);
            return Ok(artifact);
        }

        let artifact = self.cache.prepare(&build_id)?;
        deps::scan_and_install(self.runner.as_ref(), &ws, &opts.package_manager).await?;
        bundler::build(self.runner.as_ref(), &ws, &opts.package_manager, &artifact).await?;

        // Back to baseline so the next, unrelated build starts clean.
        ws.reset()?;

        info!("Built {} as {}", staged, artifact.build_id);
        Ok(artifact)
    }

    /// Remove the shared workspace entirely; the next build recreates it
    pub async fn clean_workspace(&self) -> WeftResult<()> {
        let ws = self.workspace.lock().await;
        if ws.root().exists() {
            std::fs::remove_dir_all(ws.root())
                .map_err(|e| WeftError::io(format!("removing {}", ws.root().display()), e))?;
            info!("Removed workspace at {}", ws.root().display());
        }
        Ok(())
    }
}
