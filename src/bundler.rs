//! Bundler invocation and asset reconciliation
//!
//! Runs the external bundler through the package manager's build subcommand,
//! then locates the generated index assets and copies them into the cache
//! directory. Assets are keyed by file extension, never by enumeration
//! order, since the bundler's output listing order is not guaranteed.

use crate::cache::BuildArtifact;
use crate::error::{WeftError, WeftResult};
use crate::fsops;
use crate::tools::ToolRunner;
use crate::workspace::Workspace;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug)]
struct IndexAssets {
    script: PathBuf,
    style: Option<PathBuf>,
}

/// Compile the staged tree and reconcile outputs into `artifact`.
///
/// The script bundle is mandatory; a component tree referencing no styles
/// legitimately produces no style asset, in which case an empty
/// `bundle.css` placeholder is written so both artifact paths always exist.
pub async fn build(
    runner: &dyn ToolRunner,
    ws: &Workspace,
    package_manager: &str,
    artifact: &BuildArtifact,
) -> WeftResult<()> {
    info!("Compiling staged component tree ({})", artifact.build_id);

    // Stale assets from a previously failed compile would make the index
    // glob ambiguous.
    ws.clear_output()?;

    let args = vec!["run".to_string(), "build".to_string()];
    let out = runner.run(package_manager, &args, ws.root()).await?;
    if !out.success {
        return Err(WeftError::BundleCompileFailed {
            tool: format!("{package_manager} run build"),
            dir: ws.root().to_path_buf(),
            reason: out.stderr.trim().to_string(),
        });
    }

    let assets = locate_index_assets(&ws.asset_output_dir())?;

    fsops::copy_file(&assets.script, &artifact.script)?;
    match assets.style {
        Some(style) => fsops::copy_file(&style, &artifact.style)?,
        None => {
            debug!("No style asset generated, writing empty placeholder");
            fs::write(&artifact.style, "").map_err(|e| {
                WeftError::io(format!("writing placeholder {}", artifact.style.display()), e)
            })?;
        }
    }

    info!("Bundle written to {}", artifact.output_dir.display());
    Ok(())
}

/// Find the generated index assets in the bundler's fixed output directory.
///
/// Exactly one script asset must exist; at most one style asset may.
fn locate_index_assets(dir: &Path) -> WeftResult<IndexAssets> {
    let entries = fs::read_dir(dir).map_err(|e| WeftError::AssetLocateFailed {
        dir: dir.to_path_buf(),
        reason: format!("asset output directory unreadable: {e}"),
    })?;

    let mut scripts = Vec::new();
    let mut styles = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| WeftError::io(format!("reading {}", dir.display()), e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_index = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.starts_with("index"));
        if !is_index {
            continue;
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("js") => scripts.push(path),
            Some("css") => styles.push(path),
            _ => {}
        }
    }

    if scripts.len() != 1 {
        return Err(WeftError::AssetLocateFailed {
            dir: dir.to_path_buf(),
            reason: format!(
                "expected exactly one index script asset, found {}",
                scripts.len()
            ),
        });
    }
    if styles.len() > 1 {
        return Err(WeftError::AssetLocateFailed {
            dir: dir.to_path_buf(),
            reason: format!("expected at most one index style asset, found {}", styles.len()),
        });
    }

    Ok(IndexAssets {
        script: scripts.remove(0),
        style: styles.pop(),
    })
}
