//! Status command - check external tools and report pipeline state

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::WeftResult;
use crate::tools::{ProcessRunner, ToolRunner};
use crate::workspace::Workspace;
use console::style;
use std::time::Duration;

pub async fn status(config: &Config) -> WeftResult<()> {
    let runner = ProcessRunner::new(Duration::from_secs(config.tool_timeout_secs));

    println!("Tools:");
    for tool in ["git", config.package_manager.as_str()] {
        match runner.probe(tool).await {
            Ok(()) => println!("  {} {}", style("✓").green(), tool),
            Err(_) => println!("  {} {} (not found on PATH)", style("✗").red(), tool),
        }
    }

    let ws = Workspace::new(&config.workspace_dir, &config.template_url);
    println!("Workspace: {}", config.workspace_dir.display());
    match ws.current_variant() {
        Some(variant) => println!("  variant: {variant}"),
        None => println!("  not initialized"),
    }

    let store = CacheStore::new(&config.cache_dir);
    let ids = store.list()?;
    println!("Cache: {} ({} build(s))", config.cache_dir.display(), ids.len());

    Ok(())
}
