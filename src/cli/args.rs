//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// weft - component build pipeline
///
/// Compiles UI components into content-addressed script+style bundles
/// through a shared build workspace.
#[derive(Parser, Debug)]
#[command(name = "weft")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "WEFT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a component into a cached bundle
    Build(BuildArgs),

    /// Manage the artifact cache
    Cache(CacheArgs),

    /// Remove the shared build workspace
    Clean,

    /// Check that required external tools are available
    Status,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Entry component file (relative to --root in tree mode)
    pub entry: PathBuf,

    /// Root folder of a multi-file component tree
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Package manager executable (defaults to the configured one)
    #[arg(short, long)]
    pub package_manager: Option<String>,

    /// Build with the style preprocessor enabled
    #[arg(long)]
    pub style_preprocessor: bool,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// List cached build ids
    List,

    /// Delete all cached artifacts
    Clear,
}
