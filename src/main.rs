//! weft - component build pipeline CLI
//!
//! Entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use weft::cli::{Cli, Commands};
use weft::config::Config;
use weft::error::WeftResult;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> WeftResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn (spinners only), 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("weft=warn"),
        1 => EnvFilter::new("weft=info"),
        _ => EnvFilter::new("weft=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Build(args) => weft::cli::commands::build(&config, args).await,
        Commands::Cache(args) => weft::cli::commands::cache(&config, args),
        Commands::Clean => weft::cli::commands::clean(&config).await,
        Commands::Status => weft::cli::commands::status(&config).await,
    }
}
