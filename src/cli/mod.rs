//! Command-line interface

pub mod args;
pub mod commands;

pub use args::{BuildArgs, CacheArgs, CacheCommands, Cli, Commands};
