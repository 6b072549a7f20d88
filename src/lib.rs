//! weft - content-addressed component build pipeline
//!
//! Stages UI component source into a shared build workspace, derives a
//! content-hash build id, installs the external modules the components
//! import, invokes the bundler through a package manager, and reconciles the
//! outputs into a durable per-build artifact cache.

pub mod builder;
pub mod bundler;
pub mod cache;
pub mod cli;
pub mod config;
pub mod deps;
pub mod error;
pub mod fsops;
pub mod tools;
pub mod ui;
pub mod workspace;

pub use builder::{BuildOptions, Builder};
pub use cache::BuildArtifact;
pub use error::{WeftError, WeftResult};
