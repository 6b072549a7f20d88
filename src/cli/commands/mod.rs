//! Command implementations

mod build;
mod cache;
mod clean;
mod status;

pub use build::build;
pub use cache::cache;
pub use clean::clean;
pub use status::status;
