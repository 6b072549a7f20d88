//! Clean command - remove the shared build workspace

use crate::builder::Builder;
use crate::config::Config;
use crate::error::WeftResult;

pub async fn clean(config: &Config) -> WeftResult<()> {
    let builder = Builder::new(config);
    builder.clean_workspace().await?;
    println!("Workspace removed; the next build recreates it");
    Ok(())
}
