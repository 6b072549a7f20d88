//! Cache command - inspect and clear the artifact cache

use crate::cache::CacheStore;
use crate::cli::args::{CacheArgs, CacheCommands};
use crate::config::Config;
use crate::error::WeftResult;

pub fn cache(config: &Config, args: CacheArgs) -> WeftResult<()> {
    let store = CacheStore::new(&config.cache_dir);

    match args.command {
        CacheCommands::List => {
            let ids = store.list()?;
            if ids.is_empty() {
                println!("Cache is empty");
            } else {
                for id in ids {
                    println!("{id}");
                }
            }
        }
        CacheCommands::Clear => {
            store.clear()?;
            println!("Cache cleared at {}", store.root().display());
        }
    }

    Ok(())
}
