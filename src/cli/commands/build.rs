//! Build command - compile a component and print the artifact locations

use crate::builder::{BuildOptions, Builder};
use crate::cli::args::BuildArgs;
use crate::config::Config;
use crate::error::WeftResult;
use crate::ui::TaskSpinner;
use console::style;

pub async fn build(config: &Config, args: BuildArgs) -> WeftResult<()> {
    let builder = Builder::new(config);
    let opts = BuildOptions {
        package_manager: args
            .package_manager
            .unwrap_or_else(|| config.package_manager.clone()),
        use_style_preprocessor: args.style_preprocessor,
        root_folder: args.root,
    };

    let mut spinner = TaskSpinner::new();
    spinner.start(&format!("Building {}", args.entry.display()));

    match builder.build_component(&args.entry, &opts).await {
        Ok(artifact) => {
            spinner.stop(&format!("Built {}", artifact.build_id));
            println!("{}", style(&artifact.build_id).cyan().bold());
            println!("  script: {}", artifact.script.display());
            println!("  style:  {}", artifact.style.display());
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("Build failed");
            Err(e)
        }
    }
}
