//! Dependency scanning for staged component source
//!
//! The external bundler cannot resolve third-party modules imported by
//! component files on its own, so before compiling we lexically scan every
//! staged component for `import <name> from '<module>'` statements and
//! install the referenced packages through the package manager.
//!
//! Exclusion policy, applied per specifier:
//! - relative and absolute specifiers (leading `.` or `/`) are local, skipped
//! - component imports (ending in `.ui`) are compiled, not installed
//! - the framework's reserved namespace (`weft`, `weft/...`) ships with the
//!   workspace template
//! - a remaining slash-bearing specifier installs its package root
//!   (`@scope/name` keeps both segments, `pkg/sub` installs `pkg`)

use crate::error::{WeftError, WeftResult};
use crate::tools::ToolRunner;
use crate::workspace::{Workspace, COMPONENT_EXT};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Import namespace reserved for the framework itself
const RESERVED_NAMESPACE: &str = "weft";

lazy_static! {
    static ref IMPORT_RE: Regex =
        Regex::new(r#"import\s+\w+\s+from\s+['"]([^'"]+)['"]"#).unwrap();
}

/// Reduce an import specifier to an installable package name, or skip it
fn installable_package(spec: &str) -> Option<String> {
    if spec.starts_with('.') || spec.starts_with('/') {
        return None;
    }
    if spec.ends_with(&format!(".{COMPONENT_EXT}")) {
        return None;
    }
    if spec == RESERVED_NAMESPACE || spec.starts_with(&format!("{RESERVED_NAMESPACE}/")) {
        return None;
    }

    let mut segments = spec.split('/');
    let first = segments.next()?;
    if first.is_empty() {
        return None;
    }

    if first.starts_with('@') {
        let second = segments.next()?;
        Some(format!("{first}/{second}"))
    } else {
        Some(first.to_string())
    }
}

/// Extract the installable module names referenced by one component source
pub fn extract_modules(source: &str) -> Vec<String> {
    let mut modules = Vec::new();
    for capture in IMPORT_RE.captures_iter(source) {
        if let Some(package) = installable_package(&capture[1]) {
            if !modules.contains(&package) {
                modules.push(package);
            }
        }
    }
    modules
}

/// Scan every staged component file and install the external modules it
/// imports, one package-manager invocation per file with matches.
pub async fn scan_and_install(
    runner: &dyn ToolRunner,
    ws: &Workspace,
    package_manager: &str,
) -> WeftResult<()> {
    for entry in WalkDir::new(ws.staging_dir()) {
        let entry = entry.map_err(|e| {
            WeftError::io(format!("walking {}", ws.staging_dir().display()), e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some(COMPONENT_EXT) {
            continue;
        }

        let source = fs::read_to_string(entry.path())
            .map_err(|e| WeftError::io(format!("reading {}", entry.path().display()), e))?;
        let modules = extract_modules(&source);
        if modules.is_empty() {
            debug!("No external modules in {}", entry.path().display());
            continue;
        }

        info!(
            "Installing {} module(s) for {}: {}",
            modules.len(),
            entry.path().display(),
            modules.join(" ")
        );

        let mut args = vec!["install".to_string()];
        args.extend(modules);
        let out = runner.run(package_manager, &args, ws.root()).await?;
        if !out.success {
            return Err(WeftError::DependencyInstallFailed {
                package_manager: package_manager.to_string(),
                dir: ws.root().to_path_buf(),
                reason: out.stderr.trim().to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bare_modules() {
        let src = "import axios from 'axios';\nimport dayjs from \"dayjs\";\n";
        assert_eq!(extract_modules(src), vec!["axios", "dayjs"]);
    }

    #[test]
    fn skips_relative_and_component_imports() {
        let src = concat!(
            "import Button from './widgets/Button.ui';\n",
            "import Header from '../Header.ui';\n",
            "import lib from '/usr/lib/thing';\n",
            "import chart from 'chartlib';\n",
        );
        assert_eq!(extract_modules(src), vec!["chartlib"]);
    }

    #[test]
    fn skips_reserved_namespace() {
        let src = concat!(
            "import store from 'weft/store';\n",
            "import weft from 'weft';\n",
            "import axios from 'axios';\n",
        );
        assert_eq!(extract_modules(src), vec!["axios"]);
    }

    #[test]
    fn slash_specifiers_install_package_root() {
        assert_eq!(installable_package("chart.js/auto"), Some("chart.js".to_string()));
        assert_eq!(
            installable_package("@scope/pkg/deep"),
            Some("@scope/pkg".to_string())
        );
        assert_eq!(installable_package("@scope"), None);
    }

    #[test]
    fn dedupes_within_a_file() {
        let src = "import a from 'axios';\nimport b from 'axios';\n";
        assert_eq!(extract_modules(src), vec!["axios"]);
    }

    #[test]
    fn ignores_non_import_lines() {
        let src = "const x = \"import nothing from 'nowhere'\"; // not matched without ident\nlet importFrom = 1;\n";
        // The lexical scan is intentionally shallow: string literals that
        // look like imports are still matched, anything else is not.
        assert_eq!(extract_modules(src), vec!["nowhere"]);
    }
}
