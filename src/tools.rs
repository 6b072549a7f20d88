//! External tool invocation
//!
//! Everything the pipeline shells out to (package manager install/build,
//! template clone) goes through the [`ToolRunner`] trait so tests can swap in
//! a recording mock. The production implementation spawns real processes with
//! a bounded timeout per invocation.

use crate::error::{WeftError, WeftResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one external tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Abstract interface to external executables
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run `tool` with `args` inside `dir`, capturing output
    async fn run(&self, tool: &str, args: &[String], dir: &Path) -> WeftResult<ToolOutput>;

    /// Check that `tool` resolves on PATH
    async fn probe(&self, tool: &str) -> WeftResult<()> {
        let out = self
            .run(tool, &["--version".to_string()], Path::new("."))
            .await?;
        if out.success {
            Ok(())
        } else {
            Err(WeftError::ToolNotFound {
                name: tool.to_string(),
            })
        }
    }
}

/// Process-spawning runner used outside of tests
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    /// Create a runner with a per-invocation timeout budget
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, tool: &str, args: &[String], dir: &Path) -> WeftResult<ToolOutput> {
        debug!("Executing: {} {:?} (cwd {})", tool, args, dir.display());

        // The child must die with the invocation: when the timeout drops the
        // future, an orphaned install/bundler process would keep mutating the
        // shared workspace outside the coordinator's lock.
        let invocation = Command::new(tool)
            .args(args)
            .current_dir(dir)
            .kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        let output = match tokio::time::timeout(self.timeout, invocation).await {
            Err(_) => {
                return Err(WeftError::ToolTimedOut {
                    tool: tool.to_string(),
                    seconds: self.timeout.as_secs(),
                    dir: dir.to_path_buf(),
                })
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(WeftError::ToolNotFound {
                    name: tool.to_string(),
                })
            }
            Ok(Err(e)) => {
                return Err(WeftError::command_failed(
                    format!("{} {}", tool, args.join(" ")),
                    e,
                ))
            }
            Ok(Ok(output)) => output,
        };

        Ok(ToolOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_tool_maps_to_tool_not_found() {
        let runner = ProcessRunner::new(Duration::from_secs(5));
        let err = runner
            .run("weft-no-such-tool", &[], Path::new("."))
            .await
            .unwrap_err();
        assert!(matches!(err, WeftError::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_command_reports_not_success() {
        let runner = ProcessRunner::new(Duration::from_secs(5));
        let out = runner
            .run(
                "sh",
                &["-c".to_string(), "echo oops >&2; exit 1".to_string()],
                Path::new("."),
            )
            .await
            .unwrap();
        assert!(!out.success);
        assert!(out.stderr.contains("oops"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timed_out_child_is_killed() {
        let temp = tempfile::TempDir::new().unwrap();
        let marker = temp.path().join("marker");

        let runner = ProcessRunner::new(Duration::from_millis(200));
        let script = format!("sleep 1; touch {}", marker.display());
        let err = runner
            .run("sh", &["-c".to_string(), script], Path::new("."))
            .await
            .unwrap_err();
        assert!(matches!(err, WeftError::ToolTimedOut { .. }));

        // Give a surviving child ample time to reach the write.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_command_times_out() {
        let runner = ProcessRunner::new(Duration::from_millis(100));
        let err = runner
            .run("sh", &["-c".to_string(), "sleep 5".to_string()], Path::new("."))
            .await
            .unwrap_err();
        assert!(matches!(err, WeftError::ToolTimedOut { .. }));
    }
}
