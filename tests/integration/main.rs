//! Integration tests for the weft CLI

mod cli_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn weft() -> Command {
        Command::cargo_bin("weft").unwrap()
    }

    #[test]
    fn help_displays() {
        weft()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("component build pipeline"));
    }

    #[test]
    fn version_displays() {
        weft()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("weft"));
    }

    #[test]
    fn cache_list_empty() {
        let temp = TempDir::new().unwrap();
        weft()
            .current_dir(temp.path())
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Cache is empty"));
    }

    #[test]
    fn cache_clear_runs() {
        let temp = TempDir::new().unwrap();
        weft()
            .current_dir(temp.path())
            .args(["cache", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Cache cleared"));
    }

    #[test]
    fn clean_runs() {
        let temp = TempDir::new().unwrap();
        weft()
            .current_dir(temp.path())
            .arg("clean")
            .assert()
            .success()
            .stdout(predicate::str::contains("Workspace removed"));
    }

    #[test]
    fn status_runs() {
        // Status may report missing tools, but should not panic
        let temp = TempDir::new().unwrap();
        let _ = weft().current_dir(temp.path()).arg("status").assert();
    }

    #[test]
    fn build_with_missing_tool_fails_eagerly() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("weft.toml"),
            "package_manager = \"weft-test-no-such-pm\"\n",
        )
        .unwrap();
        weft()
            .current_dir(temp.path())
            .args(["build", "nope/Missing.ui"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found on PATH"));
    }

    #[test]
    fn invalid_config_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("weft.toml"), "tool_timeout_secs = 0\n").unwrap();
        weft()
            .current_dir(temp.path())
            .args(["cache", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}
