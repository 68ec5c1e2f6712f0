// tests/integration_test.rs
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn run(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_changelog"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["--help"], "");
    assert!(output.status.success());
    assert!(stdout(&output).contains("Command line interface for managing CHANGELOG.md files"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    for flag in ["-v", "--version"] {
        let output = run(dir.path(), &[flag], "");
        assert!(output.status.success());
        assert_eq!(stdout(&output).trim(), env!("CARGO_PKG_VERSION"));
    }
}

#[test]
fn test_suggest_and_current_silent_without_file() {
    let dir = TempDir::new().unwrap();
    for command in ["suggest", "current"] {
        let output = run(dir.path(), &[command], "");
        assert!(output.status.success());
        assert_eq!(stdout(&output), "");
    }
}

#[test]
fn test_full_workflow() {
    let dir = TempDir::new().unwrap();

    let output = run(dir.path(), &["init"], "");
    assert!(output.status.success());
    assert!(dir.path().join("CHANGELOG.md").exists());

    let output = run(dir.path(), &["current"], "");
    assert_eq!(stdout(&output), "0.0.1\n");

    assert!(run(dir.path(), &["fix", "handle empty input"], "").status.success());
    assert_eq!(stdout(&run(dir.path(), &["suggest"], "")), "0.0.2\n");

    assert!(run(dir.path(), &["break", "remove --legacy"], "").status.success());
    assert_eq!(stdout(&run(dir.path(), &["suggest"], "")), "1.0.0\n");

    // Declining the confirmation leaves the file alone
    let output = run(dir.path(), &["release"], "n\n");
    assert!(output.status.success());
    assert_eq!(stdout(&run(dir.path(), &["current"], "")), "0.0.1\n");

    let output = run(dir.path(), &["release", "--minor", "--yes"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&run(dir.path(), &["current"], "")), "0.1.0\n");
    assert_eq!(stdout(&run(dir.path(), &["suggest"], "")), "0.1.0\n");

    let text = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(text.contains("### Fixes\n- handle empty input\n"));
    assert!(text.contains("### Breaks\n- remove --legacy\n"));
}

#[test]
fn test_init_twice_fails() {
    let dir = TempDir::new().unwrap();
    assert!(run(dir.path(), &["init"], "").status.success());

    let output = run(dir.path(), &["init"], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("already exists"));
}

#[test]
fn test_entry_offers_to_create_missing_file() {
    let dir = TempDir::new().unwrap();

    let output = run(dir.path(), &["new", "first feature"], "no\n");
    assert!(output.status.success());
    assert!(stdout(&output).contains("No CHANGELOG.md Found, do you want to create one?"));
    assert!(!dir.path().join("CHANGELOG.md").exists());

    let output = run(dir.path(), &["new", "first feature"], "y\n");
    assert!(output.status.success());
    let text = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(text.contains("### New\n- first feature\n"));
}

#[test]
fn test_file_and_config_options() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("changelog.toml"),
        "file = \"docs/HISTORY.md\"\n[behavior]\nauto_init = true\n",
    )
    .unwrap();

    // Picked up from ./changelog.toml without prompting
    let output = run(dir.path(), &["change", "new layout"], "");
    assert!(output.status.success());
    assert!(dir.path().join("docs/HISTORY.md").exists());

    // --file overrides the configured path
    let output = run(dir.path(), &["--file", "OTHER.md", "init"], "");
    assert!(output.status.success());
    assert!(dir.path().join("OTHER.md").exists());
    assert_eq!(
        stdout(&run(dir.path(), &["current", "--file", "OTHER.md"], "")),
        "0.0.1\n"
    );
}

#[test]
fn test_warnings_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("CHANGELOG.md"),
        "# Changelog\n## Unreleased\n### Misc\n## v1.0.0 - 2024-01-01\n",
    )
    .unwrap();

    let output = run(dir.path(), &["current"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1.0.0\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unknown subsection 'Misc'"));
    assert!(stderr.contains("line=3"));
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    assert!(run(dir.path(), &["init"], "").status.success());

    let output = run(dir.path(), &["current", "--verbose"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0.0.1\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("DEBUG"));
    assert!(stderr.contains("changelog loaded"));

    let quiet = run(dir.path(), &["current"], "");
    assert_eq!(stdout(&quiet), "0.0.1\n");
    assert!(!String::from_utf8(quiet.stderr).unwrap().contains("changelog loaded"));
}
