//! Integration tests for CLI argument handling
//!
//! The binary takes no options; only the clap-generated flags are exercised
//! because a bare run would contact the live metadata service.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mdsplit"))
        .args(args)
        .output()
        .expect("Failed to execute mdsplit")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mdsplit"), "Help should mention mdsplit");
    assert!(stdout.contains("metadata"), "Help should describe the tool");
}

#[test]
fn test_version_flag_prints_version() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_prints_error_and_exits() {
    let output = run_cli(&["--output", "somewhere"]);
    assert!(!output.status.success(), "Expected unknown flag to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unexpected argument") || stderr.contains("error"),
        "Should print error message about the argument: {}",
        stderr
    );
}

#[test]
fn test_fatal_error_exits_with_failure_and_diagnostic() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    // A regular file where the cache directory belongs fails the run before any download
    std::fs::write(temp_dir.path().join("cache"), "").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_mdsplit"))
        .current_dir(temp_dir.path())
        .output()
        .expect("Failed to execute mdsplit");

    assert!(!output.status.success(), "Expected fatal error to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    let diagnostics: Vec<&str> = stderr
        .lines()
        .filter(|line| line.contains("Error in main process"))
        .collect();
    assert_eq!(diagnostics.len(), 1, "Expected one diagnostic line: {}", stderr);
    assert!(diagnostics[0].contains("cache"));
}
