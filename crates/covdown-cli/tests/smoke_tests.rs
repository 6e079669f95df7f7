//! Smoke tests for the covdown CLI
//!
//! Run the real binary against coverage data and sources in a temp directory.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command for the covdown binary
fn covdown() -> Command {
    Command::cargo_bin("covdown").expect("covdown binary should exist")
}

const CALC_PY: &str = "\
def add(a, b):
    return a + b


def sub(a, b):
    return a - b


def mul(a, b):
    return a * b
";

fn write_project(dir: &Path) {
    fs::create_dir_all(dir.join("pkg")).unwrap();
    fs::write(dir.join("pkg").join("calc.py"), CALC_PY).unwrap();
    fs::write(dir.join("pkg").join("__init__.py"), "").unwrap();
    fs::write(
        dir.join("coverage.json"),
        r#"{
            "meta": {"version": "7.4.0"},
            "files": {
                "pkg/__init__.py": {"executed_lines": [], "missing_lines": []},
                "pkg/calc.py": {"executed_lines": [1, 2, 5, 9], "missing_lines": [6, 10]}
            }
        }"#,
    )
    .unwrap();
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    covdown()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("covdown"));
}

#[test]
fn test_help_flag() {
    covdown()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("summary"));
}

#[test]
fn test_no_args_fails() {
    covdown().assert().failure();
}

#[test]
fn test_report_help_mentions_flag() {
    covdown()
        .args(["report", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--cov-markdown"));
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_report_disabled_without_flag() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());

    covdown()
        .current_dir(dir.path())
        .arg("report")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    assert!(!dir.path().join("coverage.md").exists());
}

#[test]
fn test_report_writes_markdown() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());

    covdown()
        .current_dir(dir.path())
        .args(["--color", "never", "report", "--cov-markdown", "out/coverage.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "covdown: Created markdown with missing code coverage at out/coverage.md",
        ));

    let content = fs::read_to_string(dir.path().join("out").join("coverage.md")).unwrap();
    assert!(content.starts_with("# Coverage Report\n\n## Summary\n\n"));
    assert!(content.contains("| pkg/calc.py | 6 | 2 | 67% | 6, 10 |"));
    assert!(content.contains("| **TOTAL** | **6** | **2** | **67%** | |"));
    assert!(!content.contains("__init__"));
    assert!(content.contains("### pkg/calc.py\n\n```python\n"));
    assert!(content.contains("   6❌     return a - b\n"));
    assert!(content.contains("  10❌     return a * b\n"));
}

#[test]
fn test_report_verbose_describes_data() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());

    covdown()
        .current_dir(dir.path())
        .args(["-v", "--color", "never", "report", "--cov-markdown", "coverage.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "INFO Loaded coverage for 2 measured files, 1 with missing lines (2 missing statements)",
        ));
}

#[test]
fn test_report_default_omits_details() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());

    covdown()
        .current_dir(dir.path())
        .args(["report", "--cov-markdown", "coverage.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded coverage").not());
}

#[test]
fn test_report_missing_data_warns() {
    let dir = TempDir::new().unwrap();

    covdown()
        .current_dir(dir.path())
        .args(["--color", "never", "report", "--cov-markdown", "coverage.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "covdown: coverage data not found, cannot generate report",
        ));

    assert!(!dir.path().join("coverage.md").exists());
}

#[test]
fn test_report_invalid_data_reports_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("coverage.json"), "{ truncated").unwrap();

    covdown()
        .current_dir(dir.path())
        .args(["--color", "never", "report", "--cov-markdown", "coverage.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "covdown: Error creating markdown from missing code coverage data",
        ));
}

#[test]
fn test_report_from_lcov() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(
        dir.path().join("src").join("lib.rs"),
        "pub fn one() -> u32 {\n    1\n}\n\npub fn two() -> u32 {\n    2\n}\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("lcov.info"),
        "TN:\nSF:src/lib.rs\nDA:1,3\nDA:2,3\nDA:5,0\nDA:6,0\nend_of_record\n",
    )
    .unwrap();

    covdown()
        .current_dir(dir.path())
        .args([
            "report",
            "--data",
            "lcov.info",
            "--language",
            "rust",
            "--cov-markdown",
            "coverage.md",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("coverage.md")).unwrap();
    assert!(content.contains("| src/lib.rs | 4 | 2 | 50% | 5-6 |"));
    assert!(content.contains("```rust\n"));
    assert!(content.contains("   5❌ pub fn two() -> u32 {\n"));
}

#[test]
fn test_report_rejects_missing_root() {
    let dir = TempDir::new().unwrap();

    covdown()
        .current_dir(dir.path())
        .args(["report", "--root", "nowhere", "--cov-markdown", "coverage.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_summary_table() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());

    covdown()
        .current_dir(dir.path())
        .args(["--color", "never", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name"))
        .stdout(predicate::str::contains("pkg/__init__.py"))
        .stdout(predicate::str::contains("6, 10"))
        .stdout(predicate::str::contains("TOTAL"));
}

#[test]
fn test_summary_skip_covered() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path());

    covdown()
        .current_dir(dir.path())
        .args(["--color", "never", "summary", "--skip-covered"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pkg/calc.py"))
        .stdout(predicate::str::contains("__init__").not());
}

#[test]
fn test_summary_missing_data_fails() {
    let dir = TempDir::new().unwrap();

    covdown()
        .current_dir(dir.path())
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
