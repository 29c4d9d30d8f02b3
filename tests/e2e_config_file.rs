/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Copy the reference adjacency file into the test directory.
fn write_test_repo(dir: &Path) -> PathBuf {
    let target = dir.join("repo.txt");
    fs::copy("tests/fixtures/test_repo.txt", &target).unwrap();
    target
}

/// Write a config file at the specified path.
fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

// ============================================================================
// Discovery and explicit paths
// ============================================================================

#[test]
fn test_config_auto_discovered_in_current_dir() {
    let temp_dir = TempDir::new().unwrap();
    write_test_repo(temp_dir.path());
    write_config(
        &temp_dir.path().join("dep-visualizer.toml"),
        r#"
package_name = "J"
test_mode = true
test_repository_path = "repo.txt"
"#,
    );

    cargo_bin_cmd!("dep-visualizer")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency tree for 'J'"))
        .stdout(predicate::str::contains("J (cycle)"));
}

#[test]
fn test_explicit_config_path_resolves_relative_repo() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("conf");
    fs::create_dir(&config_dir).unwrap();
    write_test_repo(&config_dir);
    let config_path = config_dir.join("custom.toml");
    write_config(
        &config_path,
        r#"
package_name = "A"
test_mode = true
test_repository_path = "repo.txt"
max_depth = 1
"#,
    );

    // Run from a different directory; the repo path is relative to the config
    cargo_bin_cmd!("dep-visualizer")
        .current_dir(temp_dir.path())
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("(max depth 1)"))
        .stdout(predicate::str::contains("Packages: 3\n"));
}

#[test]
fn test_bundled_fixture_config() {
    cargo_bin_cmd!("dep-visualizer")
        .arg("tests/fixtures/reference.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency tree for 'A' (max depth 4):"))
        .stdout(predicate::str::contains("Packages: 9\n"));
}

#[test]
fn test_demo_config_with_reverse() {
    cargo_bin_cmd!("dep-visualizer")
        .arg("tests/fixtures/demo.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("+-- urllib3"))
        .stdout(predicate::str::contains(
            "Direct reverse dependencies of 'requests':\n  (none)\n",
        ));
}

// ============================================================================
// CLI precedence
// ============================================================================

#[test]
fn test_cli_overrides_config_values() {
    let temp_dir = TempDir::new().unwrap();
    write_test_repo(temp_dir.path());
    write_config(
        &temp_dir.path().join("dep-visualizer.toml"),
        r#"
package_name = "A"
test_mode = true
test_repository_path = "repo.txt"
max_depth = 4
format = "json"
"#,
    );

    cargo_bin_cmd!("dep-visualizer")
        .current_dir(temp_dir.path())
        .args(["-p", "L", "-d", "2", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dependency tree for 'L' (max depth 2):\nL\n\\-- M\n",
        ));
}

#[test]
fn test_config_filter_and_unicode_tree() {
    let temp_dir = TempDir::new().unwrap();
    write_test_repo(temp_dir.path());
    write_config(
        &temp_dir.path().join("dep-visualizer.toml"),
        r#"
package_name = "J"
test_mode = true
test_repository_path = "repo.txt"
ascii_tree = false
filter_substring = "M"
"#,
    );

    cargo_bin_cmd!("dep-visualizer")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("excluding names containing 'M'"))
        .stdout(predicate::str::contains("├── K\n│   └── J (cycle)\n└── L\n"))
        .stdout(predicate::str::contains("── M").not());
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_invalid_toml_exits_with_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    write_config(&config_path, "package_name = [[[broken");

    cargo_bin_cmd!("dep-visualizer")
        .arg(&config_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_out_of_range_depth_in_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("depth.toml");
    write_config(&config_path, "package_name = \"A\"\nmax_depth = -2\n");

    cargo_bin_cmd!("dep-visualizer")
        .arg(&config_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("max_depth must be between 0 and 100"));
}

#[test]
fn test_missing_config_path() {
    cargo_bin_cmd!("dep-visualizer")
        .arg("/nonexistent/dep-visualizer.toml")
        .assert()
        .code(1);
}

#[test]
fn test_unknown_fields_warn_but_succeed() {
    let temp_dir = TempDir::new().unwrap();
    write_test_repo(temp_dir.path());
    write_config(
        &temp_dir.path().join("dep-visualizer.toml"),
        r#"
package_name = "M"
test_mode = true
test_repository_path = "repo.txt"
colour_output = true
"#,
    );

    cargo_bin_cmd!("dep-visualizer")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Unknown config field 'colour_output' will be ignored",
        ));
}
