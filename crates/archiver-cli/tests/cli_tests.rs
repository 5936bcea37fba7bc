//! Integration tests for archiver-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

const ARCHIVES: [&str; 4] = ["test.tar", "test.tar.gz", "test.tar.bz2", "test.zip"];

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn archiver_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("archiver");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn assert_extracted(dest: &Path) {
    assert!(dest.join("testfile_1.txt").is_file(), "testfile_1.txt not found");
    assert!(dest.join("folder").is_dir(), "folder not found");
    assert!(
        dest.join("folder/testfile_2.txt").is_file(),
        "folder/testfile_2.txt not found"
    );
    assert_eq!(
        fs::read_to_string(dest.join("testfile_1.txt")).unwrap(),
        "This is test file 1\n"
    );
    assert_eq!(
        fs::read_to_string(dest.join("folder/testfile_2.txt")).unwrap(),
        "This is test file 2\n"
    );
}

#[test]
fn test_version_flag() {
    archiver_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("archiver"));
}

#[test]
fn test_help_flag() {
    archiver_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"))
        .stdout(predicate::str::contains("archiver-extract"))
        .stdout(predicate::str::contains("archiver-compress"));
}

#[test]
fn test_extract_each_fixture() {
    for name in ARCHIVES {
        let temp = TempDir::new().expect("failed to create temp dir");

        archiver_cmd()
            .arg("archiver-extract")
            .arg(fixture_path(name))
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Extracted"));

        assert_extracted(temp.path());
    }
}

#[test]
fn test_extract_creates_destination() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("nested/out");

    archiver_cmd()
        .arg("extract")
        .arg(fixture_path("test.tar.gz"))
        .arg(&dest)
        .assert()
        .success();

    assert_extracted(&dest);
}

#[test]
fn test_extract_twice_is_idempotent() {
    let temp = TempDir::new().unwrap();

    for _ in 0..2 {
        archiver_cmd()
            .arg("extract")
            .arg(fixture_path("test.zip"))
            .arg(temp.path())
            .assert()
            .success();
    }

    assert_extracted(temp.path());
}

#[test]
fn test_extract_unknown_format() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("dest");
    let archive = fixture_path("test.unknown");

    archiver_cmd()
        .arg("archiver-extract")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains(format!(
            "No matching archiver found for archive {}",
            archive.display()
        )));

    assert!(!dest.exists());
}

#[test]
fn test_extract_missing_archive() {
    let temp = TempDir::new().unwrap();

    archiver_cmd()
        .arg("extract")
        .arg(temp.path().join("missing.tar"))
        .arg(temp.path().join("dest"))
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::starts_with("error: failed to extract"));
}

#[test]
fn test_extract_corrupt_archive() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("broken.zip");
    fs::write(&archive, "not a zip").unwrap();

    archiver_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("dest"))
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_compress_each_format() {
    for name in ARCHIVES {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join(name);

        archiver_cmd()
            .arg("archiver-compress")
            .arg(&archive)
            .arg(fixture_path("testfile_1.txt"))
            .arg(fixture_path("folder"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Archive created"));

        assert!(archive.is_file(), "{name}: archive not found");

        let dest = temp.path().join("roundtrip");
        archiver_cmd()
            .arg("archiver-extract")
            .arg(&archive)
            .arg(&dest)
            .assert()
            .success();
        assert_extracted(&dest);
    }
}

#[test]
fn test_compress_with_level() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("best.tar.bz2");

    archiver_cmd()
        .args(["compress", "--level", "9"])
        .arg(&archive)
        .arg(fixture_path("folder"))
        .assert()
        .success();

    assert!(archive.is_file());
}

#[test]
fn test_compress_invalid_level() {
    let temp = TempDir::new().unwrap();

    archiver_cmd()
        .args(["compress", "--level", "0"])
        .arg(temp.path().join("out.zip"))
        .arg(fixture_path("folder"))
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_compress_unknown_format() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("test.unknown");

    archiver_cmd()
        .arg("compress")
        .arg(&archive)
        .arg(fixture_path("testfile_1.txt"))
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("No matching archiver found"));

    assert!(!archive.exists());
}

#[test]
fn test_compress_missing_source() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("test.tar");

    archiver_cmd()
        .arg("compress")
        .arg(&archive)
        .arg(temp.path().join("missing.txt"))
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("missing.txt"));

    assert!(!archive.exists());
}

#[test]
fn test_compress_requires_sources() {
    let temp = TempDir::new().unwrap();

    archiver_cmd()
        .arg("compress")
        .arg(temp.path().join("test.zip"))
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_list_fixture() {
    archiver_cmd()
        .arg("list")
        .arg(fixture_path("test.tar.gz"))
        .assert()
        .success()
        .stdout(predicate::str::contains("testfile_1.txt"))
        .stdout(predicate::str::contains("folder/testfile_2.txt"));
}

#[test]
fn test_list_long() {
    archiver_cmd()
        .args(["archiver-list", "--long"])
        .arg(fixture_path("test.zip"))
        .assert()
        .success()
        .stdout(predicate::str::contains("3 entries"));
}

#[test]
fn test_json_extract() {
    let temp = TempDir::new().unwrap();

    let output = archiver_cmd()
        .arg("--json")
        .arg("extract")
        .arg(fixture_path("test.tar.bz2"))
        .arg(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "extract");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["format"], "tar.bz2");
    assert_eq!(json["data"]["files"], 2);
    assert_eq!(json["data"]["directories"], 1);
}

#[test]
fn test_json_list() {
    let output = archiver_cmd()
        .args(["--json", "list"])
        .arg(fixture_path("test.zip"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["data"]["total_entries"], 3);
    assert_eq!(json["data"]["entries"][1]["kind"], "directory");
}

#[test]
fn test_json_error() {
    let temp = TempDir::new().unwrap();

    let output = archiver_cmd()
        .args(["--json", "extract"])
        .arg(fixture_path("test.unknown"))
        .arg(temp.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "extract");
    assert_eq!(json["status"], "error");
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .starts_with("No matching archiver found for archive")
    );
}

#[test]
fn test_quiet_suppresses_output() {
    let temp = TempDir::new().unwrap();

    archiver_cmd()
        .arg("--quiet")
        .arg("extract")
        .arg(fixture_path("test.tar"))
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let temp = TempDir::new().unwrap();

    archiver_cmd()
        .arg("-vv")
        .arg("extract")
        .arg(fixture_path("test.tar"))
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("handled by tar backend"));
}

#[test]
fn test_completion() {
    archiver_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("archiver-extract"));
}
