//! End-to-end tests for the `bale` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn bale() -> Command {
    Command::cargo_bin("bale").expect("binary builds")
}

fn touch(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Root with the canonical mixed tree: two keepers, three excluded.
fn scenario_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("a.txt"), "alpha");
    touch(&root.join("sub/b.txt"), "beta");
    touch(&root.join("node_modules/c.txt"), "skip");
    touch(&root.join(".git/config"), "skip");
    touch(&root.join(".DS_Store"), "skip");
    temp
}

fn stdout_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn bare_run_prints_exactly_the_two_contract_lines() {
    let temp = scenario_root();

    let assert = bale()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("files=2"));

    let lines = stdout_lines(&assert.get_output().stdout);
    assert_eq!(lines.len(), 2, "stdout must be exactly two lines");

    let archive_path = PathBuf::from(&lines[0]);
    assert!(archive_path.is_absolute());
    assert!(archive_path.exists());
    assert_eq!(lines[1], "files=2");
}

#[test]
fn bare_run_archives_only_the_unexcluded_files() {
    let temp = scenario_root();

    let assert = bale().current_dir(temp.path()).assert().success();
    let lines = stdout_lines(&assert.get_output().stdout);

    let file = fs::File::open(&lines[0]).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert_eq!(archive.len(), 2);

    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["a.txt", "sub/b.txt"]);

    // Extracted bytes match the originals.
    let mut content = String::new();
    archive
        .by_name("a.txt")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "alpha");

    content.clear();
    archive
        .by_name("sub/b.txt")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "beta");
}

#[test]
fn missing_destination_is_created_with_exactly_one_archive() {
    let temp = scenario_root();
    let dist = temp.path().join("dist");
    assert!(!dist.exists());

    bale().current_dir(temp.path()).assert().success();

    assert!(dist.is_dir());
    let entries: Vec<_> = fs::read_dir(&dist)
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(
        entries[0]
            .file_name()
            .to_string_lossy()
            .ends_with(".zip")
    );
}

#[test]
fn empty_root_reports_zero_files_and_a_valid_archive() {
    let temp = TempDir::new().unwrap();

    let assert = bale()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("files=0"));

    let lines = stdout_lines(&assert.get_output().stdout);
    let archive = zip::ZipArchive::new(fs::File::open(&lines[0]).unwrap()).unwrap();
    assert_eq!(archive.len(), 0);
}

#[test]
fn tar_gz_format_flag_switches_the_container() {
    let temp = scenario_root();

    let assert = bale()
        .current_dir(temp.path())
        .args(["--format", "tar.gz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("files=2"));

    let lines = stdout_lines(&assert.get_output().stdout);
    assert!(lines[0].ends_with(".tar.gz"));

    let reader = flate2::read::GzDecoder::new(fs::File::open(&lines[0]).unwrap());
    let mut tar = tar::Archive::new(reader);
    let mut names: Vec<String> = tar
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["a.txt", "sub/b.txt"]);
}

#[test]
fn unknown_format_fails_with_nonzero_exit_and_silent_stdout() {
    let temp = scenario_root();

    bale()
        .current_dir(temp.path())
        .args(["--format", "rar"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn missing_root_fails() {
    let temp = TempDir::new().unwrap();
    let gone = temp.path().join("nope");

    bale()
        .args(["--path", gone.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn manifest_excludes_and_prune_are_honored() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(&root.join("a.txt"), "alpha");
    touch(&root.join("fixtures/big.bin"), "skip");
    fs::write(
        root.join("Cargo.toml"),
        r#"
[package]
name = "demo"
version = "0.1.0"

[package.metadata.bale]
exclude-dirs = ["fixtures"]
prune = true
"#,
    )
    .unwrap();

    // A stale archive from an earlier run.
    touch(&root.join("dist/demo-release-20250101-010101.zip"), "old");

    let assert = bale()
        .current_dir(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("files=2"));

    let lines = stdout_lines(&assert.get_output().stdout);
    assert!(!root.join("dist/demo-release-20250101-010101.zip").exists());

    let mut archive = zip::ZipArchive::new(fs::File::open(&lines[0]).unwrap()).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Cargo.toml", "a.txt"]);
}
