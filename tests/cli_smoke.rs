mod common;

use assert_cmd::prelude::*;
use common::{has_git, three_commit_repo};
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn no_report_kind_is_rejected() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("scmxls")
        .unwrap()
        .current_dir(dir.path())
        .args(["-o", "report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Impact analysis (-I) or commit history (-H)"));

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_outfile_is_rejected() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("scmxls")
        .unwrap()
        .current_dir(dir.path())
        .arg("-H")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Output filename missing"));
}

#[test]
fn unsupported_backend_fails_fast() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("scmxls")
        .unwrap()
        .current_dir(dir.path())
        .args(["-H", "-o", "report", "--scm", "svn"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));

    assert!(!dir.path().join("History-report.xlsx").exists());
}

#[test]
fn history_export_writes_prefixed_file() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    three_commit_repo(dir.path());
    let out = tempdir().unwrap();

    Command::cargo_bin("scmxls")
        .unwrap()
        .current_dir(out.path())
        .arg("--directory")
        .arg(dir.path())
        .args(["-H", "-o", "report", "--quiet"])
        .assert()
        .success();

    let bytes = std::fs::read(out.path().join("History-report.xlsx")).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn impact_export_keeps_existing_extension() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    three_commit_repo(dir.path());

    Command::cargo_bin("scmxls")
        .unwrap()
        .current_dir(dir.path())
        .args(["-I", "-o", "report.xlsx", "-r", "HEAD~1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 commits written"));

    assert!(dir.path().join("Impacts-report.xlsx").exists());
    assert!(!dir.path().join("Impacts-report.xlsx.xlsx").exists());
}

#[test]
fn missing_repository_is_reported() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("scmxls")
        .unwrap()
        .current_dir(dir.path())
        .args(["-H", "-o", "report", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open repository"));
}
