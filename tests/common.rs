#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;

pub fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

pub fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

pub fn init_git_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
}

/// Commit everything in the work tree with a fixed commit date.
pub fn commit_all(dir: &Path, message: &str, epoch_secs: i64) {
    let date = format!("{epoch_secs} +0000");
    assert!(Command::new("git")
        .args(["add", "."])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["commit", "--allow-empty", "-m", message])
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

/// Run a committing git command (merge, etc.) with a fixed commit date.
pub fn git_dated(dir: &Path, args: &[&str], epoch_secs: i64) {
    let date = format!("{epoch_secs} +0000");
    assert!(Command::new("git")
        .args(args)
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .env("GIT_MERGE_AUTOEDIT", "no")
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

pub fn rev_parse(dir: &Path, rev: &str) -> String {
    let out = Command::new("git")
        .args(["rev-parse", rev])
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(out.status.success());
    String::from_utf8(out.stdout).unwrap().trim().to_string()
}

/// Root commit with `README`, then `a.txt` + `b.txt`, then `a.txt` again.
pub fn three_commit_repo(dir: &Path) {
    init_git_repo(dir);
    write_file(dir, "README", "readme\n");
    commit_all(dir, "C0", 1_700_000_000);
    write_file(dir, "a.txt", "one\n");
    write_file(dir, "b.txt", "two\n");
    commit_all(dir, "C1", 1_700_000_100);
    write_file(dir, "a.txt", "one\nmore\n");
    commit_all(dir, "C2\n\n", 1_700_000_200);
}
