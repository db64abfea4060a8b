use super::diffstat::{self, FileChange};
use super::{AccessorOptions, ScmAccessor};
use crate::error::{Result, ScmError};
use crate::model::{LogEntry, ScmKind};
use chrono::{DateTime, Local, TimeZone};
use gix::object::tree::diff::ChangeDetached;
use gix::objs::tree::EntryMode;
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use similar::{ChangeTag, TextDiff};
use std::path::Path;

pub struct GitAccessor {
    repo: Repository,
    stop_revision: Option<String>,
    show_progress: bool,
}

impl GitAccessor {
    /// Open the repository containing `path`.
    pub fn open(path: &Path, options: AccessorOptions) -> Result<Self> {
        let repo = discover(path).map_err(|source| ScmError::RepositoryNotFound {
            kind: ScmKind::Git,
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;

        let stop_revision = options
            .stop_revision
            .map(|rev| resolve_revision(&repo, rev));

        Ok(Self {
            repo,
            stop_revision,
            show_progress: options.show_progress,
        })
    }

    /// Full hash the walk stops at, once resolved.
    pub fn stop_revision(&self) -> Option<&str> {
        self.stop_revision.as_deref()
    }

    fn entry_for(&self, commit: &gix::Commit<'_>, first_parent: Option<ObjectId>) -> Result<LogEntry> {
        let commit_id = commit.id;
        let committer = commit.committer()?;
        let secs = commit.time()?.seconds;
        let timestamp: DateTime<Local> = Local
            .timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| ScmError::InvalidDate(format!("Invalid timestamp: {secs}")))?;

        let changed_files = match first_parent {
            Some(parent_id) => diffstat::parse(&self.diff_stat(commit_id, parent_id)?)?,
            None => Vec::new(),
        };

        Ok(LogEntry {
            id: commit_id.to_string(),
            message: commit.message_raw()?.to_string().trim_end_matches('\n').to_string(),
            author: committer.name.to_string(),
            email: committer.email.to_string(),
            timestamp,
            changed_files,
        })
    }

    /// Diff-stat block between `commit_id` and `parent_id`.
    fn diff_stat(&self, commit_id: ObjectId, parent_id: ObjectId) -> Result<String> {
        let commit_tree = self.repo.find_commit(commit_id)?.tree()?;
        let parent_tree = self.repo.find_commit(parent_id)?.tree()?;

        let changes: Vec<ChangeDetached> =
            self.repo.diff_tree_to_tree(Some(&parent_tree), Some(&commit_tree), None)?;

        let mut files = Vec::new();
        for change in changes {
            self.handle_change(change, &mut files)?;
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(diffstat::render(&files))
    }

    /// Renames are split into a deletion of the source and an addition of
    /// the destination; copies only add the destination.
    fn handle_change(&self, change: ChangeDetached, files: &mut Vec<FileChange>) -> Result<()> {
        match change {
            ChangeDetached::Addition { id, location, entry_mode, .. } => {
                self.push_change(files, location.to_string(), entry_mode, None, Some(id))
            }
            ChangeDetached::Deletion { id, location, entry_mode, .. } => {
                self.push_change(files, location.to_string(), entry_mode, Some(id), None)
            }
            ChangeDetached::Modification {
                previous_id,
                previous_entry_mode,
                id,
                location,
                entry_mode,
                ..
            } => {
                let mode = if previous_entry_mode.is_commit() {
                    previous_entry_mode
                } else {
                    entry_mode
                };
                self.push_change(files, location.to_string(), mode, Some(previous_id), Some(id))
            }
            ChangeDetached::Rewrite {
                source_id,
                source_location,
                source_entry_mode,
                id,
                location,
                entry_mode,
                copy,
                ..
            } => {
                if !copy {
                    self.push_change(
                        files,
                        source_location.to_string(),
                        source_entry_mode,
                        Some(source_id),
                        None,
                    )?;
                }
                self.push_change(files, location.to_string(), entry_mode, None, Some(id))
            }
        }
    }

    fn push_change(
        &self,
        files: &mut Vec<FileChange>,
        path: String,
        entry_mode: EntryMode,
        old: Option<ObjectId>,
        new: Option<ObjectId>,
    ) -> Result<()> {
        if entry_mode.is_tree() {
            return Ok(());
        }
        // submodule commits live in another repository's object store
        if entry_mode.is_commit() {
            files.push(FileChange::text(path, 1, 1));
            return Ok(());
        }

        let old = self.blob_data(old)?;
        let new = self.blob_data(new)?;
        if is_binary(&old) || is_binary(&new) {
            files.push(FileChange::binary(path));
            return Ok(());
        }

        let (insertions, deletions) = line_changes(&old, &new);
        files.push(FileChange::text(path, insertions, deletions));
        Ok(())
    }

    fn blob_data(&self, id: Option<ObjectId>) -> Result<Vec<u8>> {
        match id {
            Some(id) => Ok(self.repo.find_object(id)?.detach().data),
            None => Ok(Vec::new()),
        }
    }
}

impl ScmAccessor for GitAccessor {
    fn kind(&self) -> ScmKind {
        ScmKind::Git
    }

    /// Walk the first-parent chain from HEAD, newest first.
    fn get_log(&self) -> Result<Vec<LogEntry>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            log::info!("Repository has no commits yet");
            return Ok(Vec::new());
        }
        let mut next = Some(head.peel_to_commit_in_place()?.id);

        let pb = if self.show_progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {pos}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Collecting commits...");

        let mut entries = Vec::new();
        while let Some(commit_id) = next.take() {
            let commit = self.repo.find_commit(commit_id)?;
            let first_parent: Option<ObjectId> = commit.parent_ids().next().map(|id| id.into());

            let entry = self.entry_for(&commit, first_parent)?;
            log::debug!("{} ({} files)", entry.id, entry.changed_files.len());

            let stop = self.stop_revision.as_deref() == Some(entry.id.as_str());
            entries.push(entry);
            pb.inc(1);

            if stop {
                log::info!("Reached stop revision {commit_id}");
                break;
            }
            next = first_parent;
        }

        pb.finish_and_clear();
        Ok(entries)
    }
}

/// Resolve `rev` to a full commit hash, falling back to the raw text.
fn resolve_revision(repo: &Repository, rev: String) -> String {
    let resolved = repo
        .rev_parse_single(rev.as_str())
        .ok()
        .and_then(|id| id.object().ok())
        .and_then(|object| object.peel_to_kind(gix::object::Kind::Commit).ok())
        .map(|commit| commit.id.to_string());

    match resolved {
        Some(id) => id,
        None => {
            log::warn!("Stop revision '{rev}' does not resolve to a commit, comparing it verbatim");
            rev
        }
    }
}

fn is_binary(data: &[u8]) -> bool {
    data.iter().take(8192).any(|&b| b == 0)
}

fn line_changes(old: &[u8], new: &[u8]) -> (usize, usize) {
    let old = String::from_utf8_lossy(old);
    let new = String::from_utf8_lossy(new);
    let diff = TextDiff::from_lines(old.as_ref(), new.as_ref());

    let mut insertions = 0;
    let mut deletions = 0;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => insertions += 1,
            ChangeTag::Delete => deletions += 1,
            ChangeTag::Equal => {}
        }
    }
    (insertions, deletions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_changes_counts_inserts_and_deletes() {
        assert_eq!(line_changes(b"a\nb\nc\n", b"a\nc\nd\ne\n"), (2, 1));
    }

    #[test]
    fn line_changes_for_added_file() {
        assert_eq!(line_changes(b"", b"one\ntwo\n"), (2, 0));
    }

    #[test]
    fn nul_byte_marks_binary() {
        assert!(is_binary(b"PNG\0\x01"));
        assert!(!is_binary(b"plain text\n"));
    }
}
