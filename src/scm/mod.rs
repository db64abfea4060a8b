pub mod diffstat;
pub mod git;
pub mod hg;

pub use git::GitAccessor;

use crate::error::{Result, ScmError};
use crate::model::{LogEntry, ScmKind};
use std::path::Path;

/// Read-only access to a repository's revision history.
pub trait ScmAccessor {
    fn kind(&self) -> ScmKind;

    /// Every commit reachable from the current head, newest first, up to and
    /// including the stop revision when one was given.
    fn get_log(&self) -> Result<Vec<LogEntry>>;
}

#[derive(Debug, Clone, Default)]
pub struct AccessorOptions {
    pub stop_revision: Option<String>,
    pub show_progress: bool,
}

/// Open an accessor of the requested kind.
///
/// Only git is implemented; Mercurial and Subversion fail here with
/// [`ScmError::Unsupported`] instead of yielding an empty history.
pub fn open(kind: ScmKind, path: &Path, options: AccessorOptions) -> Result<Box<dyn ScmAccessor>> {
    match kind {
        ScmKind::Git => Ok(Box::new(GitAccessor::open(path, options)?)),
        ScmKind::Hg | ScmKind::Svn => Err(ScmError::Unsupported(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hg_and_svn_are_rejected_at_construction() {
        let dir = std::env::temp_dir();
        for kind in [ScmKind::Hg, ScmKind::Svn] {
            match open(kind, &dir, AccessorOptions::default()) {
                Err(ScmError::Unsupported(k)) => assert_eq!(k, kind),
                Err(other) => panic!("unexpected error: {other}"),
                Ok(_) => panic!("{kind} accessor should not open"),
            }
        }
    }

    #[test]
    fn git_outside_repository_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = open(ScmKind::Git, dir.path(), AccessorOptions::default())
            .err()
            .expect("no repository in an empty temp dir");
        assert!(matches!(err, ScmError::RepositoryNotFound { kind: ScmKind::Git, .. }));
    }
}
