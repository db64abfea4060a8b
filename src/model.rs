use chrono::{DateTime, Local};
use std::fmt;

/// One commit, normalized independently of the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Full hash for git, `"<rev> [tags] - <hash>"` for Mercurial.
    pub id: String,
    pub message: String,
    pub author: String,
    /// Empty when the backend cannot separate it from the name.
    pub email: String,
    pub timestamp: DateTime<Local>,
    pub changed_files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ScmKind {
    #[default]
    Git,
    Hg,
    Svn,
}

impl fmt::Display for ScmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScmKind::Git => "Git",
            ScmKind::Hg => "Mercurial",
            ScmKind::Svn => "Subversion",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    History,
    Impact,
}

impl ReportKind {
    pub fn title(self) -> &'static str {
        match self {
            ReportKind::History => "Commit history",
            ReportKind::Impact => "Impact statement",
        }
    }

    /// Prefix prepended to the output file name.
    pub fn file_prefix(self) -> &'static str {
        match self {
            ReportKind::History => "History-",
            ReportKind::Impact => "Impacts-",
        }
    }
}
