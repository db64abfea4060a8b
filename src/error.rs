use crate::model::ScmKind;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScmError>;

#[derive(Error, Debug)]
pub enum ScmError {
    #[error("No {kind} repository found at {}: {source}", path.display())]
    RepositoryNotFound {
        kind: ScmKind,
        path: PathBuf,
        #[source]
        source: Box<gix::discover::Error>,
    },
    #[error("{0} repositories are not supported yet")]
    Unsupported(ScmKind),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
}

// gix errors are large, keep them boxed so `Result<T>` stays small
impl From<gix::object::find::existing::Error> for ScmError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        ScmError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for ScmError {
    fn from(err: gix::object::commit::Error) -> Self {
        ScmError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for ScmError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        ScmError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for ScmError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        ScmError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for ScmError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        ScmError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for ScmError {
    fn from(err: gix::objs::decode::Error) -> Self {
        ScmError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for ScmError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        ScmError::DiffTreeToTree(Box::new(err))
    }
}
