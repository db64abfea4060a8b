pub mod cli;
pub mod error;
pub mod model;
pub mod report;
pub mod scm;

pub use error::{Result, ScmError};
pub use model::{LogEntry, ReportKind, ScmKind};
