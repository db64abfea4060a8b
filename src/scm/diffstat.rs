//! Textual diff-stat blocks.
//!
//! A block holds one line per changed file, `<path> | <count> <bars>`, and a
//! closing summary line (`N files changed, ...`). [`parse`] reduces a block to
//! the bare file paths.

use crate::error::{Result, ScmError};

const MAX_BAR_WIDTH: usize = 50;

/// Per-file change counts for one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub insertions: usize,
    pub deletions: usize,
    pub binary: bool,
}

impl FileChange {
    pub fn text(path: impl Into<String>, insertions: usize, deletions: usize) -> Self {
        Self {
            path: path.into(),
            insertions,
            deletions,
            binary: false,
        }
    }

    pub fn binary(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            insertions: 0,
            deletions: 0,
            binary: true,
        }
    }
}

/// Render `changes` the way `git diff --stat` does. An empty change set
/// renders as an empty block.
pub fn render(changes: &[FileChange]) -> String {
    if changes.is_empty() {
        return String::new();
    }

    let path_width = changes.iter().map(|c| c.path.chars().count()).max().unwrap_or(0);
    let widest = changes
        .iter()
        .map(|c| c.insertions + c.deletions)
        .max()
        .unwrap_or(0);

    let mut block = String::new();
    for change in changes {
        if change.binary {
            block.push_str(&format!(" {:<path_width$} | Bin\n", change.path));
            continue;
        }
        let (plus, minus) = scale_bars(change.insertions, change.deletions, widest);
        block.push_str(&format!(
            " {:<path_width$} | {} {}{}\n",
            change.path,
            change.insertions + change.deletions,
            "+".repeat(plus),
            "-".repeat(minus),
        ));
    }

    let insertions: usize = changes.iter().map(|c| c.insertions).sum();
    let deletions: usize = changes.iter().map(|c| c.deletions).sum();
    block.push_str(&summary_line(changes.len(), insertions, deletions));
    block.push('\n');
    block
}

fn scale_bars(insertions: usize, deletions: usize, widest: usize) -> (usize, usize) {
    if widest <= MAX_BAR_WIDTH {
        return (insertions, deletions);
    }
    let scale = |n: usize| if n == 0 { 0 } else { (n * MAX_BAR_WIDTH / widest).max(1) };
    (scale(insertions), scale(deletions))
}

fn summary_line(files: usize, insertions: usize, deletions: usize) -> String {
    let plural = |n: usize, one: &str, many: &str| {
        if n == 1 {
            format!("{n} {one}")
        } else {
            format!("{n} {many}")
        }
    };

    let mut line = format!(" {}", plural(files, "file changed", "files changed"));
    if insertions > 0 {
        line.push_str(&format!(", {}", plural(insertions, "insertion(+)", "insertions(+)")));
    }
    if deletions > 0 {
        line.push_str(&format!(", {}", plural(deletions, "deletion(-)", "deletions(-)")));
    }
    line
}

/// Extract the changed file paths from a diff-stat block.
///
/// The last line is always treated as the summary and dropped, whatever its
/// content. Every other line must contain a `|`; the text before the first
/// one, trimmed, is the path.
pub fn parse(block: &str) -> Result<Vec<String>> {
    let mut lines: Vec<&str> = block.lines().collect();
    if lines.pop().is_none() {
        return Ok(Vec::new());
    }

    lines
        .into_iter()
        .map(|line| {
            let (path, _) = line
                .split_once('|')
                .ok_or_else(|| ScmError::Parse(format!("diff-stat line without '|': {line:?}")))?;
            let path = path.trim();
            if path.is_empty() {
                return Err(ScmError::Parse(format!("diff-stat line without a path: {line:?}")));
            }
            Ok(path.to_string())
        })
        .collect()
}
