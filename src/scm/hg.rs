//! Mercurial log records.
//!
//! Mercurial has no accessor yet (see [`super::open`]); these helpers cover
//! the parts of its log format that differ from git. Nothing outside the
//! tests below calls them until that accessor exists.

use crate::error::{Result, ScmError};

/// Composite identifier, `"<rev> [tag, tag] - <hash>"`. The bracket group is
/// omitted for untagged changesets.
pub fn entry_id(rev: u64, tags: &[String], hash: &str) -> String {
    if tags.is_empty() {
        format!("{rev} - {hash}")
    } else {
        format!("{rev} [{}] - {hash}", tags.join(", "))
    }
}

/// Split a `"Name <email>"` user field into name and e-mail.
pub fn split_user(user: &str) -> Result<(String, String)> {
    let (name, rest) = user
        .split_once('<')
        .ok_or_else(|| ScmError::Parse(format!("no e-mail in user field {user:?}")))?;
    let email = rest.trim().trim_end_matches('>').trim();
    Ok((name.trim().to_string(), email.to_string()))
}
