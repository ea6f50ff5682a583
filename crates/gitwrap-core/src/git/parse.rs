//! Parsers for git's textual output.
//!
//! Everything here is pure: the client hands over captured stdout and gets
//! typed values back.

use chrono::{DateTime, FixedOffset, Weekday};

use crate::error::{GitError, Result};

/// Layout of `git log --format=%cd` output after the weekday token,
/// e.g. `Jan 2 15:04:05 2006 -0700`.
const COMMIT_DATE_FORMAT: &str = "%b %d %H:%M:%S %Y %z";

/// Well-known reference categories under `refs/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// Branches (`refs/heads/`).
    Heads,
    /// Tags (`refs/tags/`).
    Tags,
}

impl RefKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefKind::Heads => "heads",
            RefKind::Tags => "tags",
        }
    }
}

impl std::fmt::Display for RefKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a fully qualified reference path, e.g. `refs/heads/main`.
pub fn qualified_ref(ref_type: &str, name: &str) -> String {
    format!("refs/{}/{}", ref_type, name)
}

/// Pick the remote to use from `git remote` output.
///
/// Returns the chosen name and how many remotes were listed. When several
/// remotes exist the last one listed wins.
pub fn select_remote(stdout: &str) -> Option<(String, usize)> {
    let remotes: Vec<&str> = stdout
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let last = remotes.last()?;
    Some((last.to_string(), remotes.len()))
}

/// Extract reference names from `git ls-remote --<ref_type>` output.
///
/// Lines that do not contain `refs/<ref_type>/` exactly once are skipped.
pub fn parse_remote_refs(stdout: &str, ref_type: &str) -> Vec<String> {
    let marker = format!("refs/{}/", ref_type);

    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.split(marker.as_str()).collect();
            if parts.len() != 2 {
                tracing::warn!(line, "attempted to parse a reference of unexpected format");
                return None;
            }
            Some(parts[1].trim_end().to_string())
        })
        .collect()
}

/// Extract commit hashes from `git log --pretty=format:"%H"` output.
pub fn parse_commit_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| {
            tracing::trace!(line, "processing commit");
            let hash = line.replace('"', "");
            let hash = hash.trim();
            (!hash.is_empty()).then(|| hash.to_string())
        })
        .collect()
}

/// Parse a committer date such as `Mon Jan 2 15:04:05 2006 -0700`.
///
/// The weekday is checked for syntax only; it is not required to agree
/// with the calendar date.
pub fn parse_commit_date(text: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = text.trim();
    let parse_error = |message: String| GitError::Parse {
        input: trimmed.to_string(),
        message,
    };

    let (weekday, rest) = trimmed
        .split_once(char::is_whitespace)
        .ok_or_else(|| parse_error("expected a weekday followed by a date".to_string()))?;

    if weekday.len() != 3 || weekday.parse::<Weekday>().is_err() {
        return Err(parse_error(format!("invalid weekday '{}'", weekday)));
    }

    DateTime::parse_from_str(rest.trim_start(), COMMIT_DATE_FORMAT)
        .map_err(|e| parse_error(e.to_string()))
}
