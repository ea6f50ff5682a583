//! Git operations through the command-line client.
//!
//! - `client`: [`RepoClient`], one method per git operation
//! - `parse`: pure parsers for git's textual output

mod client;
mod parse;

pub use client::{DEFAULT_PROGRAM, RepoClient};
pub use parse::{
    RefKind, parse_commit_date, parse_commit_list, parse_remote_refs, qualified_ref,
    select_remote,
};

#[cfg(test)]
mod tests;
