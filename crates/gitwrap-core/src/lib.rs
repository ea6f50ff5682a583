//! Gitwrap Core Library
//!
//! Typed access to a handful of git operations (remote discovery, fetch,
//! reference listing, commit inspection and force-push) by running the
//! `git` executable and parsing what it prints.

pub mod config;
pub mod error;
pub mod exec;
pub mod git;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::config::{ConfigStore, GitwrapConfig};
    pub use crate::error::{GitError, Result};
    pub use crate::exec::{CommandExecutor, CommandOutput, SystemExecutor};
    pub use crate::git::{RefKind, RepoClient};
}
