//! Error types for git invocations.

use thiserror::Error;

/// Errors returned by [`RepoClient`](crate::git::RepoClient) operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git process could not be started or run.
    #[error("failed to run git {operation}: {source}")]
    Execution {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The git process ran but reported failure.
    #[error("git {operation} command returned a non zero code")]
    NonZeroExit {
        operation: &'static str,
        code: Option<i32>,
        stderr: Option<String>,
    },

    /// The git process succeeded but produced no usable output.
    #[error("{0}")]
    NotFound(String),

    /// Output was present but did not have the expected shape.
    #[error("unexpected output {input:?}: {message}")]
    Parse { input: String, message: String },

    /// Configuration could not be loaded or is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GitError>;

impl GitError {
    /// The git subcommand that failed, when the error came from a process.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Execution { operation, .. } | Self::NonZeroExit { operation, .. } => {
                Some(operation)
            }
            _ => None,
        }
    }

    /// Exit status reported by git for [`GitError::NonZeroExit`].
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code, .. } => *code,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
