//! Schema of `gitwrap.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::git::DEFAULT_PROGRAM;

/// Settings for building a [`RepoClient`](crate::git::RepoClient).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitwrapConfig {
    /// Working copy to operate on (defaults to the current directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    /// Remote to use instead of discovering one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    /// Git executable to invoke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    /// Resolve the remote when the client is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eager_remote: Option<bool>,
}

impl GitwrapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program(&self) -> &str {
        self.program.as_deref().unwrap_or(DEFAULT_PROGRAM)
    }

    pub fn eager_remote(&self) -> bool {
        self.eager_remote.unwrap_or(false)
    }

    /// Overlay `other` on top of `self`; set keys in `other` win.
    pub fn merge(mut self, other: GitwrapConfig) -> Self {
        if other.working_dir.is_some() {
            self.working_dir = other.working_dir;
        }
        if other.remote.is_some() {
            self.remote = other.remote;
        }
        if other.program.is_some() {
            self.program = other.program;
        }
        if other.eager_remote.is_some() {
            self.eager_remote = other.eager_remote;
        }
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(program) = &self.program
            && program.trim().is_empty()
        {
            anyhow::bail!("Invalid config: 'program' must not be empty");
        }
        if let Some(remote) = &self.remote
            && remote.trim().is_empty()
        {
            anyhow::bail!("Invalid config: 'remote' must not be empty");
        }
        Ok(())
    }
}
