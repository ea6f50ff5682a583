//! Config store for locating and loading gitwrap.toml files.

use std::path::{Path, PathBuf};

use super::{GitwrapConfig, parser, paths};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    global_dir: Option<PathBuf>,
    working_dir: PathBuf,
    explicit_path: Option<PathBuf>,
}

impl ConfigStore {
    /// Store using the platform config directory and the current directory.
    pub fn from_env() -> anyhow::Result<Self> {
        let working_dir = std::env::current_dir()?;
        Ok(Self::from_paths(paths::default_global_dir(), working_dir))
    }

    pub fn from_paths(global_dir: Option<PathBuf>, working_dir: PathBuf) -> Self {
        Self {
            global_dir,
            working_dir,
            explicit_path: None,
        }
    }

    /// Load only this file instead of searching the default locations.
    pub fn with_explicit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Files that would be read, lowest precedence first.
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        if let Some(path) = &self.explicit_path {
            return vec![path.clone()];
        }
        let mut candidates = Vec::new();
        if let Some(dir) = &self.global_dir {
            candidates.push(paths::global_config_path(dir));
        }
        candidates.push(paths::project_config_path(&self.working_dir));
        candidates
    }

    /// Load and merge every existing config file.
    ///
    /// An explicit path must exist; default locations are optional.
    pub fn load(&self) -> anyhow::Result<GitwrapConfig> {
        if let Some(path) = &self.explicit_path {
            tracing::debug!(path = %path.display(), "loading explicit config");
            return parser::parse_gitwrap_toml(path);
        }

        let mut config = GitwrapConfig::new();
        for path in self.candidate_paths() {
            if !path.exists() {
                continue;
            }
            tracing::debug!(path = %path.display(), "loading config");
            config = config.merge(parser::parse_gitwrap_toml(&path)?);
        }
        Ok(config)
    }
}
