//! Config path resolution helpers.

use std::path::{Path, PathBuf};

pub fn project_config_path(working_dir: &Path) -> PathBuf {
    working_dir.join(".gitwrap.toml")
}

pub fn global_config_path(global_dir: &Path) -> PathBuf {
    global_dir.join("gitwrap.toml")
}

/// `<config dir>/gitwrap`, or `None` when the platform has no config dir.
pub fn default_global_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("gitwrap"))
}
