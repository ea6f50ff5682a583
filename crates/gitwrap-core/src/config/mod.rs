//! Configuration loading for gitwrap.
//!
//! Two files are consulted, lowest precedence first:
//! - Global: `<config dir>/gitwrap/gitwrap.toml`
//! - Project: `<working dir>/.gitwrap.toml`
//!
//! Values from the project file override global ones key by key.

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use parser::{parse_gitwrap_toml, parse_gitwrap_toml_str, to_toml};
pub use paths::{default_global_dir, global_config_path, project_config_path};
pub use schema::GitwrapConfig;
pub use store::ConfigStore;
