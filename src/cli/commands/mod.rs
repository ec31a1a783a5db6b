//! CLI command handlers for `CourseGraph`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod graph;
pub mod prereqs;
pub mod stats;

use course_graph::config::Config;
use std::path::{Path, PathBuf};

/// Turn a catalog argument into a file path
///
/// An existing path is used as is. Anything else is read as a department
/// name and looked up as `<catalog_dir>/<DEPT>.toml`.
pub fn resolve_catalog(arg: &str, config: &Config) -> PathBuf {
    let as_path = Path::new(arg);
    if as_path.exists() || config.paths.catalog_dir.is_empty() {
        return as_path.to_path_buf();
    }
    Path::new(&config.paths.catalog_dir).join(format!("{}.toml", arg.to_ascii_uppercase()))
}
