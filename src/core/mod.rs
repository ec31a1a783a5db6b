//! Core module: models, parsing, the graph pipeline and its consumers

pub mod batch;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod parser;
pub mod pipeline;

pub use error::{PrereqError, Result};

/// Returns the current version of the `CourseGraph` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
