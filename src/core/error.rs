//! Error taxonomy for the prerequisite pipeline
//!
//! Only the loading and export variants ever abort a run. `MalformedCode` and
//! `AmbiguousCycle` are collected as diagnostics while the pipeline keeps
//! going, and `UnknownCourse` is only produced by the `try_` query accessors.

use crate::core::models::CourseCode;
use thiserror::Error;

/// Errors produced while loading catalogs or running the graph pipeline
#[derive(Debug, Error)]
pub enum PrereqError {
    /// A code fragment has no letter run followed by a digit run
    #[error("malformed course code: '{0}'")]
    MalformedCode(String),

    /// A cycle without a distinct head/tail pair; it is left in the graph
    #[error("ambiguous cycle: {}", format_cycle(.0))]
    AmbiguousCycle(Vec<CourseCode>),

    /// A closure query named a course that is not a node of the graph
    #[error("unknown course: {0}")]
    UnknownCourse(CourseCode),

    /// A catalog listing key does not start with a course code
    #[error("malformed catalog listing: '{0}'")]
    MalformedListing(String),

    /// No catalog entry survived for the requested department
    #[error("catalog has no courses for department '{0}'")]
    EmptyDepartment(String),

    /// Reading a catalog or offering file failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A catalog file is not valid TOML for the expected schema
    #[error("catalog parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Serializing an export failed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, PrereqError>;

fn format_cycle(nodes: &[CourseCode]) -> String {
    nodes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" - ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_cycle_lists_members() {
        let cycle: Vec<CourseCode> = ["ECE 15", "ECE 25", "ECE 035"]
            .iter()
            .map(|raw| raw.parse().expect("valid course code"))
            .collect();
        let message = PrereqError::AmbiguousCycle(cycle).to_string();
        assert_eq!(message, "ambiguous cycle: ECE 15 - ECE 25 - ECE 35");
    }

    #[test]
    fn malformed_code_quotes_fragment() {
        let message = PrereqError::MalformedCode("consent of".to_string()).to_string();
        assert!(message.contains("'consent of'"));
    }
}
