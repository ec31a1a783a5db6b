//! Shared library for `CourseGraph`
//!
//! Parses scraped prerequisite text into AND-of-OR requirement expressions,
//! compiles them into a weighted prerequisite graph per department, and
//! normalizes that graph so it can be queried and rendered.

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::get_version;
