//! Data models for `CourseGraph`

pub mod code;
pub mod course;
pub mod department;
pub mod graph;
pub mod requirement;

pub use code::CourseCode;
pub use course::Course;
pub use department::Department;
pub use graph::{Edge, PrereqGraph};
pub use requirement::{OrGroup, RequirementExpr};
