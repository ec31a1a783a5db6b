//! Read-only queries against a finalized graph

use super::DepartmentGraph;
use crate::core::error::{PrereqError, Result};
use crate::core::models::{CourseCode, OrGroup, PrereqGraph};

/// Every transitive prerequisite of `course`, in catalog order
///
/// Returns an empty list for a course that is not in the graph.
#[must_use]
pub fn ancestors(graph: &PrereqGraph, course: &CourseCode) -> Vec<CourseCode> {
    graph.ancestors(course).into_iter().collect()
}

impl DepartmentGraph {
    /// Every transitive prerequisite of `course`, in catalog order; empty
    /// when the course is unknown
    #[must_use]
    pub fn ancestors(&self, course: &CourseCode) -> Vec<CourseCode> {
        ancestors(&self.graph, course)
    }

    /// Like [`Self::ancestors`], but an unknown course is an error
    ///
    /// # Errors
    /// Returns [`PrereqError::UnknownCourse`] if `course` is not a node.
    pub fn try_ancestors(&self, course: &CourseCode) -> Result<Vec<CourseCode>> {
        self.require_node(course)?;
        Ok(self.ancestors(course))
    }

    /// The requirement groups of `course` that survived filtering
    ///
    /// Empty for an unknown course, a course without requirement text, and a
    /// course none of whose alternatives are visible.
    #[must_use]
    pub fn immediate(&self, course: &CourseCode) -> &[OrGroup] {
        self.visible
            .get(course)
            .and_then(Option::as_ref)
            .map_or(&[], |expr| expr.groups())
    }

    /// Like [`Self::immediate`], but an unknown course is an error
    ///
    /// # Errors
    /// Returns [`PrereqError::UnknownCourse`] if `course` is not a node.
    pub fn try_immediate(&self, course: &CourseCode) -> Result<&[OrGroup]> {
        self.require_node(course)?;
        Ok(self.immediate(course))
    }

    fn require_node(&self, course: &CourseCode) -> Result<()> {
        if self.graph.contains_course(course) {
            Ok(())
        } else {
            Err(PrereqError::UnknownCourse(course.clone()))
        }
    }
}
