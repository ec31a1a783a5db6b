//! Graph building: filtered requirement expressions to weighted edges

use crate::core::models::{CourseCode, OrGroup, PrereqGraph, RequirementExpr};
use std::collections::{BTreeMap, BTreeSet};

/// Parsed requirement expression per course, `None` where the catalog had no text
pub type RequirementTable = BTreeMap<CourseCode, Option<RequirementExpr>>;

/// Which courses may appear in a department's graph
///
/// A course passes when it belongs to the department, is offered this term
/// and its number is below the level limit. Prerequisites are held to the
/// same test as the courses requiring them.
#[derive(Debug, Clone, Copy)]
pub struct CourseFilter<'a> {
    /// Department token
    pub department: &'a str,
    /// Offered set; `None` admits every course
    pub offered: Option<&'a BTreeSet<CourseCode>>,
    /// Exclusive upper bound on the course number (e.g., 200 drops graduate courses)
    pub level_limit: Option<u32>,
}

impl<'a> CourseFilter<'a> {
    /// A filter admitting every course of `department`
    #[must_use]
    pub const fn department(department: &'a str) -> Self {
        Self {
            department,
            offered: None,
            level_limit: None,
        }
    }

    /// Whether `code` passes every filter
    #[must_use]
    pub fn admits(&self, code: &CourseCode) -> bool {
        code.in_department(self.department)
            && self.offered.is_none_or(|set| set.contains(code))
            && self.level_limit.is_none_or(|limit| code.number() < limit)
    }
}

/// Output of the build stage
#[derive(Debug, Clone, Default)]
pub struct BuiltGraph {
    /// Graph over the admitted courses
    pub graph: PrereqGraph,
    /// Requirement expressions reduced to their admitted alternatives,
    /// keyed by every admitted course
    pub visible: RequirementTable,
}

/// Build the weighted prerequisite graph for one department
///
/// Every admitted course becomes a node. Each OR-group contributes one edge
/// per admitted alternative, weighted `1 / |admitted alternatives|`; a group
/// with no admitted alternative contributes nothing.
#[must_use]
pub fn build_graph(requirements: &RequirementTable, filter: &CourseFilter<'_>) -> BuiltGraph {
    let mut built = BuiltGraph::default();

    for (course, expr) in requirements {
        if !filter.admits(course) {
            continue;
        }
        built.graph.add_course(course.clone());

        let Some(expr) = expr else {
            built.visible.insert(course.clone(), None);
            continue;
        };

        let groups: Vec<OrGroup> = expr
            .groups()
            .iter()
            .map(|group| group.filtered(|code| filter.admits(code)))
            .filter(|group| !group.is_empty())
            .collect();

        for group in &groups {
            #[allow(clippy::cast_precision_loss)]
            let weight = 1.0 / group.len() as f64;
            for prerequisite in group.codes() {
                built.graph.add_prerequisite(course, prerequisite, weight);
            }
        }

        built
            .visible
            .insert(course.clone(), Some(RequirementExpr::new(groups)));
    }

    built
}
