//! Department statistics over a finalized prerequisite graph

use crate::core::models::{CourseCode, PrereqGraph};
use crate::core::pipeline::{DepartmentGraph, RequirementTable};
use std::collections::{BTreeMap, HashSet};

/// Per-course figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CourseStats {
    /// Number of courses directly requiring this one
    pub out_degree: usize,
    /// Number of transitive prerequisites
    pub ancestors: usize,
    /// Number of courses this one blocks (transitive dependents)
    pub blocking: usize,
}

/// Figures for a whole department
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentStats {
    /// Department token
    pub department: String,
    /// Node count of the finalized graph
    pub courses: usize,
    /// Edge count of the finalized graph
    pub edges: usize,
    /// Mean number of requirement groups among courses that have any;
    /// `None` when no course has one
    pub avg_prerequisite_groups: Option<f64>,
    /// Root-to-sink simple paths per node
    pub flexibility: f64,
    /// Per-course figures in catalog order
    pub per_course: BTreeMap<CourseCode, CourseStats>,
}

/// Compute every statistic for one department
///
/// # Arguments
/// * `result` - Output of the pipeline
/// * `level_limit` - Only count requirement groups of courses numbered below this
#[must_use]
pub fn compute_stats(result: &DepartmentGraph, level_limit: Option<u32>) -> DepartmentStats {
    let graph = result.graph();

    let per_course = graph
        .sorted_courses()
        .into_iter()
        .map(|course| {
            let stats = CourseStats {
                out_degree: graph.get_dependents(&course).map_or(0, Vec::len),
                ancestors: graph.ancestors(&course).len(),
                blocking: graph.descendants(&course).len(),
            };
            (course, stats)
        })
        .collect();

    DepartmentStats {
        department: result.department().to_string(),
        courses: graph.course_count(),
        edges: graph.edge_count(),
        avg_prerequisite_groups: average_prerequisite_groups(
            result.original_requirements(),
            level_limit,
        ),
        flexibility: flexibility(graph),
        per_course,
    }
}

/// Mean number of requirement groups over the courses that have at least one
///
/// Groups are counted on the unfiltered expressions, so alternatives from
/// other departments count too.
#[must_use]
pub fn average_prerequisite_groups(
    requirements: &RequirementTable,
    level_limit: Option<u32>,
) -> Option<f64> {
    let counts: Vec<usize> = requirements
        .iter()
        .filter(|(course, _)| level_limit.is_none_or(|limit| course.number() < limit))
        .filter_map(|(_, expr)| expr.as_ref())
        .map(|expr| expr.groups().len())
        .filter(|&groups| groups > 0)
        .collect();

    if counts.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let average = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
    Some(average)
}

/// Number of simple paths from every root to every sink, divided by the node
/// count
///
/// Roots have no prerequisites but at least one dependent; sinks have no
/// dependents. Returns `0.0` for an empty graph.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn flexibility(graph: &PrereqGraph) -> f64 {
    if graph.course_count() == 0 {
        return 0.0;
    }

    let courses = graph.sorted_courses();
    let roots: Vec<&CourseCode> = courses
        .iter()
        .filter(|c| {
            graph.get_prerequisites(c).is_none_or(Vec::is_empty)
                && graph.get_dependents(c).is_some_and(|d| !d.is_empty())
        })
        .collect();
    let sinks: Vec<&CourseCode> = courses
        .iter()
        .filter(|c| graph.get_dependents(c).is_none_or(Vec::is_empty))
        .collect();

    let paths: usize = roots
        .iter()
        .flat_map(|root| sinks.iter().map(move |sink| (*root, *sink)))
        .map(|(root, sink)| count_simple_paths(graph, root, sink))
        .sum();

    paths as f64 / graph.course_count() as f64
}

/// Count the simple paths from `source` to `target`
///
/// Zero when the two are the same course.
#[must_use]
pub fn count_simple_paths(graph: &PrereqGraph, source: &CourseCode, target: &CourseCode) -> usize {
    if source == target {
        return 0;
    }
    let mut visited = HashSet::new();
    visited.insert(source);
    dfs_paths(graph, source, target, &mut visited)
}

/// Depth-first enumeration; `visited` holds the nodes on the current path
fn dfs_paths<'a>(
    graph: &'a PrereqGraph,
    current: &'a CourseCode,
    target: &CourseCode,
    visited: &mut HashSet<&'a CourseCode>,
) -> usize {
    if current == target {
        return 1;
    }

    let Some(dependents) = graph.get_dependents(current) else {
        return 0;
    };

    let mut count = 0;
    for next in dependents {
        if visited.insert(next) {
            count += dfs_paths(graph, next, target, visited);
            visited.remove(next);
        }
    }
    count
}
