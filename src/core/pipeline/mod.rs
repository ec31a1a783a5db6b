//! Department pipeline: parse, build, prune, resolve
//!
//! Each stage takes the previous stage's graph by reference and returns a
//! new value, so a [`DepartmentGraph`] only exists once every stage has run.

pub mod builder;
pub mod closure;
pub mod cycles;
pub mod prune;

pub use builder::{build_graph, BuiltGraph, CourseFilter, RequirementTable};
pub use closure::ancestors;
pub use cycles::{cycle_basis, resolve_cycles, CycleReport, ResolvedGraph};
pub use prune::{prune_redundant, PrunedGraph};

use crate::core::error::{PrereqError, Result};
use crate::core::models::{CourseCode, Department, Edge, PrereqGraph};
use crate::core::parser::{parse_requirement, DroppedFragment};
use crate::{info, warn};
use std::collections::BTreeSet;

/// Per-run filters on top of the department's own data
#[derive(Debug, Clone, Default)]
pub struct GraphOptions {
    /// Exclusive upper bound on course numbers
    pub level_limit: Option<u32>,
    /// Offered set replacing the one carried by the catalog
    pub offered: Option<BTreeSet<CourseCode>>,
}

/// The finalized graph of one department together with everything the
/// stages learned on the way
#[derive(Debug, Clone)]
pub struct DepartmentGraph {
    department: String,
    term: Option<String>,
    graph: PrereqGraph,
    original: RequirementTable,
    visible: RequirementTable,
    warnings: Vec<DroppedFragment>,
    pruned: Vec<Edge>,
    cycles: CycleReport,
}

impl DepartmentGraph {
    /// Department token
    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Term of the offered set, if the catalog named one
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// The finalized graph
    #[must_use]
    pub const fn graph(&self) -> &PrereqGraph {
        &self.graph
    }

    /// Unfiltered parser output for every catalog course
    #[must_use]
    pub const fn original_requirements(&self) -> &RequirementTable {
        &self.original
    }

    /// Fragments the parser could not read, per course
    #[must_use]
    pub fn warnings(&self) -> &[DroppedFragment] {
        &self.warnings
    }

    /// Edges dropped by the pruner
    #[must_use]
    pub fn pruned_edges(&self) -> &[Edge] {
        &self.pruned
    }

    /// What the cycle resolver did
    #[must_use]
    pub const fn cycle_report(&self) -> &CycleReport {
        &self.cycles
    }

    /// Nodes in catalog order
    #[must_use]
    pub fn nodes(&self) -> Vec<CourseCode> {
        self.graph.sorted_courses()
    }

    /// Weighted edges in catalog order
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        self.graph.edges()
    }
}

/// Run every stage for one department
///
/// # Errors
/// Returns [`PrereqError::EmptyDepartment`] if the department has no
/// courses. Malformed fragments and ambiguous cycles never fail the run;
/// they are reported on the result.
pub fn run_pipeline(department: &Department, options: &GraphOptions) -> Result<DepartmentGraph> {
    if department.course_count() == 0 {
        return Err(PrereqError::EmptyDepartment(department.name.clone()));
    }

    let mut original = RequirementTable::new();
    let mut warnings = Vec::new();
    for course in department.courses() {
        let parsed = parse_requirement(&course.code, course.raw_prerequisites.as_deref());
        for dropped in &parsed.dropped {
            warn!(
                "{}: dropped unreadable requirement '{}'{}",
                dropped.course,
                dropped.fragment,
                if dropped.emptied_group {
                    " (whole group lost)"
                } else {
                    ""
                }
            );
        }
        warnings.extend(parsed.dropped);
        original.insert(course.code.clone(), parsed.expr);
    }

    let filter = CourseFilter {
        department: &department.name,
        offered: options.offered.as_ref().or_else(|| department.offered()),
        level_limit: options.level_limit,
    };

    let built = build_graph(&original, &filter);
    info!(
        "{}: built {} courses, {} edges",
        department.name,
        built.graph.course_count(),
        built.graph.edge_count()
    );

    let pruned = prune_redundant(&built.graph);
    info!(
        "{}: pruned {} redundant edges",
        department.name,
        pruned.removed.len()
    );

    let resolved = resolve_cycles(&pruned.graph, &original);
    info!(
        "{}: removed {} closing edges, kept {}, {} ambiguous cycles",
        department.name,
        resolved.report.removed.len(),
        resolved.report.retained.len(),
        resolved.report.ambiguous.len()
    );
    for unresolved in resolved.report.unresolved() {
        warn!("{}: {unresolved}", department.name);
    }

    Ok(DepartmentGraph {
        department: department.name.clone(),
        term: department.term.clone(),
        graph: resolved.graph,
        original,
        visible: built.visible,
        warnings,
        pruned: pruned.removed,
        cycles: resolved.report,
    })
}
