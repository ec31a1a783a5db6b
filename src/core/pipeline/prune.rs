//! Redundancy pruning: drop direct edges already implied by a longer chain

use crate::core::models::{CourseCode, Edge, PrereqGraph};
use crate::debug;
use std::collections::{HashSet, VecDeque};

/// Output of the pruning stage
#[derive(Debug, Clone, Default)]
pub struct PrunedGraph {
    /// Graph without redundant edges
    pub graph: PrereqGraph,
    /// Edges that were dropped, in catalog order
    pub removed: Vec<Edge>,
}

/// Remove every direct edge `u -> v` for which another path from `u` to `v`
/// exists in `graph`
///
/// All decisions are taken against `graph` as given, so the order in which
/// edges are visited does not matter and an edge removed earlier in the pass
/// still counts as part of other paths.
#[must_use]
pub fn prune_redundant(graph: &PrereqGraph) -> PrunedGraph {
    let removed: Vec<Edge> = graph
        .edges()
        .into_iter()
        .filter(|edge| has_alternate_path(graph, &edge.source, &edge.target))
        .collect();

    let mut pruned = graph.clone();
    for edge in &removed {
        debug!("Pruned redundant edge {} -> {}", edge.source, edge.target);
        pruned.remove_prerequisite(&edge.target, &edge.source);
    }

    PrunedGraph {
        graph: pruned,
        removed,
    }
}

/// Whether `target` is reachable from `source` without the direct edge
/// between them
///
/// Any such walk shortens to a simple path of length at least two.
fn has_alternate_path(graph: &PrereqGraph, source: &CourseCode, target: &CourseCode) -> bool {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    queue.push_back(source);
    visited.insert(source);

    while let Some(course) = queue.pop_front() {
        let Some(dependents) = graph.get_dependents(course) else {
            continue;
        };
        for next in dependents {
            if course == source && next == target {
                continue;
            }
            if next == target {
                return true;
            }
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    false
}
