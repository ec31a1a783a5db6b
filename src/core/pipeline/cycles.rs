//! Cycle resolution
//!
//! Filtering an OR-group down to its in-department alternatives can turn
//! "A or B" into a hard "A", and together with another edge that can close a
//! spurious cycle. The resolver walks a cycle basis of the undirected
//! skeleton and, for each basis cycle, removes the edge closing it from its
//! tail back to its head unless the unfiltered requirements show the edge
//! stood for one branch of an OR.

use super::builder::RequirementTable;
use crate::core::error::PrereqError;
use crate::core::models::{CourseCode, Edge, PrereqGraph};
use crate::debug;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// What the resolver did with the cycles it examined
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// Closing edges that were removed
    pub removed: Vec<Edge>,
    /// Closing edges kept because their endpoints were OR-alternatives
    pub retained: Vec<Edge>,
    /// Cycles without a distinct head and tail, left in place
    pub ambiguous: Vec<Vec<CourseCode>>,
}

impl CycleReport {
    /// Whether the resolver left every cycle untouched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.retained.is_empty() && self.ambiguous.is_empty()
    }

    /// One [`PrereqError::AmbiguousCycle`] per unresolved cycle
    pub fn unresolved(&self) -> impl Iterator<Item = PrereqError> + '_ {
        self.ambiguous
            .iter()
            .map(|cycle| PrereqError::AmbiguousCycle(cycle.clone()))
    }
}

/// Output of the resolution stage
#[derive(Debug, Clone, Default)]
pub struct ResolvedGraph {
    /// Graph with the removable closing edges gone
    pub graph: PrereqGraph,
    /// Decisions taken per cycle
    pub report: CycleReport,
}

/// The head and tail picked for one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
enum Orientation {
    /// `head` is reached from every other node, `tail` reaches every other node
    Resolved {
        head: CourseCode,
        tail: CourseCode,
    },
    /// Nothing to decide: no edge closes the cycle from its tail
    Open,
    /// No distinct head/tail pair
    Ambiguous,
}

/// Break the spurious cycles of `graph`
///
/// # Arguments
/// * `graph` - The pruned graph
/// * `original` - Unfiltered requirement expressions, consulted to tell an
///   OR-branch apart from a redundant edge
#[must_use]
pub fn resolve_cycles(graph: &PrereqGraph, original: &RequirementTable) -> ResolvedGraph {
    let mut working = graph.clone();
    let mut report = CycleReport::default();

    for cycle in cycle_basis(graph) {
        let (head, tail) = match orient(&working, &cycle) {
            Orientation::Resolved { head, tail } => (head, tail),
            Orientation::Open => continue,
            Orientation::Ambiguous => {
                debug!("Leaving ambiguous cycle {}", join(&cycle));
                report.ambiguous.push(cycle);
                continue;
            }
        };

        let Some(weight) = working.weight(&tail, &head) else {
            continue;
        };
        let edge = Edge {
            source: tail.clone(),
            target: head.clone(),
            weight,
        };

        let or_branch = other_predecessor(&cycle, &head, &tail).is_some_and(|other| {
            original
                .get(&head)
                .and_then(Option::as_ref)
                .is_some_and(|expr| expr.are_alternatives(&tail, other))
        });

        if or_branch {
            debug!("Keeping {tail} -> {head}: OR-alternative in {head}'s requirements");
            report.retained.push(edge);
        } else {
            debug!("Removing closing edge {tail} -> {head}");
            working.remove_prerequisite(&head, &tail);
            report.removed.push(edge);
        }
    }

    ResolvedGraph {
        graph: working,
        report,
    }
}

/// Find the head and tail of `cycle` in the current state of `graph`
///
/// The head is the only node whose ancestors include every other cycle node,
/// the tail the only node whose descendants do. When every node qualifies
/// for both (the nodes are mutually reachable) the lowest code in catalog
/// order is taken as head and its in-cycle predecessor as tail.
fn orient(graph: &PrereqGraph, cycle: &[CourseCode]) -> Orientation {
    let mut heads = Vec::new();
    let mut tails = Vec::new();

    for (index, node) in cycle.iter().enumerate() {
        let others = || {
            cycle
                .iter()
                .enumerate()
                .filter(move |(i, _)| *i != index)
                .map(|(_, other)| other)
        };
        let ancestors = graph.ancestors(node);
        let descendants = graph.descendants(node);

        if others().all(|other| ancestors.contains(other)) {
            heads.push(index);
        }
        if others().all(|other| descendants.contains(other)) {
            tails.push(index);
        }
    }

    match (heads.as_slice(), tails.as_slice()) {
        ([head], [tail]) if head != tail => Orientation::Resolved {
            head: cycle[*head].clone(),
            tail: cycle[*tail].clone(),
        },
        _ if heads.len() == cycle.len() && tails.len() == cycle.len() => {
            let Some(head) = cycle.iter().min() else {
                return Orientation::Ambiguous;
            };
            neighbors(cycle, head)
                .into_iter()
                .find(|n| graph.has_edge(n, head))
                .map_or(Orientation::Open, |tail| Orientation::Resolved {
                    head: head.clone(),
                    tail: tail.clone(),
                })
        }
        _ => Orientation::Ambiguous,
    }
}

/// The cycle neighbor of `head` other than `tail`
fn other_predecessor<'a>(
    cycle: &'a [CourseCode],
    head: &CourseCode,
    tail: &CourseCode,
) -> Option<&'a CourseCode> {
    neighbors(cycle, head).into_iter().find(|n| *n != tail)
}

/// The nodes next to `node` in cycle order, lower code first
fn neighbors<'a>(cycle: &'a [CourseCode], node: &CourseCode) -> Vec<&'a CourseCode> {
    let Some(index) = cycle.iter().position(|c| c == node) else {
        return Vec::new();
    };
    let len = cycle.len();
    let mut found: Vec<&CourseCode> = [(index + len - 1) % len, (index + 1) % len]
        .into_iter()
        .filter(|&i| i != index)
        .map(|i| &cycle[i])
        .collect();
    found.sort();
    found.dedup();
    found
}

/// Fundamental cycles of the undirected skeleton of `graph`
///
/// Each cycle is listed in traversal order, so consecutive entries (and the
/// last and first) are adjacent. A spanning forest is grown breadth-first
/// from the lowest code of each component; every non-tree edge closes one
/// cycle through the tree. Pairs of courses requiring each other collapse to
/// a single skeleton edge, so they are reported as two-node cycles.
#[must_use]
pub fn cycle_basis(graph: &PrereqGraph) -> Vec<Vec<CourseCode>> {
    let nodes = graph.sorted_courses();
    let index: HashMap<&CourseCode, usize> = nodes.iter().enumerate().map(|(i, c)| (c, i)).collect();

    let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); nodes.len()];
    let mut mutual = Vec::new();
    for edge in graph.edges() {
        let (Some(&a), Some(&b)) = (index.get(&edge.source), index.get(&edge.target)) else {
            continue;
        };
        if a < b && graph.has_edge(&edge.target, &edge.source) {
            mutual.push(vec![nodes[a].clone(), nodes[b].clone()]);
        }
        adjacency[a].insert(b);
        adjacency[b].insert(a);
    }

    let mut parent: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut depth = vec![0usize; nodes.len()];
    let mut visited = vec![false; nodes.len()];
    let mut tree = HashSet::new();

    for root in 0..nodes.len() {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut queue = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            for &next in &adjacency[current] {
                if !visited[next] {
                    visited[next] = true;
                    parent[next] = Some(current);
                    depth[next] = depth[current] + 1;
                    tree.insert((current.min(next), current.max(next)));
                    queue.push_back(next);
                }
            }
        }
    }

    let mut cycles = Vec::new();
    for (a, adjacent) in adjacency.iter().enumerate() {
        for &b in adjacent.range(a + 1..) {
            if tree.contains(&(a, b)) {
                continue;
            }
            let path = tree_path(a, b, &parent, &depth);
            cycles.push(path.into_iter().map(|i| nodes[i].clone()).collect());
        }
    }

    cycles.extend(mutual);
    cycles
}

/// Path through the spanning tree from `a` to `b`
fn tree_path(a: usize, b: usize, parent: &[Option<usize>], depth: &[usize]) -> Vec<usize> {
    let mut left = vec![a];
    let mut right = vec![b];
    let (mut x, mut y) = (a, b);

    while depth[x] > depth[y] {
        let Some(up) = parent[x] else { break };
        x = up;
        left.push(x);
    }
    while depth[y] > depth[x] {
        let Some(up) = parent[y] else { break };
        y = up;
        right.push(y);
    }
    while x != y {
        let (Some(px), Some(py)) = (parent[x], parent[y]) else {
            break;
        };
        x = px;
        y = py;
        left.push(x);
        right.push(y);
    }

    // both halves end at the common ancestor
    right.pop();
    left.extend(right.into_iter().rev());
    left
}

fn join(cycle: &[CourseCode]) -> String {
    cycle
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" - ")
}
