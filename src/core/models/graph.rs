//! Weighted prerequisite graph

use super::CourseCode;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// One prerequisite relationship, pointing from the prerequisite to the dependent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    /// The prerequisite course
    pub source: CourseCode,
    /// The course that requires `source`
    pub target: CourseCode,
    /// Share of an OR-group carried by this edge, in `(0, 1]`
    pub weight: f64,
}

/// Directed graph of course prerequisites with fractional edge weights
///
/// Like the curriculum DAG it grew out of, the graph keeps two association
/// lists so it can be walked in both directions:
/// - `dependencies`: each course to its prerequisites
/// - `dependents`: each course to the courses that require it
///
/// Nothing here enforces acyclicity; cycles are only removed by the
/// resolver stage of the pipeline.
#[derive(Debug, Clone, Default)]
pub struct PrereqGraph {
    /// Course -> prerequisite courses
    dependencies: HashMap<CourseCode, Vec<CourseCode>>,

    /// Course -> courses that depend on it
    dependents: HashMap<CourseCode, Vec<CourseCode>>,

    /// (prerequisite, dependent) -> weight
    weights: HashMap<(CourseCode, CourseCode), f64>,

    /// All nodes in insertion order
    courses: Vec<CourseCode>,
}

impl PrereqGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; adding an existing node is a no-op
    pub fn add_course(&mut self, course: CourseCode) {
        if !self.dependencies.contains_key(&course) {
            self.courses.push(course.clone());
            self.dependencies.insert(course.clone(), Vec::new());
            self.dependents.insert(course, Vec::new());
        }
    }

    /// Add a weighted prerequisite edge `prerequisite -> course`
    ///
    /// Both endpoints become nodes if they are not already. Weights from
    /// different OR-groups on the same pair add up, capped at `1.0`.
    pub fn add_prerequisite(&mut self, course: &CourseCode, prerequisite: &CourseCode, weight: f64) {
        self.add_course(course.clone());
        self.add_course(prerequisite.clone());

        let key = (prerequisite.clone(), course.clone());
        if let Some(existing) = self.weights.get_mut(&key) {
            *existing = (*existing + weight).min(1.0);
            return;
        }
        self.weights.insert(key, weight.min(1.0));

        if let Some(prereqs) = self.dependencies.get_mut(course) {
            prereqs.push(prerequisite.clone());
        }
        if let Some(deps) = self.dependents.get_mut(prerequisite) {
            deps.push(course.clone());
        }
    }

    /// Remove the edge `prerequisite -> course`
    ///
    /// # Returns
    /// `true` if the edge existed
    pub fn remove_prerequisite(&mut self, course: &CourseCode, prerequisite: &CourseCode) -> bool {
        if self
            .weights
            .remove(&(prerequisite.clone(), course.clone()))
            .is_none()
        {
            return false;
        }
        if let Some(prereqs) = self.dependencies.get_mut(course) {
            prereqs.retain(|p| p != prerequisite);
        }
        if let Some(deps) = self.dependents.get_mut(prerequisite) {
            deps.retain(|d| d != course);
        }
        true
    }

    /// Direct prerequisites of a course, or `None` if the course is not a node
    #[must_use]
    pub fn get_prerequisites(&self, course: &CourseCode) -> Option<&Vec<CourseCode>> {
        self.dependencies.get(course)
    }

    /// Courses that directly require a course, or `None` if the course is not a node
    #[must_use]
    pub fn get_dependents(&self, course: &CourseCode) -> Option<&Vec<CourseCode>> {
        self.dependents.get(course)
    }

    /// Whether `course` is a node
    #[must_use]
    pub fn contains_course(&self, course: &CourseCode) -> bool {
        self.dependencies.contains_key(course)
    }

    /// Whether the edge `prerequisite -> course` exists
    #[must_use]
    pub fn has_edge(&self, prerequisite: &CourseCode, course: &CourseCode) -> bool {
        self.weights
            .contains_key(&(prerequisite.clone(), course.clone()))
    }

    /// Weight of the edge `prerequisite -> course`
    #[must_use]
    pub fn weight(&self, prerequisite: &CourseCode, course: &CourseCode) -> Option<f64> {
        self.weights
            .get(&(prerequisite.clone(), course.clone()))
            .copied()
    }

    /// Nodes in insertion order
    #[must_use]
    pub fn courses(&self) -> &[CourseCode] {
        &self.courses
    }

    /// Nodes in catalog order
    #[must_use]
    pub fn sorted_courses(&self) -> Vec<CourseCode> {
        let mut sorted = self.courses.clone();
        sorted.sort();
        sorted
    }

    /// Number of nodes
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Number of edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// All edges, ordered by source then target in catalog order
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .weights
            .iter()
            .map(|((source, target), weight)| Edge {
                source: source.clone(),
                target: target.clone(),
                weight: *weight,
            })
            .collect();
        edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));
        edges
    }

    /// Whether a node has neither prerequisites nor dependents
    #[must_use]
    pub fn is_isolated(&self, course: &CourseCode) -> bool {
        self.dependencies.get(course).is_none_or(Vec::is_empty)
            && self.dependents.get(course).is_none_or(Vec::is_empty)
    }

    /// Copy of this graph without isolated nodes, for rendering
    #[must_use]
    pub fn without_isolated(&self) -> Self {
        let mut graph = self.clone();
        graph.courses.retain(|c| !self.is_isolated(c));
        graph.dependencies.retain(|c, _| !self.is_isolated(c));
        graph.dependents.retain(|c, _| !self.is_isolated(c));
        graph
    }

    /// Every course reachable by following prerequisite edges backwards
    ///
    /// The start course is excluded even when it sits on a cycle.
    #[must_use]
    pub fn ancestors(&self, course: &CourseCode) -> BTreeSet<CourseCode> {
        Self::reachable(course, &self.dependencies)
    }

    /// Every course reachable by following prerequisite edges forwards
    #[must_use]
    pub fn descendants(&self, course: &CourseCode) -> BTreeSet<CourseCode> {
        Self::reachable(course, &self.dependents)
    }

    /// Breadth-first reachability over one of the association lists
    fn reachable(
        start: &CourseCode,
        adjacency: &HashMap<CourseCode, Vec<CourseCode>>,
    ) -> BTreeSet<CourseCode> {
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(course) = queue.pop_front() {
            if let Some(neighbors) = adjacency.get(course) {
                for neighbor in neighbors {
                    if visited.insert(neighbor.clone()) {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        visited.remove(start);
        visited
    }
}

impl std::fmt::Display for PrereqGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Prerequisite graph ({} courses, {} edges):",
            self.course_count(),
            self.edge_count()
        )?;
        writeln!(f)?;

        for course in self.sorted_courses() {
            let mut prereqs = self.dependencies.get(&course).cloned().unwrap_or_default();
            if prereqs.is_empty() {
                writeln!(f, "  {course} → (no prerequisites)")?;
                continue;
            }
            prereqs.sort();
            let rendered: Vec<String> = prereqs
                .iter()
                .map(|p| {
                    let weight = self.weight(p, &course).unwrap_or_default();
                    format!("{p} ({weight:.2})")
                })
                .collect();
            writeln!(f, "  {course} → {}", rendered.join(", "))?;
        }

        Ok(())
    }
}
