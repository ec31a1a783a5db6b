//! Export of finalized graphs for the visualization layer
//!
//! Two renderings are produced: a JSON document carrying nodes, weighted
//! edges, closures and diagnostics, and a Mermaid flowchart that GitHub,
//! GitLab and other Markdown viewers render directly.

use crate::core::error::Result;
use crate::core::models::{CourseCode, Department, Edge, PrereqGraph};
use crate::core::pipeline::DepartmentGraph;
use serde::Serialize;
use std::fmt::Write;

/// Output formats for `graph` exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON document
    #[default]
    Json,
    /// Mermaid flowchart wrapped in a Markdown code fence
    Mermaid,
}

impl ExportFormat {
    /// File extension for this format
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Mermaid => "md",
        }
    }
}

#[derive(Debug, Serialize)]
struct GraphDocument<'a> {
    department: &'a str,
    term: Option<&'a str>,
    nodes: Vec<NodeEntry<'a>>,
    edges: Vec<Edge>,
    pruned_edges: &'a [Edge],
    cycles: CycleEntry<'a>,
    warnings: Vec<WarningEntry>,
}

#[derive(Debug, Serialize)]
struct NodeEntry<'a> {
    code: &'a CourseCode,
    title: Option<&'a str>,
    prerequisites: String,
    ancestors: Vec<CourseCode>,
}

#[derive(Debug, Serialize)]
struct CycleEntry<'a> {
    removed: &'a [Edge],
    retained: &'a [Edge],
    unresolved: &'a [Vec<CourseCode>],
}

#[derive(Debug, Serialize)]
struct WarningEntry {
    course: CourseCode,
    fragment: String,
    emptied_group: bool,
}

/// Render a pipeline result in the requested format
///
/// # Arguments
/// * `result` - Pipeline output
/// * `catalog` - The department the result was built from, for titles
/// * `format` - Output format
/// * `hide_isolated` - Drop courses without any edge before rendering
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn export_graph(
    result: &DepartmentGraph,
    catalog: &Department,
    format: ExportFormat,
    hide_isolated: bool,
) -> Result<String> {
    match format {
        ExportFormat::Json => to_json(result, catalog, hide_isolated),
        ExportFormat::Mermaid => Ok(to_mermaid(result, catalog, hide_isolated)),
    }
}

/// Render a pipeline result as a pretty-printed JSON document
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_json(result: &DepartmentGraph, catalog: &Department, hide_isolated: bool) -> Result<String> {
    let graph = rendered_graph(result.graph(), hide_isolated);
    let courses = graph.sorted_courses();

    let nodes = courses
        .iter()
        .map(|code| NodeEntry {
            code,
            title: catalog.get_course(code).map(|c| c.title.as_str()),
            prerequisites: full_prerequisites(result, code),
            ancestors: result.ancestors(code),
        })
        .collect();

    let document = GraphDocument {
        department: result.department(),
        term: result.term(),
        nodes,
        edges: graph.edges(),
        pruned_edges: result.pruned_edges(),
        cycles: CycleEntry {
            removed: &result.cycle_report().removed,
            retained: &result.cycle_report().retained,
            unresolved: &result.cycle_report().ambiguous,
        },
        warnings: result
            .warnings()
            .iter()
            .map(|w| WarningEntry {
                course: w.course.clone(),
                fragment: w.fragment.clone(),
                emptied_group: w.emptied_group,
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

/// Render a pipeline result as a left-to-right Mermaid flowchart
///
/// Edge labels carry the weights.
#[must_use]
pub fn to_mermaid(result: &DepartmentGraph, catalog: &Department, hide_isolated: bool) -> String {
    let graph = rendered_graph(result.graph(), hide_isolated);
    let mut output = String::from("```mermaid\nflowchart LR\n");

    for code in graph.sorted_courses() {
        let label = node_label(&code, catalog);
        let _ = writeln!(output, "    {}[\"{label}\"]", sanitize_id(&code));
    }

    output.push('\n');

    for edge in graph.edges() {
        let _ = writeln!(
            output,
            "    {} -->|{:.2}| {}",
            sanitize_id(&edge.source),
            edge.weight,
            sanitize_id(&edge.target)
        );
    }

    output.push_str("```\n");
    output
}

fn rendered_graph(graph: &PrereqGraph, hide_isolated: bool) -> PrereqGraph {
    if hide_isolated {
        graph.without_isolated()
    } else {
        graph.clone()
    }
}

/// The course's visible requirement groups, one per line
fn full_prerequisites(result: &DepartmentGraph, code: &CourseCode) -> String {
    result
        .immediate(code)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn node_label(code: &CourseCode, catalog: &Department) -> String {
    let title = catalog
        .get_course(code)
        .map(|c| c.title.as_str())
        .filter(|t| !t.is_empty());

    match title {
        Some(title) if title.chars().count() > 20 => {
            let short: String = title.chars().take(17).collect();
            format!("{code}<br/>{short}...")
        }
        Some(title) => format!("{code}<br/>{title}"),
        None => code.to_string(),
    }
}

/// Mermaid node IDs allow only alphanumerics and underscores
fn sanitize_id(code: &CourseCode) -> String {
    code.to_string()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
