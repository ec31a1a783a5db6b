//! End-to-end tests: sample catalog through the pipeline, queries, export and stats

use course_graph::core::batch::{run_catalog, run_catalogs, CatalogJob, CatalogRun};
use course_graph::core::export::{export_graph, ExportFormat};
use course_graph::core::metrics::compute_stats;
use course_graph::core::models::CourseCode;
use std::path::PathBuf;

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join("catalogs")
        .join(name)
}

fn code(raw: &str) -> CourseCode {
    raw.parse().expect("valid course code")
}

fn codes(raw: &[&str]) -> Vec<CourseCode> {
    raw.iter().map(|c| code(c)).collect()
}

fn sample_run(offered: bool) -> CatalogRun {
    let job = CatalogJob {
        catalog: sample_path("ECE.toml"),
        offered: offered.then(|| sample_path("ECE.WI20.txt")),
    };
    run_catalog(&job, None).expect("sample catalog runs")
}

#[test]
fn sample_graph_shape() {
    let run = sample_run(false);
    let result = &run.graph;

    assert_eq!(result.department(), "ECE");
    assert_eq!(result.nodes().len(), 13);
    assert_eq!(result.edges().len(), 9);

    let graph = result.graph();
    assert!(graph.is_isolated(&code("ECE 5")));
    assert_eq!(graph.weight(&code("ECE 15"), &code("ECE 25")), Some(1.0));
    assert_eq!(graph.weight(&code("ECE 30"), &code("ECE 111")), Some(0.5));
}

#[test]
fn sample_shortcuts_are_pruned() {
    let run = sample_run(false);
    let pruned: Vec<(String, String)> = run
        .graph
        .pruned_edges()
        .iter()
        .map(|e| (e.source.to_string(), e.target.to_string()))
        .collect();

    for (source, target) in [
        ("ECE 15", "ECE 30"),
        ("ECE 35", "ECE 65"),
        ("ECE 45", "ECE 100"),
        ("ECE 25", "ECE 111"),
    ] {
        assert!(
            pruned.contains(&(source.to_string(), target.to_string())),
            "{source} -> {target} should be pruned"
        );
    }
    assert_eq!(pruned.len(), 4);
}

#[test]
fn sample_cycle_is_broken() {
    let run = sample_run(false);
    let result = &run.graph;
    let graph = result.graph();

    assert!(!graph.has_edge(&code("ECE 171C"), &code("ECE 171A")));
    assert!(graph.has_edge(&code("ECE 171A"), &code("ECE 171B")));
    assert!(graph.has_edge(&code("ECE 171B"), &code("ECE 171C")));
    assert!(result.cycle_report().ambiguous.is_empty());
    assert_eq!(result.cycle_report().removed.len(), 1);
    assert_eq!(
        result.ancestors(&code("ECE 171C")),
        codes(&["ECE 171A", "ECE 171B"])
    );
}

#[test]
fn sample_closure_queries() {
    let run = sample_run(false);
    let result = &run.graph;

    assert_eq!(
        result.ancestors(&code("ECE 100")),
        codes(&["ECE 35", "ECE 45", "ECE 65"])
    );
    assert_eq!(
        result.ancestors(&code("ECE 111")),
        codes(&["ECE 15", "ECE 25", "ECE 30"])
    );
    assert!(result.ancestors(&code("ECE 35")).is_empty());

    let groups = result.immediate(&code("ECE 111"));
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].to_string(), "ECE 25 or ECE 30");

    // groups made only of other departments' courses are invisible
    assert!(result.immediate(&code("ECE 35")).is_empty());
    assert!(result.try_ancestors(&code("ECE 999")).is_err());
}

#[test]
fn sample_reports_dropped_fragment() {
    let run = sample_run(false);
    let warnings = run.graph.warnings();

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].course, code("ECE 100"));
    assert_eq!(warnings[0].fragment, "consent of instructor");
    assert!(warnings[0].emptied_group);
}

#[test]
fn sample_with_offerings() {
    let run = sample_run(true);
    let result = &run.graph;

    assert_eq!(
        result.nodes(),
        codes(&["ECE 15", "ECE 25", "ECE 30", "ECE 111"])
    );
    assert_eq!(result.edges().len(), 3);
    assert!(!result.graph().has_edge(&code("ECE 25"), &code("ECE 111")));
}

#[test]
fn sample_with_level_limit() {
    let job = CatalogJob {
        catalog: sample_path("ECE.toml"),
        offered: None,
    };
    let run = run_catalog(&job, Some(100)).expect("sample catalog runs");
    let nodes = run.graph.nodes();

    assert_eq!(nodes.len(), 7);
    assert!(nodes.iter().all(|c| c.number() < 100));
}

#[test]
fn sample_exports() {
    let run = sample_run(false);

    let json = export_graph(&run.graph, &run.department, ExportFormat::Json, true)
        .expect("json export");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["department"], "ECE");
    // ECE 5 has no edge and is hidden
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(12));
    assert_eq!(value["cycles"]["removed"].as_array().map(Vec::len), Some(1));

    let mermaid = export_graph(&run.graph, &run.department, ExportFormat::Mermaid, false)
        .expect("mermaid export");
    assert!(mermaid.contains("ECE_171A -->|1.00| ECE_171B"));
    assert!(mermaid.contains("ECE_5[\"ECE 5<br/>"));
    assert!(!mermaid.contains("ECE_171C -->|1.00| ECE_171A"));
}

#[test]
fn sample_stats() {
    let run = sample_run(false);
    let stats = compute_stats(&run.graph, None);

    assert_eq!(stats.courses, 13);
    assert_eq!(stats.edges, 9);

    let avg = stats.avg_prerequisite_groups.expect("courses have requirements");
    assert!((avg - 16.0 / 11.0).abs() < 1e-9);
    assert!((stats.flexibility - 4.0 / 13.0).abs() < 1e-9);

    let ece45 = stats.per_course[&code("ECE 45")];
    assert_eq!(ece45.out_degree, 2);
    assert_eq!(ece45.ancestors, 1);
    assert_eq!(ece45.blocking, 3);
}

#[test]
fn batch_run_matches_single_run() {
    let jobs = vec![
        CatalogJob {
            catalog: sample_path("ECE.toml"),
            offered: None,
        },
        CatalogJob {
            catalog: sample_path("ECE.toml"),
            offered: Some(sample_path("ECE.WI20.txt")),
        },
    ];

    let results = run_catalogs(jobs, None, Some(2));
    assert_eq!(results.len(), 2);

    let full = results[0].1.as_ref().expect("full catalog runs");
    let term = results[1].1.as_ref().expect("term catalog runs");
    assert_eq!(full.graph.edges(), sample_run(false).graph.edges());
    assert_eq!(term.graph.nodes().len(), 4);
}
