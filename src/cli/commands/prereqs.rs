//! Prereqs command handler

use super::resolve_catalog;
use course_graph::config::Config;
use course_graph::core::batch::{run_catalog, CatalogJob};
use course_graph::core::models::CourseCode;
use course_graph::error;
use std::path::Path;

/// Print the closure and the visible requirement groups of one course.
///
/// # Arguments
/// * `catalog` - Catalog file or department name
/// * `course` - Course code as typed by the user
/// * `offered` - Optional offering list replacing the catalog's own
/// * `config` - Configuration with catalog directory and level limit
pub fn run(catalog: &str, course: &str, offered: Option<&Path>, config: &Config) {
    if let Err(err) = show(catalog, course, offered, config) {
        error!("Prereqs failed for {course}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn show(catalog: &str, course: &str, offered: Option<&Path>, config: &Config) -> Result<(), String> {
    let code = CourseCode::parse(course).map_err(|e| format!("✗ {e}"))?;

    let job = CatalogJob {
        catalog: resolve_catalog(catalog, config),
        offered: offered.map(Path::to_path_buf),
    };
    let run = run_catalog(&job, config.graph.level_limit)
        .map_err(|e| format!("✗ Failed to build graph for {}: {e}", job.catalog.display()))?;
    let result = &run.graph;

    let ancestors = result.try_ancestors(&code).map_err(|e| format!("✗ {e}"))?;
    let title = run
        .department
        .get_course(&code)
        .map(|c| c.title.as_str())
        .unwrap_or_default();

    println!("\n=== {code} {title} ===\n");

    println!("Prerequisites:");
    let groups = result.immediate(&code);
    if groups.is_empty() {
        println!("  (none)");
    }
    for group in groups {
        println!("  - {group}");
    }

    println!("\nFull prerequisites ({}):", ancestors.len());
    if ancestors.is_empty() {
        println!("  (none)");
    }
    for ancestor in &ancestors {
        println!("  {ancestor}");
    }

    Ok(())
}
