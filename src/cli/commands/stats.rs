//! Stats command handler

use super::resolve_catalog;
use course_graph::config::Config;
use course_graph::core::batch::{run_catalogs, CatalogJob};
use course_graph::core::metrics::{compute_stats, DepartmentStats};
use course_graph::error;

/// Print statistics for every catalog.
///
/// Per-course figures are only printed with `verbose`.
pub fn run(catalogs: &[String], jobs: Option<usize>, config: &Config, verbose: bool) {
    let catalog_jobs = catalogs
        .iter()
        .map(|arg| CatalogJob {
            catalog: resolve_catalog(arg, config),
            offered: None,
        })
        .collect();

    let level_limit = config.graph.level_limit;
    for (catalog, outcome) in run_catalogs(catalog_jobs, level_limit, jobs) {
        match outcome {
            Ok(run) => print_stats(&compute_stats(&run.graph, level_limit), verbose),
            Err(e) => {
                error!("Stats failed for {}", catalog.display());
                eprintln!("✗ Failed to build graph for {}: {e}", catalog.display());
            }
        }
    }
}

fn print_stats(stats: &DepartmentStats, verbose: bool) {
    println!("\n=== {} ===", stats.department);
    println!("Courses: {}", stats.courses);
    println!("Edges: {}", stats.edges);
    match stats.avg_prerequisite_groups {
        Some(avg) => println!("Average prerequisite groups: {avg:.2}"),
        None => println!("Average prerequisite groups: n/a"),
    }
    println!("Flexibility: {:.3}", stats.flexibility);

    if !verbose {
        return;
    }

    println!("\n{:<12} {:>10} {:>10} {:>10}", "Course", "Out-degree", "Ancestors", "Blocking");
    for (course, figures) in &stats.per_course {
        println!(
            "{:<12} {:>10} {:>10} {:>10}",
            course.to_string(),
            figures.out_degree,
            figures.ancestors,
            figures.blocking
        );
    }
}
