//! Graph command handler

use super::resolve_catalog;
use course_graph::config::Config;
use course_graph::core::batch::{run_catalogs, CatalogJob, CatalogRun};
use course_graph::core::export::{export_graph, ExportFormat};
use course_graph::{error, info, verbose};
use std::path::{Path, PathBuf};

/// Build, finalize and export the graph of every catalog.
///
/// # Arguments
/// * `catalogs` - Catalog files or department names
/// * `output_files` - Optional output paths; must match catalogs 1:1 when provided
/// * `offered_files` - Optional offering lists; must match catalogs 1:1 when provided
/// * `format` - Export format
/// * `jobs` - Number of departments processed at once
/// * `config` - Configuration with output directory and graph settings
pub fn run(
    catalogs: &[String],
    output_files: &[PathBuf],
    offered_files: &[PathBuf],
    format: ExportFormat,
    jobs: Option<usize>,
    config: &Config,
) {
    if catalogs.is_empty() {
        eprintln!("✗ No catalogs provided.");
        return;
    }

    for (flag, given) in [("-o/--output", output_files), ("--offered", offered_files)] {
        if !given.is_empty() && given.len() != catalogs.len() {
            eprintln!(
                "✗ When using {flag}, provide one path per catalog ({} catalogs, {} paths).",
                catalogs.len(),
                given.len()
            );
            return;
        }
    }

    let catalog_jobs = catalogs
        .iter()
        .enumerate()
        .map(|(idx, arg)| CatalogJob {
            catalog: resolve_catalog(arg, config),
            offered: offered_files.get(idx).cloned(),
        })
        .collect();

    let results = run_catalogs(catalog_jobs, config.graph.level_limit, jobs);

    for (idx, (catalog, outcome)) in results.into_iter().enumerate() {
        let written = outcome
            .map_err(|e| format!("✗ Failed to build graph for {}: {e}", catalog.display()))
            .and_then(|run| {
                write_export(&run, output_files.get(idx).map(PathBuf::as_path), format, config)
            });

        if let Err(err) = written {
            error!("Graph failed for {}", catalog.display());
            eprintln!("{err}");
        }
    }
}

fn write_export(
    run: &CatalogRun,
    output_file: Option<&Path>,
    format: ExportFormat,
    config: &Config,
) -> Result<(), String> {
    let result = &run.graph;
    let rendered = export_graph(result, &run.department, format, config.graph.hide_isolated)
        .map_err(|e| format!("✗ Failed to render {}: {e}", result.department()))?;

    let path = if let Some(output) = output_file {
        output.to_path_buf()
    } else {
        let out_dir = PathBuf::from(&config.paths.out_dir);
        std::fs::create_dir_all(&out_dir).map_err(|e| {
            format!(
                "✗ Failed to create output directory {}: {e}",
                out_dir.display()
            )
        })?;
        out_dir.join(format!("{}.{}", result.department(), format.extension()))
    };

    std::fs::write(&path, rendered)
        .map_err(|e| format!("✗ Failed to write {}: {e}", path.display()))?;

    println!(
        "✓ {}: {} courses, {} edges -> {}",
        result.department(),
        result.graph().course_count(),
        result.graph().edge_count(),
        path.display()
    );
    info!("Exported {} graph to {}", result.department(), path.display());

    for warning in result.warnings() {
        verbose!(
            "  ! {}: dropped '{}'{}",
            warning.course,
            warning.fragment,
            if warning.emptied_group {
                " (group lost)"
            } else {
                ""
            }
        );
    }
    for edge in result.pruned_edges() {
        verbose!("  - pruned {} -> {}", edge.source, edge.target);
    }
    let report = result.cycle_report();
    for edge in &report.removed {
        verbose!("  - cycle edge {} -> {} removed", edge.source, edge.target);
    }
    for edge in &report.retained {
        verbose!("  = cycle edge {} -> {} kept (OR-alternative)", edge.source, edge.target);
    }
    for cycle in report.unresolved() {
        verbose!("  ? {cycle}");
    }

    Ok(())
}
