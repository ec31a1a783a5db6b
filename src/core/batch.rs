//! Running the pipeline over several department catalogs
//!
//! Departments share no state, so each catalog is loaded and run on its own
//! worker and results come back in input order.

use crate::core::catalog::{load_catalog, load_offerings};
use crate::core::error::Result;
use crate::core::models::Department;
use crate::core::pipeline::{run_pipeline, DepartmentGraph, GraphOptions};
use rayon::prelude::*;
use std::path::PathBuf;

/// One catalog to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogJob {
    /// Catalog TOML file
    pub catalog: PathBuf,
    /// Offering list replacing the catalog's own, if any
    pub offered: Option<PathBuf>,
}

/// A department catalog together with its finalized graph
#[derive(Debug, Clone)]
pub struct CatalogRun {
    /// The loaded catalog
    pub department: Department,
    /// Pipeline output
    pub graph: DepartmentGraph,
}

/// Load one catalog (and its offering list) and run the pipeline on it
///
/// # Errors
/// Returns an error if a file cannot be loaded or the catalog has no course
/// for its department.
pub fn run_catalog(job: &CatalogJob, level_limit: Option<u32>) -> Result<CatalogRun> {
    let department = load_catalog(&job.catalog)?;
    let offered = job
        .offered
        .as_ref()
        .map(|path| load_offerings(path, &department.name))
        .transpose()?;

    let options = GraphOptions {
        level_limit,
        offered,
    };
    let graph = run_pipeline(&department, &options)?;
    Ok(CatalogRun { department, graph })
}

/// Run every job, on up to `jobs` threads
///
/// Each result is paired with its catalog path; a failing catalog does not
/// affect the others.
#[must_use]
pub fn run_catalogs(
    catalogs: Vec<CatalogJob>,
    level_limit: Option<u32>,
    jobs: Option<usize>,
) -> Vec<(PathBuf, Result<CatalogRun>)> {
    run_in_parallel(catalogs, jobs, |job| {
        let outcome = run_catalog(&job, level_limit);
        (job.catalog, outcome)
    })
}

/// Map `func` over `items`, in a dedicated pool when more than one job is requested
pub fn run_in_parallel<T, R, F>(items: Vec<T>, jobs: Option<usize>, func: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Send + Sync,
{
    match jobs {
        Some(count) if count > 1 => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(count).build();
            if let Ok(pool) = pool {
                return pool.install(|| items.into_par_iter().map(func).collect());
            }
            items.into_iter().map(func).collect()
        }
        _ => items.into_iter().map(func).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
department = "ECE"

[[courses]]
listing = "ECE 15. Engineering Computation. (4)"

[[courses]]
listing = "ECE 25. Introduction to Digital Design. (4)"
prerequisites = "ECE 15"

[[courses]]
listing = "ECE 250. Random Processes. (4)"
prerequisites = "ECE 25"
"#;

    #[test]
    fn test_run_in_parallel_keeps_order() {
        let items: Vec<u32> = (0..32).collect();
        let doubled = run_in_parallel(items, Some(4), |n| n * 2);
        assert_eq!(doubled, (0..32).map(|n| n * 2).collect::<Vec<_>>());
        assert_eq!(run_in_parallel(vec![1, 2], None, |n| n + 1), vec![2, 3]);
    }

    #[test]
    fn test_run_catalog_with_offerings() {
        let dir = TempDir::new().expect("temp dir");
        let catalog = dir.path().join("ECE.toml");
        let offered = dir.path().join("ECE.WI20.txt");
        fs::write(&catalog, CATALOG).expect("write catalog");
        fs::write(&offered, "15\n25\n").expect("write offerings");

        let run = run_catalog(
            &CatalogJob {
                catalog,
                offered: Some(offered),
            },
            None,
        )
        .expect("catalog runs");
        assert_eq!(run.department.name, "ECE");
        assert_eq!(run.graph.nodes().len(), 2);
    }

    #[test]
    fn test_run_catalogs_reports_each() {
        let dir = TempDir::new().expect("temp dir");
        let good = dir.path().join("ECE.toml");
        fs::write(&good, CATALOG).expect("write catalog");
        let missing = dir.path().join("MAE.toml");

        let results = run_catalogs(
            vec![
                CatalogJob {
                    catalog: good.clone(),
                    offered: None,
                },
                CatalogJob {
                    catalog: missing.clone(),
                    offered: None,
                },
            ],
            Some(200),
            Some(2),
        );

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, good);
        let run = results[0].1.as_ref().expect("first catalog runs");
        assert_eq!(run.graph.nodes().len(), 2);
        assert_eq!(results[1].0, missing);
        assert!(results[1].1.is_err());
    }
}
