//! Catalog loading: the boundary with the catalog/schedule fetcher
//!
//! The fetcher hands over one TOML document per department:
//!
//! ```toml
//! department = "ECE"
//! term = "WI20"
//! offered = ["ECE 15", "ECE 25"]
//!
//! [[courses]]
//! listing = "ECE 25. Introduction to Digital Design. (4)"
//! description = "..."
//! prerequisites = "ECE 15 or CSE 8B"
//! ```
//!
//! `offered` and `prerequisites` may be omitted. Retrieval, caching and
//! retries stay on the fetcher's side.

use crate::core::error::{PrereqError, Result};
use crate::core::models::{Course, CourseCode, Department};
use crate::core::parser::parse_listing;
use crate::{info, warn};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    department: String,
    #[serde(default)]
    term: Option<String>,
    #[serde(default)]
    offered: Option<Vec<String>>,
    #[serde(default)]
    courses: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    listing: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    prerequisites: Option<String>,
}

/// Load a department catalog from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if no listing
/// belongs to the catalog's department.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Department> {
    let content = fs::read_to_string(path.as_ref())?;
    let department = parse_catalog(&content)?;
    info!(
        "Catalog loaded: {} ({} courses)",
        path.as_ref().display(),
        department.course_count()
    );
    Ok(department)
}

/// Parse a department catalog from TOML text
///
/// Listings whose key has no course code, listings of another department
/// and duplicate listings are skipped with a warning.
///
/// # Errors
/// Returns an error if the TOML does not match the catalog schema, or if no
/// listing belongs to the catalog's department.
pub fn parse_catalog(toml_str: &str) -> Result<Department> {
    let file: CatalogFile = toml::from_str(toml_str)?;
    let mut department = Department::new(file.department.trim());
    department.term = file.term;

    for entry in file.courses {
        let listing = match parse_listing(&entry.listing) {
            Ok(listing) => listing,
            Err(err) => {
                warn!("Skipping catalog entry: {err}");
                continue;
            }
        };

        if !listing.code.in_department(&department.name) {
            warn!(
                "Skipping {}: not part of department {}",
                listing.code, department.name
            );
            continue;
        }

        let code = listing.code.clone();
        let course = Course {
            code: listing.code,
            title: listing.title,
            units: listing.units,
            description: entry.description.trim().to_string(),
            raw_prerequisites: entry.prerequisites,
        };
        if !department.add_course(course) {
            warn!("Skipping duplicate listing for {code}");
        }
    }

    if department.course_count() == 0 {
        return Err(PrereqError::EmptyDepartment(department.name));
    }

    if let Some(offered) = file.offered {
        let set = parse_offering_lines(offered.iter().map(String::as_str), &department.name);
        department.set_offered(set);
    }

    Ok(department)
}

/// Load a term offering list, one course per line
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn load_offerings<P: AsRef<Path>>(path: P, dept: &str) -> Result<BTreeSet<CourseCode>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_offerings(&content, dept))
}

/// Parse a term offering list
///
/// Schedule pages list bare numbers (`"121A"`), so a line without a
/// department is read as belonging to `dept`. Blank lines are ignored and
/// unreadable lines are skipped with a warning.
#[must_use]
pub fn parse_offerings(text: &str, dept: &str) -> BTreeSet<CourseCode> {
    parse_offering_lines(text.lines(), dept)
}

fn parse_offering_lines<'a, I>(lines: I, dept: &str) -> BTreeSet<CourseCode>
where
    I: Iterator<Item = &'a str>,
{
    let mut offered = BTreeSet::new();

    for line in lines.map(str::trim).filter(|l| !l.is_empty()) {
        let qualified = if line.starts_with(|c: char| c.is_ascii_digit()) {
            format!("{dept} {line}")
        } else {
            line.to_string()
        };

        match CourseCode::parse(&qualified) {
            Ok(code) => {
                offered.insert(code);
            }
            Err(err) => warn!("Skipping offering entry: {err}"),
        }
    }

    offered
}
