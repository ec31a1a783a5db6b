//! Integration tests for catalog and offering list loading

use course_graph::core::catalog::{load_catalog, load_offerings, parse_catalog};
use course_graph::core::error::PrereqError;
use course_graph::core::models::CourseCode;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join("catalogs")
        .join(name)
}

fn code(raw: &str) -> CourseCode {
    raw.parse().expect("valid course code")
}

#[test]
fn sample_catalog_loads() {
    let dept = load_catalog(sample_path("ECE.toml")).expect("sample catalog loads");

    assert_eq!(dept.name, "ECE");
    assert_eq!(dept.term.as_deref(), Some("WI20"));
    // MATH 18 is listed on the page but belongs to another department
    assert_eq!(dept.course_count(), 13);
    assert!(dept.get_course(&code("MATH 18")).is_none());

    let ece35 = dept.get_course(&code("ECE 35")).expect("ECE 35 listed");
    assert_eq!(ece35.title, "Introduction to Analog Design");
    assert!(ece35
        .raw_prerequisites
        .as_deref()
        .is_some_and(|text| text.contains("<span")));
}

#[test]
fn sample_offerings_load() {
    let offered =
        load_offerings(sample_path("ECE.WI20.txt"), "ECE").expect("sample offerings load");
    let rendered: Vec<String> = offered.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["ECE 15", "ECE 25", "ECE 30", "ECE 111"]);
}

#[test]
fn missing_catalog_is_io_error() {
    let dir = TempDir::new().expect("temp dir");
    let result = load_catalog(dir.path().join("NOPE.toml"));
    assert!(matches!(result, Err(PrereqError::Io(_))));
}

#[test]
fn catalog_written_to_disk_round_trips_codes() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("MAE.toml");
    std::fs::write(
        &path,
        r#"
department = "MAE"

[[courses]]
listing = "MAE 02. Introduction to Aerospace Engineering Design. (4)"

[[courses]]
listing = "MAE 143A. Signals and Systems. (4)"
prerequisites = "MAE 2"
"#,
    )
    .expect("write catalog");

    let dept = load_catalog(&path).expect("catalog loads");
    assert!(dept.get_course(&code("MAE 2")).is_some());
    assert_eq!(dept.course_count(), 2);
}

#[test]
fn catalog_without_department_field_is_rejected() {
    let result = parse_catalog("[[courses]]\nlisting = \"ECE 15. Engineering Computation. (4)\"\n");
    assert!(matches!(result, Err(PrereqError::Toml(_))));
}
