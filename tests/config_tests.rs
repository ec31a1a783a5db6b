//! Integration tests for configuration management

use course_graph::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.catalog_dir.is_empty(),
        "Default catalog_dir should not be empty"
    );
    assert!(
        !config.paths.out_dir.is_empty(),
        "Default out_dir should not be empty"
    );
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
catalog_dir = "./catalogs"
out_dir = "./graphs"

[graph]
level_limit = 200
hide_isolated = true
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.catalog_dir, "./catalogs");
    assert_eq!(config.paths.out_dir, "./graphs");
    assert_eq!(config.graph.level_limit, Some(200));
    assert!(config.graph.hide_isolated);
}

#[test]
fn test_config_from_toml_partial() {
    // Missing sections and fields fall back to serde defaults
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.catalog_dir, "");
    assert_eq!(config.graph.level_limit, None);
    assert!(!config.graph.hide_isolated);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$COURSE_GRAPH/test.log"

[paths]
catalog_dir = "$COURSE_GRAPH/catalogs"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("coursegraph"));
    assert!(!config.logging.file.contains("$COURSE_GRAPH"));
    assert!(config.paths.catalog_dir.ends_with("catalogs"));
    assert!(!config.paths.catalog_dir.contains("$COURSE_GRAPH"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").as_deref(), Some("debug"));

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert_eq!(config.get("verbose").as_deref(), Some("true"));
    assert!(config.logging.verbose);

    config
        .set("out-dir", "/tmp/graphs")
        .expect("Dashed keys are accepted");
    assert_eq!(config.paths.out_dir, "/tmp/graphs");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
    assert!(config.set("verbose", "maybe").is_err());
}

#[test]
fn test_config_level_limit_values() {
    let mut config = Config::from_defaults();

    config.set("level_limit", "200").expect("numeric limit");
    assert_eq!(config.graph.level_limit, Some(200));
    assert_eq!(config.get("level_limit").as_deref(), Some("200"));

    config.set("level_limit", "none").expect("limit removed");
    assert_eq!(config.graph.level_limit, None);
    assert_eq!(config.get("level_limit").as_deref(), Some("none"));

    assert!(config.set("level_limit", "two hundred").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    config.set("hide_isolated", "true").expect("Failed to set flag");
    assert_eq!(config.logging.level, "debug");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("hide_isolated", &defaults)
        .expect("Failed to unset flag");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.graph.hide_isolated, defaults.graph.hide_isolated);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("level_limit", "150").expect("Failed to set limit");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded_config = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded_config.logging.level, "info");
    assert_eq!(loaded_config.graph.level_limit, Some(150));
}

#[test]
fn test_unset_level_limit_is_not_serialized() {
    let mut config = Config::from_defaults();
    config.set("level_limit", "none").expect("limit removed");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    assert!(!toml_str.contains("level_limit"));
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        catalog_dir: Some("./custom_catalogs".to_string()),
        out_dir: Some("./custom_graphs".to_string()),
        level_limit: Some(100),
        hide_isolated: Some(true),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.catalog_dir, "./custom_catalogs");
    assert_eq!(config.paths.out_dir, "./custom_graphs");
    assert_eq!(config.graph.level_limit, Some(100));
    assert!(config.graph.hide_isolated);
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.out_dir, before.paths.out_dir);
    assert_eq!(config.graph.level_limit, before.graph.level_limit);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[graph]"));

    assert!(display_str.contains("level"));
    assert!(display_str.contains("catalog_dir"));
    assert!(display_str.contains("hide_isolated"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
catalog_dir = ""
out_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.paths.catalog_dir, defaults.paths.catalog_dir);
    assert_eq!(config.graph.level_limit, None, "level_limit is never merged");
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"
verbose = false

[paths]
catalog_dir = "/my/catalogs"
out_dir = "/my/graphs"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    assert!(!config.merge_defaults(&defaults));

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.paths.catalog_dir, "/my/catalogs");
}

#[test]
fn test_get_coursegraph_dir() {
    let dir = Config::get_coursegraph_dir();

    assert!(dir.to_string_lossy().contains("coursegraph"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
