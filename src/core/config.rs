//! Configuration module for `CourseGraph`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

const DIR_VARIABLE: &str = "$COURSE_GRAPH";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory searched for `<DEPT>.toml` when a catalog is named by department
    #[serde(default)]
    pub catalog_dir: String,
    /// Default directory for graph exports
    #[serde(default)]
    pub out_dir: String,
}

/// Graph building configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Exclusive upper bound on course numbers; absent means no limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_limit: Option<u32>,
    /// Drop courses without any edge from exports
    #[serde(default)]
    pub hide_isolated: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Graph settings
    #[serde(default)]
    pub graph: GraphConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override catalog directory
    pub catalog_dir: Option<String>,
    /// Override export directory
    pub out_dir: Option<String>,
    /// Override level limit
    pub level_limit: Option<u32>,
    /// Override isolated-node hiding
    pub hide_isolated: Option<bool>,
}

impl Config {
    /// Get the `$COURSE_GRAPH` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/coursegraph`
    /// - macOS: `~/Library/Application Support/coursegraph`
    /// - Windows: `%APPDATA%\coursegraph`
    #[must_use]
    pub fn get_coursegraph_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coursegraph")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and set in `defaults` are
    /// filled. `graph.level_limit` is never merged, since "no limit" is a
    /// legitimate setting.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.catalog_dir.is_empty() && !defaults.paths.catalog_dir.is_empty() {
            self.paths
                .catalog_dir
                .clone_from(&defaults.paths.catalog_dir);
            changed = true;
        }
        if self.paths.out_dir.is_empty() && !defaults.paths.out_dir.is_empty() {
            self.paths.out_dir.clone_from(&defaults.paths.out_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the configuration file
    /// is not touched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(catalog_dir) = &overrides.catalog_dir {
            self.paths.catalog_dir.clone_from(catalog_dir);
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }

        if let Some(limit) = overrides.level_limit {
            self.graph.level_limit = Some(limit);
        }
        if let Some(hide) = overrides.hide_isolated {
            self.graph.hide_isolated = hide;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, in
    /// the directory returned by [`get_coursegraph_dir`].
    ///
    /// [`get_coursegraph_dir`]: Self::get_coursegraph_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_coursegraph_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$COURSE_GRAPH` to the configuration directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_coursegraph_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults and `$COURSE_GRAPH` is expanded
    /// in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.catalog_dir = Self::expand_variables(&config.paths.catalog_dir);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file is merged with defaults and saved back when new
    /// fields were added. On first run the defaults are written out. Any
    /// read or parse error falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `catalog_dir`, `out_dir`,
    /// `level_limit` (`"none"` when unset), `hide_isolated`. Dashed spellings
    /// are accepted too.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "catalog_dir" | "catalog-dir" => Some(self.paths.catalog_dir.clone()),
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            "level_limit" | "level-limit" => Some(
                self.graph
                    .level_limit
                    .map_or_else(|| "none".to_string(), |limit| limit.to_string()),
            ),
            "hide_isolated" | "hide-isolated" => Some(self.graph.hide_isolated.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// `level_limit` takes a number, or `none` to remove the limit. Call
    /// [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed for that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "catalog_dir" | "catalog-dir" => self.paths.catalog_dir = value.to_string(),
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            "level_limit" | "level-limit" => {
                self.graph.level_limit = if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(value.parse::<u32>().map_err(|_| {
                        format!("Invalid number for 'level_limit': '{value}'")
                    })?)
                };
            }
            "hide_isolated" | "hide-isolated" => {
                self.graph.hide_isolated = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'hide_isolated': '{value}'"))?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "catalog_dir" | "catalog-dir" => self
                .paths
                .catalog_dir
                .clone_from(&defaults.paths.catalog_dir),
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            "level_limit" | "level-limit" => self.graph.level_limit = defaults.graph.level_limit,
            "hide_isolated" | "hide-isolated" => {
                self.graph.hide_isolated = defaults.graph.hide_isolated;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds when no file exists.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  catalog_dir = \"{}\"", self.paths.catalog_dir)?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        writeln!(f, "\n[graph]")?;
        match self.graph.level_limit {
            Some(limit) => writeln!(f, "  level_limit = {limit}")?,
            None => writeln!(f, "  # level_limit not set")?,
        }
        writeln!(f, "  hide_isolated = {}", self.graph.hide_isolated)?;

        Ok(())
    }
}
