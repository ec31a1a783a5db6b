//! CLI argument definitions for `CourseGraph`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use course_graph::config::ConfigOverrides;
use course_graph::core::export::ExportFormat;
use course_graph::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to
/// `course_graph::logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Export format argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum FormatArg {
    /// JSON document with nodes, weighted edges, closures and diagnostics
    #[default]
    Json,
    /// Mermaid flowchart in a Markdown code fence
    Mermaid,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Mermaid => Self::Mermaid,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `catalog_dir`, `level_limit`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Build and export prerequisite graphs.
    ///
    /// Each CATALOG is a catalog TOML file, or a department name looked up as
    /// `<catalog_dir>/<DEPT>.toml`. Departments are processed in parallel.
    Graph {
        /// Department catalogs (supports multiple)
        #[arg(value_name = "CATALOGS", num_args = 1..)]
        catalogs: Vec<String>,

        /// Output file paths (optional; defaults to config `out_dir` when omitted)
        ///
        /// When provided, must match the number of catalogs 1:1.
        #[arg(short, long, value_name = "FILES", num_args = 1..)]
        output: Vec<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,

        /// Term offering lists replacing the catalogs' own (one per catalog)
        #[arg(long, value_name = "FILES", num_args = 1..)]
        offered: Vec<PathBuf>,

        /// Exclude courses numbered at or above N (overrides config)
        #[arg(long, value_name = "N")]
        level_limit: Option<u32>,

        /// Drop courses without any edge from the export (overrides config)
        #[arg(long)]
        hide_isolated: bool,

        /// Number of departments to process at once
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,
    },
    /// Show the prerequisites of one course.
    ///
    /// Prints the full transitive prerequisite set and the requirement
    /// groups that are visible in the department graph.
    Prereqs {
        /// Department catalog (file or department name)
        #[arg(value_name = "CATALOG")]
        catalog: String,

        /// Course code (e.g., "ECE 121A")
        #[arg(value_name = "COURSE")]
        course: String,

        /// Term offering list replacing the catalog's own
        #[arg(long, value_name = "FILE")]
        offered: Option<PathBuf>,

        /// Exclude courses numbered at or above N (overrides config)
        #[arg(long, value_name = "N")]
        level_limit: Option<u32>,
    },
    /// Print department statistics.
    Stats {
        /// Department catalogs (supports multiple)
        #[arg(value_name = "CATALOGS", num_args = 1..)]
        catalogs: Vec<String>,

        /// Exclude courses numbered at or above N (overrides config)
        #[arg(long, value_name = "N")]
        level_limit: Option<u32>,

        /// Number of departments to process at once
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "coursegraph",
    about = "Course prerequisite graph builder",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config catalog directory
    #[arg(long = "config-catalog-dir", value_name = "DIR")]
    pub config_catalog_dir: Option<PathBuf>,

    /// Override config catalog directory (short form)
    #[arg(long = "catalog-dir", value_name = "DIR")]
    pub catalog_dir: Option<PathBuf>,

    /// Override config output directory
    #[arg(long = "config-out-dir", value_name = "DIR")]
    pub config_out_dir: Option<PathBuf>,

    /// Override config output directory (short form)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--out-dir`) take precedence over long-form
    /// flags (e.g., `--config-out-dir`) when both are provided. Subcommand
    /// graph flags (`--level-limit`, `--hide-isolated`) override too.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();

        let (level_limit, hide_isolated) = match &self.command {
            Command::Graph {
                level_limit,
                hide_isolated,
                ..
            } => (*level_limit, hide_isolated.then_some(true)),
            Command::Prereqs { level_limit, .. } | Command::Stats { level_limit, .. } => {
                (*level_limit, None)
            }
            Command::Config { .. } => (None, None),
        };

        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            catalog_dir: self
                .catalog_dir
                .as_ref()
                .or(self.config_catalog_dir.as_ref())
                .map(path_string),
            out_dir: self
                .out_dir
                .as_ref()
                .or(self.config_out_dir.as_ref())
                .map(path_string),
            level_limit,
            hide_isolated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_catalog_dir: None,
            catalog_dir: None,
            config_out_dir: None,
            out_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_format_conversion() {
        assert_eq!(ExportFormat::from(FormatArg::Json), ExportFormat::Json);
        assert_eq!(ExportFormat::from(FormatArg::Mermaid), ExportFormat::Mermaid);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = cli(Command::Config { subcommand: None }).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.catalog_dir.is_none());
        assert!(overrides.out_dir.is_none());
        assert!(overrides.level_limit.is_none());
        assert!(overrides.hide_isolated.is_none());
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let mut args = cli(Command::Config { subcommand: None });
        args.config_out_dir = Some(PathBuf::from("/long/out"));
        args.out_dir = Some(PathBuf::from("/short/out"));
        args.config_catalog_dir = Some(PathBuf::from("/long/catalogs"));

        let overrides = args.to_config_overrides();
        assert_eq!(overrides.out_dir, Some("/short/out".to_string()));
        assert_eq!(overrides.catalog_dir, Some("/long/catalogs".to_string()));
    }

    #[test]
    fn test_graph_flags_become_overrides() {
        let args = cli(Command::Graph {
            catalogs: vec!["ECE".to_string()],
            output: Vec::new(),
            format: FormatArg::Mermaid,
            offered: Vec::new(),
            level_limit: Some(200),
            hide_isolated: true,
            jobs: None,
        });
        let overrides = args.to_config_overrides();
        assert_eq!(overrides.level_limit, Some(200));
        assert_eq!(overrides.hide_isolated, Some(true));

        let args = cli(Command::Stats {
            catalogs: vec!["ECE".to_string()],
            level_limit: None,
            jobs: Some(2),
        });
        assert!(args.to_config_overrides().level_limit.is_none());
    }

    #[test]
    fn test_parse_graph_command() {
        let args = Cli::try_parse_from([
            "coursegraph",
            "graph",
            "ECE",
            "MAE",
            "--format",
            "mermaid",
            "--level-limit",
            "200",
            "-j",
            "2",
        ])
        .expect("valid arguments");
        match args.command {
            Command::Graph {
                catalogs,
                format,
                level_limit,
                jobs,
                ..
            } => {
                assert_eq!(catalogs, ["ECE", "MAE"]);
                assert_eq!(format, FormatArg::Mermaid);
                assert_eq!(level_limit, Some(200));
                assert_eq!(jobs, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
