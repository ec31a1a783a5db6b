//! Command-line interface entry point for `CourseGraph`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use course_graph::config::Config;
use course_graph::info;
use course_graph::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Graph {
            catalogs,
            output,
            format,
            offered,
            jobs,
            ..
        } => {
            commands::graph::run(&catalogs, &output, &offered, format.into(), jobs, &config);
        }
        Command::Prereqs {
            catalog,
            course,
            offered,
            ..
        } => {
            commands::prereqs::run(&catalog, &course, offered.as_deref(), &config);
        }
        Command::Stats { catalogs, jobs, .. } => {
            commands::stats::run(&catalogs, jobs, &config, verbose);
        }
    }
}
