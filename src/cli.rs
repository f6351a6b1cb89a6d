//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::config::DurationUnit;
use clap::Parser;
use std::path::PathBuf;

/// benchcmp - benchmark result aggregator
///
/// Reads load-test exports, resource-monitoring exports and artifact sizes
/// for each subject and writes a single comparison report.
///
/// Examples:
///   benchcmp
///   benchcmp --results-dir ./results --subjects rust_axum,go_fasthttp
///   benchcmp --duration-unit milliseconds --format markdown
///   benchcmp --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory holding the per-subject result files
    ///
    /// Defaults to the value from .benchcmp.toml, else `results` next to the
    /// directory holding the executable.
    #[arg(short = 'd', long, value_name = "DIR", env = "BENCHCMP_RESULTS_DIR")]
    pub results_dir: Option<PathBuf>,

    /// Subjects to compare, in report order (comma-separated)
    ///
    /// Example: --subjects rust_axum,java_undertow
    #[arg(short, long, value_name = "NAMES", value_delimiter = ',')]
    pub subjects: Option<Vec<String>>,

    /// Output file path for the report
    ///
    /// Defaults to comparison.json (or comparison.md) inside the results directory
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (json, markdown)
    #[arg(long, default_value = "json", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Unit of the load-test duration column
    #[arg(long, value_name = "UNIT")]
    pub duration_unit: Option<DurationUnit>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .benchcmp.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (no per-subject summaries)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .benchcmp.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON format (default)
    #[default]
    Json,
    /// Markdown format
    Markdown,
}

impl OutputFormat {
    /// File name used when no explicit output path is given.
    pub fn default_file_name(self) -> &'static str {
        match self {
            OutputFormat::Json => "comparison.json",
            OutputFormat::Markdown => "comparison.md",
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref subjects) = self.subjects {
            if subjects.iter().all(|s| s.trim().is_empty()) {
                return Err("--subjects must name at least one subject".to_string());
            }
        }

        if let Some(ref dir) = self.results_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(format!(
                    "Results path is not a directory: {}",
                    dir.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
