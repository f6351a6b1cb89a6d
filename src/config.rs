//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.benchcmp.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".benchcmp.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Load-test export settings.
    #[serde(default)]
    pub k6: K6Config,

    /// Resource monitoring export settings.
    #[serde(default)]
    pub resources: ResourcesConfig,

    /// Artifact size settings.
    #[serde(default)]
    pub artifact: ArtifactConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding the per-subject input files. Unset means the
    /// `results` directory next to the executable's parent directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_dir: Option<PathBuf>,

    /// Output file. Defaults to a file inside `results_dir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Subjects to compare, in report order.
    #[serde(default = "default_subjects")]
    pub subjects: Vec<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            results_dir: None,
            output: None,
            subjects: default_subjects(),
        }
    }
}

/// `results/` in the parent of the directory holding `exe`, so an
/// executable at `<project>/bin/benchcmp` reads `<project>/results`
/// whatever the working directory is.
///
/// Falls back to a relative `results` when `exe` has no such ancestor.
pub fn anchored_results_dir(exe: Option<&Path>) -> PathBuf {
    exe.and_then(Path::parent)
        .and_then(Path::parent)
        .map(|root| root.join("results"))
        .unwrap_or_else(|| PathBuf::from("results"))
}

fn default_results_dir() -> PathBuf {
    anchored_results_dir(std::env::current_exe().ok().as_deref())
}

fn default_subjects() -> Vec<String> {
    vec!["rust_axum", "java_undertow"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Unit the load-test tool wrote durations in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    /// Durations are seconds and get multiplied by 1000
    #[default]
    Seconds,
    /// Durations are already milliseconds
    Milliseconds,
}

impl DurationUnit {
    /// Factor converting this unit to milliseconds.
    pub fn to_millis_factor(self) -> f64 {
        match self {
            DurationUnit::Seconds => 1000.0,
            DurationUnit::Milliseconds => 1.0,
        }
    }
}

/// Load-test (k6 CSV) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct K6Config {
    /// Input file suffix appended to the subject name.
    #[serde(default = "default_k6_suffix")]
    pub file_suffix: String,

    /// Label of request-duration rows.
    #[serde(default = "default_duration_metric")]
    pub duration_metric: String,

    /// Label of boolean check rows (1 = pass).
    #[serde(default = "default_check_metric")]
    pub check_metric: String,

    /// Label of failed-request rows (0 = success), used when there are no checks.
    #[serde(default = "default_failure_metric")]
    pub failure_metric: String,

    /// Unit of the duration values.
    #[serde(default)]
    pub duration_unit: DurationUnit,

    /// Accepted names of the label column, in preference order.
    #[serde(default = "default_label_columns")]
    pub label_columns: Vec<String>,

    /// Accepted names of the value column, in preference order.
    #[serde(default = "default_value_columns")]
    pub value_columns: Vec<String>,
}

impl Default for K6Config {
    fn default() -> Self {
        Self {
            file_suffix: default_k6_suffix(),
            duration_metric: default_duration_metric(),
            check_metric: default_check_metric(),
            failure_metric: default_failure_metric(),
            duration_unit: DurationUnit::default(),
            label_columns: default_label_columns(),
            value_columns: default_value_columns(),
        }
    }
}

fn default_k6_suffix() -> String {
    "_k6_results.csv".to_string()
}

fn default_duration_metric() -> String {
    "http_req_duration".to_string()
}

fn default_check_metric() -> String {
    "checks".to_string()
}

fn default_failure_metric() -> String {
    "http_req_failed".to_string()
}

fn default_label_columns() -> Vec<String> {
    vec!["metric_name".to_string(), "metric".to_string()]
}

fn default_value_columns() -> Vec<String> {
    vec!["metric_value".to_string(), "value".to_string()]
}

/// Resource monitoring CSV settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Preferred input file suffix.
    #[serde(default = "default_resource_suffix")]
    pub file_suffix: String,

    /// Legacy suffix tried when the preferred file is absent.
    #[serde(default = "default_resource_fallback_suffix")]
    pub fallback_suffix: String,

    /// Exact CPU column names, in preference order.
    #[serde(default = "default_cpu_columns")]
    pub cpu_columns: Vec<String>,

    /// Exact memory column names, in preference order.
    #[serde(default = "default_memory_columns")]
    pub memory_columns: Vec<String>,

    /// Fragments identifying a CPU column when no exact name matches.
    #[serde(default = "default_cpu_substrings")]
    pub cpu_substrings: Vec<String>,

    /// Fragments identifying a memory column when no exact name matches.
    #[serde(default = "default_memory_substrings")]
    pub memory_substrings: Vec<String>,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            file_suffix: default_resource_suffix(),
            fallback_suffix: default_resource_fallback_suffix(),
            cpu_columns: default_cpu_columns(),
            memory_columns: default_memory_columns(),
            cpu_substrings: default_cpu_substrings(),
            memory_substrings: default_memory_substrings(),
        }
    }
}

fn default_resource_suffix() -> String {
    "_resource_usage.csv".to_string()
}

fn default_resource_fallback_suffix() -> String {
    "_monitoring.csv".to_string()
}

fn default_cpu_columns() -> Vec<String> {
    vec!["cpu", "cpu_percent", "cpu_usage"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_memory_columns() -> Vec<String> {
    vec!["memory", "memory_mb", "mem_mb", "rss_mb"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_cpu_substrings() -> Vec<String> {
    vec!["cpu".to_string()]
}

fn default_memory_substrings() -> Vec<String> {
    vec!["mem", "rss", "memory"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Artifact size settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Input file suffix appended to the subject name.
    #[serde(default = "default_artifact_suffix")]
    pub file_suffix: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            file_suffix: default_artifact_suffix(),
        }
    }
}

fn default_artifact_suffix() -> String {
    "_binary_size.txt".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dir) = args.results_dir {
            self.general.results_dir = Some(dir.clone());
        }
        if let Some(ref output) = args.output {
            self.general.output = Some(output.clone());
        }
        if let Some(ref subjects) = args.subjects {
            self.general.subjects = subjects.clone();
        }
        if let Some(unit) = args.duration_unit {
            self.k6.duration_unit = unit;
        }
    }

    /// Directory holding the inputs: the configured one, else the directory
    /// anchored to the executable.
    pub fn results_dir(&self) -> PathBuf {
        self.general
            .results_dir
            .clone()
            .unwrap_or_else(default_results_dir)
    }

    /// Configured subjects with blanks removed and duplicates collapsed to
    /// their first occurrence.
    pub fn effective_subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = Vec::with_capacity(self.general.subjects.len());
        for subject in &self.general.subjects {
            let subject = subject.trim();
            if subject.is_empty() || subjects.iter().any(|s| s == subject) {
                continue;
            }
            subjects.push(subject.to_string());
        }
        subjects
    }

    /// Where the report goes for the given output format.
    pub fn output_path(&self, format: crate::cli::OutputFormat) -> PathBuf {
        self.general
            .output
            .clone()
            .unwrap_or_else(|| self.results_dir().join(format.default_file_name()))
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.general.results_dir.is_none());
        assert!(config.results_dir().ends_with("results"));
        assert_eq!(config.general.subjects, vec!["rust_axum", "java_undertow"]);
        assert_eq!(config.k6.duration_metric, "http_req_duration");
        assert_eq!(config.k6.duration_unit, DurationUnit::Seconds);
        assert_eq!(config.resources.fallback_suffix, "_monitoring.csv");
        assert!(config.resources.cpu_columns.contains(&"cpu_percent".to_string()));
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
results_dir = "bench/out"
subjects = ["go_fasthttp", "rust_axum"]

[k6]
duration_unit = "milliseconds"
check_metric = "checks_passed"

[resources]
cpu_columns = ["cpu_pct"]
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.results_dir(), PathBuf::from("bench/out"));
        assert_eq!(config.general.subjects, vec!["go_fasthttp", "rust_axum"]);
        assert_eq!(config.k6.duration_unit, DurationUnit::Milliseconds);
        assert_eq!(config.k6.check_metric, "checks_passed");
        assert_eq!(config.k6.duration_metric, "http_req_duration");
        assert_eq!(config.resources.cpu_columns, vec!["cpu_pct"]);
        assert_eq!(config.resources.memory_columns.len(), 4);
        assert_eq!(config.artifact.file_suffix, "_binary_size.txt");
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[k6]"));
        assert!(toml_str.contains("[resources]"));

        let reparsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(reparsed.general.subjects, Config::default().general.subjects);
    }

    #[test]
    fn test_effective_subjects_dedup() {
        let mut config = Config::default();
        config.general.subjects = vec![
            "b".to_string(),
            " a ".to_string(),
            "b".to_string(),
            "".to_string(),
        ];
        assert_eq!(config.effective_subjects(), vec!["b", "a"]);
    }

    #[test]
    fn test_output_path() {
        let mut config = Config::default();
        config.general.results_dir = Some(PathBuf::from("results"));
        assert_eq!(
            config.output_path(OutputFormat::Json),
            PathBuf::from("results/comparison.json")
        );
        assert_eq!(
            config.output_path(OutputFormat::Markdown),
            PathBuf::from("results/comparison.md")
        );

        config.general.output = Some(PathBuf::from("out/report.json"));
        assert_eq!(
            config.output_path(OutputFormat::Json),
            PathBuf::from("out/report.json")
        );
    }

    #[test]
    fn test_results_dir_anchored_to_executable() {
        assert_eq!(
            anchored_results_dir(Some(Path::new("/opt/bench/bin/benchcmp"))),
            PathBuf::from("/opt/bench/results")
        );
        // No usable location falls back to a relative directory.
        assert_eq!(anchored_results_dir(None), PathBuf::from("results"));
        assert_eq!(
            anchored_results_dir(Some(Path::new("benchcmp"))),
            PathBuf::from("results")
        );
    }

    #[test]
    fn test_default_results_dir_ignores_working_directory() {
        let exe = std::env::current_exe().unwrap();
        let expected = exe.parent().unwrap().parent().unwrap().join("results");
        assert_eq!(Config::default().results_dir(), expected);
        assert!(Config::default().results_dir().is_absolute());
    }

    #[test]
    fn test_explicit_results_dir_overrides_default() {
        let mut config = Config::default();
        config.general.results_dir = Some(PathBuf::from("elsewhere"));
        assert_eq!(config.results_dir(), PathBuf::from("elsewhere"));
        assert_eq!(
            config.output_path(OutputFormat::Json),
            PathBuf::from("elsewhere/comparison.json")
        );
    }

    #[test]
    fn test_duration_factor() {
        assert_eq!(DurationUnit::Seconds.to_millis_factor(), 1000.0);
        assert_eq!(DurationUnit::Milliseconds.to_millis_factor(), 1.0);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        assert!(Config::load(&temp_dir.path().join("missing.toml")).is_err());
    }
}
