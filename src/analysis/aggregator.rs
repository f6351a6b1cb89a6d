//! Per-subject aggregation into a comparison report.
//!
//! Each subject's three inputs are extracted independently. A failed
//! extraction is logged and leaves its field empty; it never stops the run.

use super::artifact::read_artifact_size;
use super::error::ExtractResult;
use super::latency::extract_latency;
use super::resources::{extract_resources, resolve_resource_file};
use crate::config::Config;
use crate::models::{ComparisonReport, SubjectSummary};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Builds [`SubjectSummary`] records from a results directory.
pub struct Aggregator<'a> {
    config: &'a Config,
    results_dir: PathBuf,
}

impl<'a> Aggregator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            results_dir: config.results_dir(),
        }
    }

    fn subject_file(&self, subject: &str, suffix: &str) -> PathBuf {
        self.results_dir.join(format!("{}{}", subject, suffix))
    }

    /// Extract everything available for one subject.
    pub fn analyze_subject(&self, subject: &str) -> SubjectSummary {
        debug!("Analyzing subject '{}'", subject);

        let k6_path = self.subject_file(subject, &self.config.k6.file_suffix);
        let k6 = recover(subject, "load-test", extract_latency(&k6_path, &self.config.k6));

        let resources = recover(
            subject,
            "resource",
            resolve_resource_file(&self.results_dir, subject, &self.config.resources)
                .and_then(|path| extract_resources(&path, &self.config.resources)),
        );

        let size_path = self.subject_file(subject, &self.config.artifact.file_suffix);
        let binary_size = recover(subject, "artifact size", read_artifact_size(&size_path));

        SubjectSummary {
            k6,
            resources,
            binary_size,
        }
    }

    /// Analyze every subject in order. `on_subject` sees each summary as
    /// soon as it is built.
    pub fn build_report<S, F>(&self, subjects: &[S], mut on_subject: F) -> ComparisonReport
    where
        S: AsRef<str>,
        F: FnMut(&str, &SubjectSummary),
    {
        let mut report = ComparisonReport::new();

        for subject in subjects {
            let subject = subject.as_ref();
            let summary = self.analyze_subject(subject);
            on_subject(subject, &summary);
            report.insert(subject, summary);
        }

        report
    }
}

/// Downgrade an extraction failure to an absent field.
fn recover<T>(subject: &str, what: &str, result: ExtractResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("[{}] no {} data: {}", subject, what, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn config_for(dir: &Path) -> Config {
        let mut config = Config::default();
        config.general.results_dir = Some(dir.to_path_buf());
        config
    }

    fn fixtures_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/results")
    }

    #[test]
    fn test_empty_results_dir_yields_null_fields() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(temp_dir.path());
        let aggregator = Aggregator::new(&config);

        let summary = aggregator.analyze_subject("ghost");
        assert!(summary.k6.is_none());
        assert!(summary.resources.is_none());
        assert!(summary.binary_size.is_none());
    }

    #[test]
    fn test_report_has_configured_subjects_in_order() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("b_binary_size.txt"), "42\n").unwrap();

        let config = config_for(temp_dir.path());
        let aggregator = Aggregator::new(&config);

        let mut seen = Vec::new();
        let report = aggregator.build_report(&["c", "a", "b"], |name, _| {
            seen.push(name.to_string())
        });

        assert_eq!(seen, vec!["c", "a", "b"]);
        assert_eq!(report.subjects().collect::<Vec<_>>(), vec!["c", "a", "b"]);
        assert_eq!(report.get("b").unwrap().binary_size, Some(42));
        assert!(report.get("a").unwrap().is_empty());
    }

    #[test]
    fn test_one_bad_input_does_not_affect_others() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        std::fs::write(
            dir.join("s_k6_results.csv"),
            "metric_name,metric_value\nhttp_req_duration,0.2\n",
        )
        .unwrap();
        std::fs::write(dir.join("s_resource_usage.csv"), "").unwrap();
        std::fs::write(dir.join("s_binary_size.txt"), "not-a-number").unwrap();

        let config = config_for(dir);
        let summary = Aggregator::new(&config).analyze_subject("s");

        let k6 = summary.k6.unwrap();
        assert_eq!(k6.total_requests, 1);
        assert_eq!(k6.std_response_time, 0.0);
        assert!(summary.resources.is_none());
        assert!(summary.binary_size.is_none());
    }

    #[test]
    fn test_fixture_results() {
        let config = config_for(&fixtures_dir());
        let aggregator = Aggregator::new(&config);
        let subjects = ["rust_axum", "java_undertow", "go_fasthttp"];
        let report = aggregator.build_report(&subjects, |_, _| {});

        assert_eq!(report.len(), 3);

        let rust = report.get("rust_axum").unwrap();
        let k6 = rust.k6.as_ref().unwrap();
        assert_eq!(k6.total_requests, 4);
        assert!((k6.min_response_time - 1.0).abs() < 1e-9);
        assert!((k6.max_response_time - 4.0).abs() < 1e-9);
        assert_eq!(k6.success_rate, Some(75.0));
        let res = rust.resources.as_ref().unwrap();
        assert_eq!(res.avg_cpu, 20.0);
        assert_eq!(res.std_memory, 0.0);
        assert_eq!(rust.binary_size, Some(4_521_984));

        // Legacy monitoring file with non-standard headers, unparsable size.
        let java = report.get("java_undertow").unwrap();
        let k6 = java.k6.as_ref().unwrap();
        assert_eq!(k6.total_requests, 3);
        assert_eq!(k6.success_rate, None);
        let res = java.resources.as_ref().unwrap();
        assert_eq!(res.max_cpu, 55.0);
        assert_eq!(res.avg_memory, 310.0);
        assert!(java.binary_size.is_none());

        assert!(report.get("go_fasthttp").unwrap().is_empty());
    }
}
