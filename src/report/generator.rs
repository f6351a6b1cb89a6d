//! Report generation.
//!
//! The JSON document is the data contract; the Markdown rendering and the
//! per-subject console text are for humans.

use crate::models::{ComparisonReport, LatencyStats, ResourceStats, SubjectSummary};
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

/// Generate the pretty-printed JSON report.
pub fn generate_json_report(report: &ComparisonReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate a Markdown comparison document.
pub fn generate_markdown_report(report: &ComparisonReport) -> String {
    let mut output = String::new();

    output.push_str("# Benchmark Comparison\n\n");
    output.push_str(&format!(
        "*Generated {}*\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output.push_str(&generate_latency_section(report));
    output.push_str(&generate_resource_section(report));
    output.push_str(&generate_size_section(report));

    output
}

fn opt(value: Option<f64>, suffix: &str) -> String {
    value
        .map(|v| format!("{:.2}{}", v, suffix))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Generate the response time table.
fn generate_latency_section(report: &ComparisonReport) -> String {
    let mut section = String::new();

    section.push_str("## Response Time (ms)\n\n");
    section.push_str("| Subject | Min | Max | Avg | Std | Requests | Success |\n");
    section.push_str("|:---|---:|---:|---:|---:|---:|---:|\n");

    for (name, summary) in report.iter() {
        let row = match summary.k6 {
            Some(LatencyStats {
                min_response_time,
                max_response_time,
                avg_response_time,
                std_response_time,
                total_requests,
                success_rate,
            }) => format!(
                "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {} | {} |\n",
                name,
                min_response_time,
                max_response_time,
                avg_response_time,
                std_response_time,
                total_requests,
                opt(success_rate, "%"),
            ),
            None => format!("| {} | n/a | n/a | n/a | n/a | n/a | n/a |\n", name),
        };
        section.push_str(&row);
    }
    section.push('\n');

    section
}

/// Generate the CPU / memory table.
fn generate_resource_section(report: &ComparisonReport) -> String {
    let mut section = String::new();

    section.push_str("## Resource Usage\n\n");
    section.push_str(
        "| Subject | CPU Min % | CPU Max % | CPU Avg % | CPU Std | Mem Min MB | Mem Max MB | Mem Avg MB | Mem Std |\n",
    );
    section.push_str("|:---|---:|---:|---:|---:|---:|---:|---:|---:|\n");

    for (name, summary) in report.iter() {
        match summary.resources {
            Some(ref r) => section.push_str(&format!(
                "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |\n",
                name,
                r.min_cpu,
                r.max_cpu,
                r.avg_cpu,
                r.std_cpu,
                r.min_memory,
                r.max_memory,
                r.avg_memory,
                r.std_memory,
            )),
            None => section.push_str(&format!(
                "| {} | n/a | n/a | n/a | n/a | n/a | n/a | n/a | n/a |\n",
                name
            )),
        }
    }
    section.push('\n');

    section
}

/// Generate the artifact size table.
fn generate_size_section(report: &ComparisonReport) -> String {
    let mut section = String::new();

    section.push_str("## Artifact Size\n\n");
    section.push_str("| Subject | Bytes | MB |\n");
    section.push_str("|:---|---:|---:|\n");

    for (name, summary) in report.iter() {
        match summary.binary_size {
            Some(bytes) => section.push_str(&format!(
                "| {} | {} | {:.2} |\n",
                name,
                bytes,
                bytes_to_mb(bytes)
            )),
            None => section.push_str(&format!("| {} | n/a | n/a |\n", name)),
        }
    }
    section.push('\n');

    section
}

fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

/// Human-readable summary of one subject, printed while the report is built.
pub fn subject_summary_text(name: &str, summary: &SubjectSummary) -> String {
    let mut lines = vec![format!("📊 {}", name)];

    match summary.k6 {
        Some(ref k6) => {
            lines.push("   Response time (ms):".to_string());
            lines.push(format!(
                "     min {:.2} | max {:.2} | avg {:.2} | std {:.2}",
                k6.min_response_time,
                k6.max_response_time,
                k6.avg_response_time,
                k6.std_response_time
            ));
            lines.push(format!("     requests: {}", k6.total_requests));
            if let Some(rate) = k6.success_rate {
                lines.push(format!("     success rate: {:.2}%", rate));
            }
        }
        None => lines.push("   Response time: no data".to_string()),
    }

    match summary.resources {
        Some(ResourceStats {
            min_cpu,
            max_cpu,
            avg_cpu,
            std_cpu,
            min_memory,
            max_memory,
            avg_memory,
            std_memory,
        }) => {
            lines.push(format!(
                "   CPU (%):     min {:.2} | max {:.2} | avg {:.2} | std {:.2}",
                min_cpu, max_cpu, avg_cpu, std_cpu
            ));
            lines.push(format!(
                "   Memory (MB): min {:.2} | max {:.2} | avg {:.2} | std {:.2}",
                min_memory, max_memory, avg_memory, std_memory
            ));
        }
        None => lines.push("   Resources: no data".to_string()),
    }

    match summary.binary_size {
        Some(bytes) => lines.push(format!(
            "   Artifact size: {} bytes ({:.2} MB)",
            bytes,
            bytes_to_mb(bytes)
        )),
        None => lines.push("   Artifact size: no data".to_string()),
    }

    lines.join("\n")
}

/// Write report content, creating parent directories as needed.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
