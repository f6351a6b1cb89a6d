//! CPU and memory extraction from resource-monitoring CSV exports.

use super::columns::ColumnResolver;
use super::error::{ExtractError, ExtractResult};
use super::stats::{parse_sample, summarize};
use super::table::Table;
use crate::config::ResourcesConfig;
use crate::models::ResourceStats;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Pick the monitoring file for a subject: the preferred name if present,
/// else the legacy one. The error names both when neither exists.
pub fn resolve_resource_file(
    results_dir: &Path,
    subject: &str,
    config: &ResourcesConfig,
) -> ExtractResult<PathBuf> {
    let preferred = results_dir.join(format!("{}{}", subject, config.file_suffix));
    if preferred.is_file() {
        return Ok(preferred);
    }

    let fallback = results_dir.join(format!("{}{}", subject, config.fallback_suffix));
    if fallback.is_file() {
        info!("Using fallback monitoring file: {}", fallback.display());
        return Ok(fallback);
    }

    Err(ExtractError::MissingWithFallback {
        path: preferred,
        fallback,
    })
}

/// Compute CPU and memory statistics from the export at `path`.
pub fn extract_resources(path: &Path, config: &ResourcesConfig) -> ExtractResult<ResourceStats> {
    let table = Table::load(path)?;

    let cpu_resolver =
        ColumnResolver::exact(&config.cpu_columns).with_substrings(&config.cpu_substrings);
    let mem_resolver =
        ColumnResolver::exact(&config.memory_columns).with_substrings(&config.memory_substrings);

    let (cpu_col, mem_col) = match (
        cpu_resolver.resolve(table.headers()),
        mem_resolver.resolve(table.headers()),
    ) {
        (Some(cpu), Some(mem)) => (cpu, mem),
        _ => {
            return Err(ExtractError::SchemaMismatch {
                path: path.to_path_buf(),
                expected: format!(
                    "cpu: {}; memory: {}",
                    cpu_resolver.describe(),
                    mem_resolver.describe()
                ),
            })
        }
    };

    debug!(
        "{}: cpu column '{}', memory column '{}'",
        path.display(),
        table.headers()[cpu_col],
        table.headers()[mem_col]
    );

    let cpu: Vec<f64> = table.column(cpu_col).filter_map(parse_sample).collect();
    let memory: Vec<f64> = table.column(mem_col).filter_map(parse_sample).collect();

    match (summarize(&cpu), summarize(&memory)) {
        (Some(cpu), Some(memory)) => Ok(ResourceStats::from_series(cpu, memory)),
        (cpu, _) => Err(ExtractError::NoValidSamples {
            path: path.to_path_buf(),
            what: if cpu.is_none() { "cpu" } else { "memory" }.to_string(),
        }),
    }
}
