//! Request latency extraction from k6 CSV exports.
//!
//! The export is a long table of `(metric label, value)` rows. Duration rows
//! feed the latency statistics; check rows (or failed-request rows when
//! there are no checks) feed the success rate.

use super::columns::ColumnResolver;
use super::error::{ExtractError, ExtractResult};
use super::stats::{parse_sample, scale, summarize};
use super::table::Table;
use crate::config::K6Config;
use crate::models::LatencyStats;
use std::path::Path;
use tracing::debug;

/// Compute latency statistics from the export at `path`.
pub fn extract_latency(path: &Path, config: &K6Config) -> ExtractResult<LatencyStats> {
    let table = Table::load(path)?;

    let label_resolver = ColumnResolver::exact(&config.label_columns);
    let value_resolver = ColumnResolver::exact(&config.value_columns);

    let (label_col, value_col) = match (
        label_resolver.resolve(table.headers()),
        value_resolver.resolve(table.headers()),
    ) {
        (Some(label), Some(value)) => (label, value),
        _ => {
            return Err(ExtractError::SchemaMismatch {
                path: path.to_path_buf(),
                expected: format!(
                    "{} + {}",
                    label_resolver.describe(),
                    value_resolver.describe()
                ),
            })
        }
    };

    let mut durations = samples_for(&table, label_col, value_col, &config.duration_metric);
    scale(&mut durations, config.duration_unit.to_millis_factor());

    let stats = summarize(&durations).ok_or_else(|| ExtractError::NoValidSamples {
        path: path.to_path_buf(),
        what: config.duration_metric.clone(),
    })?;

    let success_rate = success_rate(&table, label_col, value_col, config);

    debug!(
        "{}: {} duration samples, success rate {:?}",
        path.display(),
        stats.count,
        success_rate
    );

    Ok(LatencyStats::from_series(stats, success_rate))
}

/// Numeric values of every row labelled `metric`.
fn samples_for(table: &Table, label_col: usize, value_col: usize, metric: &str) -> Vec<f64> {
    table
        .rows()
        .iter()
        .filter(|row| row.get(label_col) == Some(metric))
        .filter_map(|row| row.get(value_col).and_then(parse_sample))
        .collect()
}

/// Percentage of passing checks, or of non-failed requests when the export
/// has no check rows. `None` when neither metric is present.
fn success_rate(
    table: &Table,
    label_col: usize,
    value_col: usize,
    config: &K6Config,
) -> Option<f64> {
    let checks = samples_for(table, label_col, value_col, &config.check_metric);
    if !checks.is_empty() {
        return Some(percentage(&checks, |v| v > 0.0));
    }

    let failures = samples_for(table, label_col, value_col, &config.failure_metric);
    if !failures.is_empty() {
        return Some(percentage(&failures, |v| v == 0.0));
    }

    None
}

fn percentage(samples: &[f64], success: impl Fn(f64) -> bool) -> f64 {
    let passed = samples.iter().filter(|&&v| success(v)).count();
    100.0 * passed as f64 / samples.len() as f64
}
