//! Data models for benchmark comparison.
//!
//! Every entity here is recomputed on each run; the only persisted form is
//! the serialized [`ComparisonReport`].

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Reduction of one numeric series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation; zero for a single sample.
    pub std: f64,
    pub count: usize,
}

/// Request latency statistics from a load-test export, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub min_response_time: f64,
    pub max_response_time: f64,
    pub avg_response_time: f64,
    pub std_response_time: f64,
    /// Number of valid duration samples.
    pub total_requests: usize,
    /// Percentage (0-100) of successful checks, if the export had any.
    pub success_rate: Option<f64>,
}

impl LatencyStats {
    pub fn from_series(durations: SeriesStats, success_rate: Option<f64>) -> Self {
        Self {
            min_response_time: durations.min,
            max_response_time: durations.max,
            avg_response_time: durations.mean,
            std_response_time: durations.std,
            total_requests: durations.count,
            success_rate,
        }
    }
}

/// CPU (percent) and memory (MB) statistics from a monitoring export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceStats {
    pub min_cpu: f64,
    pub max_cpu: f64,
    pub avg_cpu: f64,
    pub std_cpu: f64,
    pub min_memory: f64,
    pub max_memory: f64,
    pub avg_memory: f64,
    pub std_memory: f64,
}

impl ResourceStats {
    pub fn from_series(cpu: SeriesStats, memory: SeriesStats) -> Self {
        Self {
            min_cpu: cpu.min,
            max_cpu: cpu.max,
            avg_cpu: cpu.mean,
            std_cpu: cpu.std,
            min_memory: memory.min,
            max_memory: memory.max,
            avg_memory: memory.mean,
            std_memory: memory.std,
        }
    }
}

/// Everything known about one subject. Absent inputs stay `None` and
/// serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub k6: Option<LatencyStats>,
    pub resources: Option<ResourceStats>,
    pub binary_size: Option<u64>,
}

impl SubjectSummary {
    /// True when no input produced data.
    pub fn is_empty(&self) -> bool {
        self.k6.is_none() && self.resources.is_none() && self.binary_size.is_none()
    }
}

/// Subject name to summary, in configured order.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonReport {
    entries: Vec<(String, SubjectSummary)>,
}

impl ComparisonReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a summary. An existing subject keeps its position and has its
    /// summary replaced.
    pub fn insert(&mut self, subject: impl Into<String>, summary: SubjectSummary) {
        let subject = subject.into();
        match self.entries.iter_mut().find(|(name, _)| *name == subject) {
            Some((_, existing)) => *existing = summary,
            None => self.entries.push((subject, summary)),
        }
    }

    #[allow(dead_code)] // Lookup for callers that don't iterate
    pub fn get(&self, subject: &str) -> Option<&SubjectSummary> {
        self.entries
            .iter()
            .find(|(name, _)| name == subject)
            .map(|(_, summary)| summary)
    }

    #[allow(dead_code)] // Ordered key view
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubjectSummary)> {
        self.entries.iter().map(|(name, summary)| (name.as_str(), summary))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ComparisonReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, summary) in &self.entries {
            map.serialize_entry(name, summary)?;
        }
        map.end()
    }
}
