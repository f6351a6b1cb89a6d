//! Benchmark result analysis.
//!
//! Extractors turn one input file into statistics; the aggregator runs them
//! for every subject and assembles the comparison report.

pub mod aggregator;
pub mod artifact;
pub mod columns;
pub mod error;
pub mod latency;
pub mod resources;
pub mod stats;
pub mod table;

pub use aggregator::Aggregator;
