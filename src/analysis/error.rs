//! Extraction failure taxonomy.
//!
//! Every extractor returns one of these instead of panicking or aborting.
//! The aggregator downgrades them to absent report fields.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why an extractor produced no data.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input file does not exist.
    #[error("input not found: {}", .0.display())]
    Missing(PathBuf),

    /// Neither the preferred input nor its fallback exists.
    #[error("input not found: {} (also tried {})", .path.display(), .fallback.display())]
    MissingWithFallback { path: PathBuf, fallback: PathBuf },

    /// The input file exists but could not be read or parsed.
    #[error("failed to read {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// The input file has a header (or nothing) but no data rows.
    #[error("input is empty: {}", .0.display())]
    Empty(PathBuf),

    /// None of the accepted column names were found.
    #[error("expected columns not found in {} ({expected})", .path.display())]
    SchemaMismatch { path: PathBuf, expected: String },

    /// Columns were found but no value survived numeric coercion.
    #[error("no valid {what} samples in {}", .path.display())]
    NoValidSamples { path: PathBuf, what: String },
}

impl ExtractError {
    pub fn unreadable(path: &Path, reason: impl ToString) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
