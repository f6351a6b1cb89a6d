//! Artifact (binary / jar) size reading.

use super::error::{ExtractError, ExtractResult};
use std::path::Path;

/// Read a byte count from a text file holding a single non-negative integer.
pub fn read_artifact_size(path: &Path) -> ExtractResult<u64> {
    if !path.is_file() {
        return Err(ExtractError::Missing(path.to_path_buf()));
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| ExtractError::unreadable(path, e))?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::Empty(path.to_path_buf()));
    }

    trimmed.parse::<u64>().map_err(|e| {
        ExtractError::unreadable(path, format!("'{}' is not a byte count: {}", trimmed, e))
    })
}
