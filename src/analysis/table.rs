//! CSV table loading.
//!
//! Exports from different tool versions disagree on quoting and trailing
//! columns, so records are read flexibly and every cell is trimmed.

use super::error::{ExtractError, ExtractResult};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;
use tracing::debug;

/// A fully loaded CSV file: header names plus data rows.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Load a table from disk.
    ///
    /// A missing file, a parse failure and a file without data rows are all
    /// reported as distinct [`ExtractError`] variants.
    pub fn load(path: &Path) -> ExtractResult<Self> {
        if !path.is_file() {
            return Err(ExtractError::Missing(path.to_path_buf()));
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)
            .map_err(|e| ExtractError::unreadable(path, e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ExtractError::unreadable(path, e))?
            .iter()
            .map(String::from)
            .collect();

        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ExtractError::unreadable(path, e))?;

        if rows.is_empty() {
            return Err(ExtractError::Empty(path.to_path_buf()));
        }

        debug!(
            "Loaded {} rows from {} (columns: {:?})",
            rows.len(),
            path.display(),
            headers
        );

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Iterate the cells of one column. Short rows yield an empty cell.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row.get(index).unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.csv");
        std::fs::write(&path, "a, b\n1, 2\n3,4\n").unwrap();

        let table = Table::load(&path).unwrap();
        assert_eq!(table.headers(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.column(1).collect::<Vec<_>>(), vec!["2", "4"]);
    }

    #[test]
    fn test_short_rows_yield_empty_cells() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ragged.csv");
        std::fs::write(&path, "a,b,c\n1,2,3\n4\n").unwrap();

        let table = Table::load(&path).unwrap();
        assert_eq!(table.column(2).collect::<Vec<_>>(), vec!["3", ""]);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Table::load(&temp_dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, ExtractError::Missing(_)));
    }

    #[test]
    fn test_header_only_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("header.csv");
        std::fs::write(&path, "metric_name,metric_value\n").unwrap();

        let err = Table::load(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Empty(_)));
    }

    #[test]
    fn test_zero_byte_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.csv");
        std::fs::write(&path, "").unwrap();

        let err = Table::load(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Empty(_)));
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.csv");
        std::fs::write(&path, b"a,b\n\xff\xfe,1\n").unwrap();

        let err = Table::load(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable { .. }));
    }
}
