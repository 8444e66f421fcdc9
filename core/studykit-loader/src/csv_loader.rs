//! Eager CSV loading: one document per data row.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::Document;
use crate::error::{LoaderError, LoaderResult};

/// Loads a CSV file with a header row.
///
/// Each row becomes a document whose content is one `header: value` line per
/// column, in column order. Metadata: `source` (the file path, or the row's
/// value in `source_column` when set) and `row` (0-based data row index).
#[derive(Debug, Clone)]
pub struct CsvLoader {
    path: PathBuf,
    delimiter: u8,
    source_column: Option<String>,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
            source_column: None,
        }
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Use this column's value as each row's `source`.
    pub fn source_column(mut self, column: impl Into<String>) -> Self {
        self.source_column = Some(column.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and converts every row.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or parsed, or if `source_column` is
    /// not one of the headers.
    pub fn load(&self) -> LoaderResult<Vec<Document>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_path(&self.path)?;
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let source_idx = match &self.source_column {
            Some(col) => Some(
                headers
                    .iter()
                    .position(|h| h == col)
                    .ok_or_else(|| LoaderError::MissingColumn(col.clone()))?,
            ),
            None => None,
        };
        let path_source = self.path.display().to_string();

        let mut docs = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let content = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| format!("{h}: {}", v.trim()))
                .collect::<Vec<_>>()
                .join("\n");
            let source = source_idx
                .and_then(|i| record.get(i))
                .map_or_else(|| path_source.clone(), |v| v.trim().to_string());
            docs.push(
                Document::new(content)
                    .with_metadata("source", source)
                    .with_metadata("row", row.to_string()),
            );
        }
        debug!(path = %path_source, rows = docs.len(), "loaded CSV");
        Ok(docs)
    }
}
