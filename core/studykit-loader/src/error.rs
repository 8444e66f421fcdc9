//! Error types for document loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading documents.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Reading a file failed.
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents were not valid UTF-8.
    #[error("{} is not valid UTF-8", .0.display())]
    InvalidUtf8(PathBuf),

    /// Directory traversal failed.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The configured `source_column` is not a header of the CSV file.
    #[error("column '{0}' not found in CSV header")]
    MissingColumn(String),

    /// The glob could not be compiled.
    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Result type for loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;
