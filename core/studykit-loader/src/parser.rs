//! Per-file parsing used by [`DirectoryLoader`](crate::DirectoryLoader).

use std::fs;
use std::path::Path;

use crate::document::Document;
use crate::error::{LoaderError, LoaderResult};

/// Form feed, the page separator [`TextParser`] splits on.
pub const PAGE_BREAK: char = '\x0c';

/// Turns one file into zero or more documents.
pub trait DocumentParser: Send + Sync {
    fn parse(&self, path: &Path) -> LoaderResult<Vec<Document>>;
}

/// Reads UTF-8 text and emits one document per page.
///
/// Pages are separated by [`PAGE_BREAK`]. Each document carries `source`
/// (the file path) and `page` (0-based) metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParser;

impl DocumentParser for TextParser {
    fn parse(&self, path: &Path) -> LoaderResult<Vec<Document>> {
        let bytes = fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text =
            String::from_utf8(bytes).map_err(|_| LoaderError::InvalidUtf8(path.to_path_buf()))?;
        let source = path.display().to_string();
        Ok(text
            .split(PAGE_BREAK)
            .enumerate()
            .map(|(page, content)| {
                Document::new(content)
                    .with_metadata("source", source.as_str())
                    .with_metadata("page", page.to_string())
            })
            .collect())
    }
}
