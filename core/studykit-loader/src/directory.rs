//! Lazy, pattern-filtered loading of every file under a directory.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::document::Document;
use crate::error::{LoaderError, LoaderResult};
use crate::glob::Glob;
use crate::parser::{DocumentParser, TextParser};

/// Loads documents from files under `path` whose names match a glob.
///
/// ```no_run
/// use studykit_loader::DirectoryLoader;
///
/// let loader = DirectoryLoader::new("books").glob("*.txt");
/// for doc in loader.lazy_load()? {
///     println!("{:?}", doc?.metadata);
/// }
/// # Ok::<(), studykit_loader::LoaderError>(())
/// ```
#[derive(Clone)]
pub struct DirectoryLoader {
    path: PathBuf,
    glob: String,
    recursive: bool,
    load_hidden: bool,
    silent_errors: bool,
    parser: Arc<dyn DocumentParser>,
}

impl DirectoryLoader {
    /// Matches every non-hidden file directly under `path`, parsed with
    /// [`TextParser`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            glob: "**/*".to_string(),
            recursive: false,
            load_hidden: false,
            silent_errors: false,
            parser: Arc::new(TextParser),
        }
    }

    pub fn glob(mut self, pattern: impl Into<String>) -> Self {
        self.glob = pattern.into();
        self
    }

    /// Descend into subdirectories (default `false`).
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Include dot-files and dot-directories (default `false`).
    pub fn load_hidden(mut self, load_hidden: bool) -> Self {
        self.load_hidden = load_hidden;
        self
    }

    /// Log and skip files that fail to parse instead of yielding the error.
    pub fn silent_errors(mut self, silent: bool) -> Self {
        self.silent_errors = silent;
        self
    }

    pub fn parser(mut self, parser: impl DocumentParser + 'static) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Starts a new walk. Nothing is read until the iterator is advanced.
    ///
    /// Files are visited in file-name order within each directory.
    ///
    /// # Errors
    ///
    /// Fails only if the glob is invalid; per-file errors are yielded by the
    /// iterator.
    pub fn lazy_load(&self) -> LoaderResult<DocumentIter> {
        let glob = Glob::new(&self.glob)?;
        let mut walker = WalkDir::new(&self.path).sort_by_file_name();
        if !self.recursive {
            walker = walker.max_depth(1);
        }
        let load_hidden = self.load_hidden;
        let entries = walker
            .into_iter()
            .filter_entry(move |e| load_hidden || e.depth() == 0 || !is_hidden(e));
        debug!(path = %self.path.display(), glob = %self.glob, "starting directory walk");
        Ok(DocumentIter {
            root: self.path.clone(),
            entries: Box::new(entries),
            glob,
            parser: Arc::clone(&self.parser),
            silent_errors: self.silent_errors,
            pending: VecDeque::new(),
        })
    }

    /// Loads everything eagerly, stopping at the first error.
    pub fn load(&self) -> LoaderResult<Vec<Document>> {
        self.lazy_load()?.collect()
    }
}

impl std::fmt::Debug for DirectoryLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryLoader")
            .field("path", &self.path)
            .field("glob", &self.glob)
            .field("recursive", &self.recursive)
            .field("load_hidden", &self.load_hidden)
            .field("silent_errors", &self.silent_errors)
            .finish_non_exhaustive()
    }
}

/// Iterator returned by [`DirectoryLoader::lazy_load`].
pub struct DocumentIter {
    root: PathBuf,
    entries: Box<dyn Iterator<Item = walkdir::Result<DirEntry>> + Send>,
    glob: Glob,
    parser: Arc<dyn DocumentParser>,
    silent_errors: bool,
    pending: VecDeque<Document>,
}

impl Iterator for DocumentIter {
    type Item = LoaderResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(doc) = self.pending.pop_front() {
                return Some(Ok(doc));
            }
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) if self.silent_errors => {
                    warn!("skipping unreadable entry: {e}");
                    continue;
                }
                Err(e) => return Some(Err(LoaderError::Walk(e))),
            };
            if !entry.file_type().is_file() || !self.selects(&entry) {
                continue;
            }
            match self.parser.parse(entry.path()) {
                Ok(docs) => {
                    debug!(path = %entry.path().display(), count = docs.len(), "parsed file");
                    self.pending.extend(docs);
                }
                Err(e) if self.silent_errors => {
                    warn!(path = %entry.path().display(), "skipping file: {e}");
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl DocumentIter {
    fn selects(&self, entry: &DirEntry) -> bool {
        let file_name = entry.file_name().to_string_lossy();
        let relative = entry
            .path()
            .strip_prefix(&self.root)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        self.glob.matches(&file_name, &relative)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
