//! Document loaders for studykit.
//!
//! Turns files on disk into [`Document`]s (text plus string metadata):
//! - [`DirectoryLoader`]: walks a directory lazily, parsing each file whose
//!   name matches a glob with a pluggable [`DocumentParser`]
//! - [`CsvLoader`]: reads a CSV file eagerly, one document per data row
//!
//! Loaders hold only configuration. Every call to
//! [`DirectoryLoader::lazy_load`] starts a fresh walk.

mod csv_loader;
mod directory;
mod document;
mod error;
mod glob;
mod parser;

pub use csv_loader::CsvLoader;
pub use directory::{DirectoryLoader, DocumentIter};
pub use document::Document;
pub use error::{LoaderError, LoaderResult};
pub use parser::{DocumentParser, TextParser, PAGE_BREAK};
