//! Error types for the scanning engine.

use serde::Serialize;
use std::path::PathBuf;

/// Errors surfaced by engine operations.
///
/// Per-file read failures are never returned here; they are collected into
/// [`crate::scan::Diagnostics`] so one bad file cannot abort a whole-tree scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The project root is missing or is not a directory.
    #[error("project root not found or not a directory: {}", .0.display())]
    NotFound(PathBuf),

    /// A user-supplied regular expression failed to compile.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A path resolved outside the project root.
    #[error("path {} escapes project root {}", .path.display(), .root.display())]
    OutsideRoot { root: PathBuf, path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    pub(crate) fn query(pattern: &str, err: regex::Error) -> Self {
        ScanError::Query(QueryError::new(pattern, err))
    }
}

/// An invalid search pattern, reported as a value next to an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Regex error: {message}")]
pub struct QueryError {
    pub pattern: String,
    pub message: String,
}

impl QueryError {
    pub fn new(pattern: &str, err: regex::Error) -> Self {
        Self {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
