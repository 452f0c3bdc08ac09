//! Per-file failures collected during a tree scan.
//!
//! Scans never abort on a single unreadable file. Instead each failure is
//! recorded here and handed back next to the results, so callers can report
//! "N files could not be read" without losing the partial result.

use serde::Serialize;
use std::fmt;

/// Where in the scan a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStage {
    /// Directory traversal (permission denied on a directory, symlink loop).
    Walk,
    /// Opening or reading a file's contents.
    Read,
}

impl fmt::Display for ScanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanStage::Walk => write!(f, "walk"),
            ScanStage::Read => write!(f, "read"),
        }
    }
}

/// A single skipped path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Path relative to the project root, or `None` when the walker could not
    /// attribute the failure to a path.
    pub path: Option<String>,
    pub stage: ScanStage,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} ({}): {}", path, self.stage, self.message),
            None => write!(f, "({}): {}", self.stage, self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: Option<String>, stage: ScanStage, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            path,
            stage,
            message: message.into(),
        });
    }

    /// Append everything from another scan.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Count of failures in a given stage.
    pub fn count(&self, stage: ScanStage) -> usize {
        self.entries.iter().filter(|d| d.stage == stage).count()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} path(s) skipped ({} walk, {} read)",
            self.len(),
            self.count(ScanStage::Walk),
            self.count(ScanStage::Read)
        )
    }
}
