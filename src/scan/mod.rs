//! Tree scanning primitives shared by every engine operation.
//!
//! Walks the project in a fixed order, reads matching files in parallel,
//! and folds per-file results back in traversal order.

pub mod diagnostics;
pub mod walker;

pub use diagnostics::{Diagnostic, Diagnostics, ScanStage};
pub use walker::{relative_path, ProjectWalker, SourceFile};

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::project::Project;

/// Read a file as text, replacing invalid UTF-8 rather than failing on it.
pub fn read_text(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Walk `project` for files with one of `extensions`, read each one and run
/// `per_file` over its text.
///
/// Results come back in traversal order. Unreadable files are recorded in the
/// returned diagnostics and contribute nothing.
pub fn scan_files<T, F>(
    project: &Project,
    extensions: &[String],
    per_file: F,
) -> Result<(Vec<T>, Diagnostics)>
where
    T: Send,
    F: Fn(&SourceFile, &str) -> T + Sync,
{
    let mut diagnostics = Diagnostics::new();
    let files = project.walk(Some(extensions), &mut diagnostics)?;

    let outcomes: Vec<(&SourceFile, io::Result<T>)> = files
        .par_iter()
        .map(|file| {
            let outcome = read_text(&file.path).map(|text| per_file(file, &text));
            (file, outcome)
        })
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    for (file, outcome) in outcomes {
        match outcome {
            Ok(value) => results.push(value),
            Err(e) => {
                debug!(file = %file.relative, error = %e, "skipping unreadable file");
                diagnostics.record(Some(file.relative.clone()), ScanStage::Read, e.to_string());
            }
        }
    }

    Ok((results, diagnostics))
}
