//! Deterministic project traversal.
//!
//! Entries are visited depth-first with siblings sorted by file name, so the
//! same tree always yields the same order regardless of filesystem. Everything
//! downstream that depends on "traversal order" (index collisions, usage
//! ordering) inherits this guarantee.

use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::diagnostics::{Diagnostics, ScanStage};
use crate::config::ScanConfig;

/// A file found under the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute (root-joined) path used for reading.
    pub path: PathBuf,
    /// Root-relative path with `/` separators.
    pub relative: String,
}

impl SourceFile {
    pub fn file_name(&self) -> &str {
        self.relative.rsplit('/').next().unwrap_or(&self.relative)
    }

    /// Root-relative directory part, empty for files directly under root.
    pub fn parent_dir(&self) -> &str {
        match self.relative.rfind('/') {
            Some(pos) => &self.relative[..pos],
            None => "",
        }
    }
}

/// Walks a project root, optionally filtering by extension.
pub struct ProjectWalker<'a> {
    root: &'a Path,
    config: &'a ScanConfig,
    extensions: Option<&'a [String]>,
}

impl<'a> ProjectWalker<'a> {
    pub fn new(root: &'a Path, config: &'a ScanConfig) -> Self {
        Self {
            root,
            config,
            extensions: None,
        }
    }

    /// Only yield files whose extension is in `extensions`.
    pub fn extensions(mut self, extensions: &'a [String]) -> Self {
        self.extensions = Some(extensions);
        self
    }

    /// Collect matching files in traversal order. Traversal failures are
    /// recorded in `diagnostics` and skipped.
    pub fn collect(&self, diagnostics: &mut Diagnostics) -> Vec<SourceFile> {
        let respect_ignores = self.config.respect_gitignore;
        let mut builder = WalkBuilder::new(self.root);
        builder
            .hidden(!self.config.include_hidden)
            .ignore(respect_ignores)
            .parents(respect_ignores)
            .git_ignore(respect_ignores)
            .git_global(respect_ignores)
            .git_exclude(respect_ignores)
            .follow_links(self.config.follow_links)
            .max_depth(self.config.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b));

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = error_path(&e).map(|p| relative_path(self.root, p));
                    debug!(error = %e, "skipping unwalkable entry");
                    diagnostics.record(path, ScanStage::Walk, e.to_string());
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if !self.accepts(entry.path()) {
                continue;
            }
            let relative = relative_path(self.root, entry.path());
            files.push(SourceFile {
                path: entry.into_path(),
                relative,
            });
        }

        debug!(root = %self.root.display(), files = files.len(), "walk complete");
        files
    }

    fn accepts(&self, path: &Path) -> bool {
        match self.extensions {
            None => true,
            Some(extensions) => path
                .extension()
                .and_then(OsStr::to_str)
                .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))),
        }
    }
}

/// Render `path` relative to `root` with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}
