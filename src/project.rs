//! The project handle and root-contained file access.
//!
//! A [`Project`] is a validated root plus the configuration for one request.
//! It holds no index and no cache: every operation walks the tree afresh.

use std::path::{Component, Path, PathBuf};

use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::scan::{read_text, Diagnostics, ProjectWalker, SourceFile};

#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: ScanConfig,
}

impl Project {
    /// Open a project rooted at `root`. Fails with `NotFound` when the root
    /// is missing or not a directory.
    pub fn open(root: impl Into<PathBuf>, config: ScanConfig) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root, config })
    }

    /// Open with the config found at `<root>/.vescan/config.toml`, or defaults.
    pub fn discover(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        let config = ScanConfig::load(&ScanConfig::path_for(&root));
        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Walk the tree, re-checking the root first since it may have gone away
    /// since `open`.
    pub(crate) fn walk(
        &self,
        extensions: Option<&[String]>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<SourceFile>> {
        ensure_dir(&self.root)?;
        let mut walker = ProjectWalker::new(&self.root, &self.config);
        if let Some(extensions) = extensions {
            walker = walker.extensions(extensions);
        }
        Ok(walker.collect(diagnostics))
    }
}

fn ensure_dir(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(ScanError::NotFound(root.to_path_buf()))
    }
}

/// Every file under the root regardless of extension, as relative paths.
pub fn list_files(project: &Project) -> Result<(Vec<String>, Diagnostics)> {
    let mut diagnostics = Diagnostics::new();
    let files = project.walk(None, &mut diagnostics)?;
    Ok((files.into_iter().map(|f| f.relative).collect(), diagnostics))
}

/// First file (in traversal order) named exactly `file_name`.
pub fn find_file(project: &Project, file_name: &str) -> Result<Option<String>> {
    let mut diagnostics = Diagnostics::new();
    let files = project.walk(None, &mut diagnostics)?;
    Ok(files
        .into_iter()
        .find(|f| f.file_name() == file_name)
        .map(|f| f.relative))
}

/// Resolve `candidate` against `root` and reject anything that lands outside.
///
/// A relative root is made absolute against the working directory first.
/// Relative candidates are joined onto the root. `.` and `..` are folded
/// lexically, so the check works for paths that do not exist yet; a `..` that
/// climbs above the filesystem root counts as outside. When both paths exist
/// they are also compared after canonicalization, which catches symlinks
/// pointing out of the tree.
pub fn resolve_within_root(root: &Path, candidate: &Path) -> Result<PathBuf> {
    let outside = || ScanError::OutsideRoot {
        root: root.to_path_buf(),
        path: candidate.to_path_buf(),
    };

    let absolute_root = std::path::absolute(root)?;
    let normalized_root = normalize(&absolute_root).ok_or_else(outside)?;
    let joined = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        normalized_root.join(candidate)
    };
    let normalized = normalize(&joined).ok_or_else(outside)?;

    if !normalized.starts_with(&normalized_root) {
        return Err(outside());
    }
    if let (Ok(real_root), Ok(real_path)) = (root.canonicalize(), normalized.canonicalize()) {
        if !real_path.starts_with(&real_root) {
            return Err(outside());
        }
    }
    Ok(normalized)
}

/// Fold `.` and `..` out of an absolute path. `None` when `..` would climb
/// past the start.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    Some(out)
}

/// Read a project file for viewing. The path must stay inside the root.
pub fn read_project_file(project: &Project, candidate: &Path) -> Result<String> {
    let path = resolve_within_root(project.root(), candidate)?;
    Ok(read_text(&path)?)
}
