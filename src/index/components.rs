//! Name → defining-file index over every design source in a project.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::extract::extract;
use super::types::Declaration;
use crate::error::Result;
use crate::project::Project;
use crate::scan::{scan_files, Diagnostics};

/// A name declared in more than one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub name: String,
    /// Every declaring file in traversal order. The last one is indexed.
    pub files: Vec<String>,
}

/// The component index for one request.
///
/// `definitions` keeps a single declaration per name: when several files
/// declare the same name, the file visited last wins. Traversal is sorted, so
/// the winner is stable for a given tree. `declarations` keeps every
/// declaration, duplicates included, so collisions stay visible.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComponentIndex {
    definitions: BTreeMap<String, Declaration>,
    declarations: Vec<Declaration>,
    pub diagnostics: Diagnostics,
}

impl ComponentIndex {
    /// Walk all design sources under the project and index their declarations.
    pub fn build(project: &Project) -> Result<Self> {
        let (per_file, diagnostics) =
            scan_files(project, &project.config().design_extensions, |file, text| {
                extract(text, &file.relative)
            })?;

        let mut index = Self::from_declarations(per_file.into_iter().flatten());
        index.diagnostics = diagnostics;

        info!(
            names = index.definitions.len(),
            declarations = index.declarations.len(),
            skipped = index.diagnostics.len(),
            "component index built"
        );
        Ok(index)
    }

    /// Every declaration in the project, duplicates preserved.
    pub fn build_all(project: &Project) -> Result<Vec<Declaration>> {
        Ok(Self::build(project)?.declarations)
    }

    /// Fold declarations (in traversal order) into an index.
    pub fn from_declarations(declarations: impl IntoIterator<Item = Declaration>) -> Self {
        let mut index = Self::default();
        for declaration in declarations {
            if let Some(previous) = index
                .definitions
                .insert(declaration.name.clone(), declaration.clone())
            {
                if previous.defining_file != declaration.defining_file {
                    debug!(
                        name = %declaration.name,
                        dropped = %previous.defining_file,
                        kept = %declaration.defining_file,
                        "duplicate declaration; last visited file wins"
                    );
                }
            }
            index.declarations.push(declaration);
        }
        index
    }

    /// The file the index attributes `name` to.
    pub fn defining_file(&self, name: &str) -> Option<&str> {
        self.definitions.get(name).map(|d| d.defining_file.as_str())
    }

    /// The declaration kept for `name`.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.definitions.get(name)
    }

    /// Name → defining file, sorted by name.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.definitions
            .iter()
            .map(|(name, decl)| (name.as_str(), decl.defining_file.as_str()))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.definitions()
            .map(|(name, file)| (name.to_string(), file.to_string()))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Names declared in more than one distinct file.
    pub fn collisions(&self) -> Vec<Collision> {
        let mut files_by_name: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for decl in &self.declarations {
            let files = files_by_name.entry(decl.name.as_str()).or_default();
            if !files.contains(&decl.defining_file) {
                files.push(decl.defining_file.clone());
            }
        }
        files_by_name
            .into_iter()
            .filter(|(_, files)| files.len() > 1)
            .map(|(name, files)| Collision {
                name: name.to_string(),
                files,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use crate::index::types::DeclarationKind;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_build_index() {
        let dir = tempdir().unwrap();
        write(dir.path(), "rtl/fifo.sv", "module fifo;\nendmodule\n");
        write(dir.path(), "rtl/fifo_if.sv", "interface fifo_if;\nendinterface\n");
        write(dir.path(), "tb/env.sv", "class fifo_env;\nendclass\n");
        write(dir.path(), "tb/defs.svh", "class not_indexed;\nendclass\n");

        let project = Project::open(dir.path(), ScanConfig::default()).unwrap();
        let index = ComponentIndex::build(&project).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.defining_file("fifo"), Some("rtl/fifo.sv"));
        assert_eq!(index.defining_file("fifo_if"), Some("rtl/fifo_if.sv"));
        assert_eq!(index.defining_file("fifo_env"), Some("tb/env.sv"));
        assert_eq!(index.defining_file("not_indexed"), None);
        assert_eq!(index.get("fifo_env").unwrap().kind, DeclarationKind::Class);
    }

    #[test]
    fn test_last_visited_file_wins() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a/common.sv", "module common;\nendmodule\n");
        write(dir.path(), "b/common.sv", "module common;\nendmodule\n");

        let project = Project::open(dir.path(), ScanConfig::default()).unwrap();
        let index = ComponentIndex::build(&project).unwrap();

        assert_eq!(index.defining_file("common"), Some("b/common.sv"));
        assert_eq!(index.declarations().len(), 2);

        let collisions = index.collisions();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].name, "common");
        assert_eq!(collisions[0].files, vec!["a/common.sv", "b/common.sv"]);
    }

    #[test]
    fn test_build_all_preserves_duplicates() {
        let dir = tempdir().unwrap();
        write(dir.path(), "x.sv", "module dup;\nendmodule\nmodule dup;\n");
        write(dir.path(), "y.v", "module dup;\n");

        let project = Project::open(dir.path(), ScanConfig::default()).unwrap();
        let all = ComponentIndex::build_all(&project).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|d| d.name == "dup"));

        // Repeats within one file are not collisions.
        let index = ComponentIndex::build(&project).unwrap();
        assert_eq!(index.collisions()[0].files, vec!["x.sv", "y.v"]);
    }

    #[test]
    fn test_build_is_idempotent() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.sv", "module a;\nclass c;\n");
        write(dir.path(), "sub/b.sv", "interface b;\nmodule a;\n");

        let project = Project::open(dir.path(), ScanConfig::default()).unwrap();
        let first = ComponentIndex::build(&project).unwrap().to_map();
        let second = ComponentIndex::build(&project).unwrap().to_map();
        assert_eq!(first, second);
        assert_eq!(first.get("a").map(String::as_str), Some("sub/b.sv"));
    }

    #[test]
    fn test_no_design_sources_gives_empty_index() {
        let dir = tempdir().unwrap();
        write(dir.path(), "doc.md", "module in_markdown\n");
        write(dir.path(), "gen.py", "module = 1\n");

        let project = Project::open(dir.path(), ScanConfig::default()).unwrap();
        let index = ComponentIndex::build(&project).unwrap();
        assert!(index.is_empty());
        assert!(index.to_map().is_empty());
    }
}
