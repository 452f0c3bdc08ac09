//! External-reference view: which indexed symbols are used outside the file
//! that declares them.

use serde::Serialize;

use super::components::ComponentIndex;
use super::types::DependencyEdge;
use super::usage::{find_usages, UsageReport};
use crate::error::Result;
use crate::project::Project;
use crate::scan::Diagnostics;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyReport {
    /// Sorted by symbol name. Symbols with no external references are absent.
    pub edges: Vec<DependencyEdge>,
    pub diagnostics: Diagnostics,
}

/// Filter usages down to those outside each symbol's defining file.
pub fn external_edges(index: &ComponentIndex, usages: &UsageReport) -> Vec<DependencyEdge> {
    let mut edges = Vec::new();
    for (name, records) in &usages.usages {
        let Some(decl) = index.get(name) else {
            continue;
        };
        let external: Vec<_> = records
            .iter()
            .filter(|r| r.file != decl.defining_file)
            .cloned()
            .collect();
        if external.is_empty() {
            continue;
        }
        edges.push(DependencyEdge {
            symbol_name: name.clone(),
            kind: decl.kind,
            defining_file: decl.defining_file.clone(),
            external_reference_count: external.len(),
            external_references: external,
        });
    }
    edges
}

/// Build the component index, scan for every indexed name, and keep the
/// symbols referenced from another file.
pub fn external_usages(project: &Project) -> Result<DependencyReport> {
    let index = ComponentIndex::build(project)?;
    let usages = find_usages(project, index.names())?;

    let edges = external_edges(&index, &usages);
    let mut diagnostics = index.diagnostics.clone();
    diagnostics.extend(usages.diagnostics);

    tracing::info!(edges = edges.len(), "dependency view built");
    Ok(DependencyReport { edges, diagnostics })
}
