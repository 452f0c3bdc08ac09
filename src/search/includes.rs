//! `` `include "file" `` directive discovery.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::match_lines;
use crate::error::Result;
use crate::index::UsageRecord;
use crate::project::{list_files, Project};
use crate::scan::{scan_files, Diagnostics};

static INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"`include\s*"([^"]+)""#).expect("include pattern is valid"));

#[derive(Debug, Clone, Default, Serialize)]
pub struct IncludeReport {
    /// Included file name to every line that includes it.
    pub includes: BTreeMap<String, Vec<UsageRecord>>,
    /// Included names that match no file under the root, sorted.
    pub unresolved: Vec<String>,
    pub diagnostics: Diagnostics,
}

/// Whether some project file is `name` itself or ends in `/<name>`.
fn resolves(name: &str, files: &[String]) -> bool {
    let suffix = format!("/{}", name);
    files.iter().any(|f| f == name || f.ends_with(&suffix))
}

/// Extract the included name from a line, if the line carries a directive.
/// Only the first directive on a line counts.
pub fn included_name(line: &str) -> Option<&str> {
    INCLUDE_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Collect every `` `include `` directive under the project, grouped by the
/// included name, and flag targets no file under the root provides.
pub fn find_includes(project: &Project) -> Result<IncludeReport> {
    let (per_file, diagnostics) =
        scan_files(project, &project.config().include_extensions, |file, text| {
            match_lines(file, text, |line| included_name(line).map(str::to_string))
        })?;

    let mut includes: BTreeMap<String, Vec<UsageRecord>> = BTreeMap::new();
    for (name, record) in per_file.into_iter().flatten() {
        includes.entry(name).or_default().push(record);
    }

    // Walk failures on this second pass repeat those already recorded.
    let (files, _) = list_files(project)?;
    let unresolved: Vec<String> = includes
        .keys()
        .filter(|name| !resolves(name, &files))
        .cloned()
        .collect();

    tracing::info!(
        included = includes.len(),
        unresolved = unresolved.len(),
        "include scan complete"
    );
    Ok(IncludeReport {
        includes,
        unresolved,
        diagnostics,
    })
}
