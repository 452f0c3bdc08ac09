//! Word-boundary reference scanning for a set of names.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

use super::types::{LineMatch, UsageRecord};
use crate::error::{Result, ScanError};
use crate::project::Project;
use crate::scan::{scan_files, Diagnostics};

/// Compiled size limit for the combined name pattern. Large projects index
/// thousands of names, well past the regex crate's default.
const PATTERN_SIZE_LIMIT: usize = 256 * (1 << 20);

/// Usages per requested name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsageReport {
    /// Every requested name is present, possibly with an empty list. Records
    /// are in traversal order, then line order, then column order.
    pub usages: BTreeMap<String, Vec<UsageRecord>>,
    pub diagnostics: Diagnostics,
}

impl UsageReport {
    pub fn get(&self, name: &str) -> &[UsageRecord] {
        self.usages.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total records across all names.
    pub fn total(&self) -> usize {
        self.usages.values().map(Vec::len).sum()
    }
}

/// One alternation of all names, anchored on word boundaries, so each line
/// is scanned once however many names are requested.
fn names_pattern(names: &BTreeSet<String>) -> Result<Regex> {
    let alternation = names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"\b(?:{})\b", alternation);
    RegexBuilder::new(&pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| ScanError::query(&pattern, e))
}

/// Find every word-boundary occurrence of each name under the project.
///
/// A name occurring N times on a line yields N records. Occurrences in the
/// declaring file are included; filtering those out is the dependency
/// view's job. Empty names are ignored.
pub fn find_usages<I, S>(project: &Project, names: I) -> Result<UsageReport>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: BTreeSet<String> = names
        .into_iter()
        .map(Into::into)
        .filter(|n: &String| !n.is_empty())
        .collect();

    let mut report = UsageReport {
        usages: names.iter().map(|n| (n.clone(), Vec::new())).collect(),
        diagnostics: Diagnostics::new(),
    };
    if names.is_empty() {
        return Ok(report);
    }

    let pattern = names_pattern(&names)?;
    let (per_file, diagnostics) =
        scan_files(project, &project.config().reference_extensions, |file, text| {
            let mut hits = Vec::new();
            for (idx, line) in text.lines().enumerate() {
                for m in pattern.find_iter(line) {
                    hits.push((
                        m.as_str().to_string(),
                        LineMatch {
                            file: file.relative.clone(),
                            line_number: idx + 1,
                            line_text: line.to_string(),
                        },
                    ));
                }
            }
            hits
        })?;

    for (name, record) in per_file.into_iter().flatten() {
        if let Some(records) = report.usages.get_mut(&name) {
            records.push(record);
        }
    }
    report.diagnostics = diagnostics;

    info!(
        names = names.len(),
        usages = report.total(),
        skipped = report.diagnostics.len(),
        "usage scan complete"
    );
    Ok(report)
}
