//! Free-text and regex search over project files, line by line.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::path::Path;

use super::match_lines;
use crate::error::{QueryError, Result};
use crate::index::SearchResult;
use crate::project::Project;
use crate::scan::{scan_files, Diagnostics};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Compile the query as a regular expression instead of a literal.
    pub use_regex: bool,
    pub case_sensitive: bool,
}

/// Result of a search. When `error` is set the query never ran and
/// `results` is empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    pub error: Option<QueryError>,
    pub diagnostics: Diagnostics,
}

impl SearchOutcome {
    fn rejected(error: QueryError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Decides whether a single line matches the query.
#[derive(Debug)]
pub enum LineMatcher {
    Pattern(Regex),
    Literal { needle: String, case_sensitive: bool },
}

impl LineMatcher {
    pub fn new(query: &str, options: SearchOptions) -> std::result::Result<Self, QueryError> {
        if options.use_regex {
            let regex = RegexBuilder::new(query)
                .case_insensitive(!options.case_sensitive)
                .build()
                .map_err(|e| QueryError::new(query, e))?;
            Ok(LineMatcher::Pattern(regex))
        } else if options.case_sensitive {
            Ok(LineMatcher::Literal {
                needle: query.to_string(),
                case_sensitive: true,
            })
        } else {
            Ok(LineMatcher::Literal {
                needle: query.to_lowercase(),
                case_sensitive: false,
            })
        }
    }

    pub fn is_match(&self, line: &str) -> bool {
        match self {
            LineMatcher::Pattern(regex) => regex.is_match(line),
            LineMatcher::Literal {
                needle,
                case_sensitive: true,
            } => line.contains(needle.as_str()),
            LineMatcher::Literal { needle, .. } => line.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Search every searchable file in the project for `query`.
///
/// An empty query matches nothing and is not an error. An invalid regex is
/// reported through [`SearchOutcome::error`]. Patterns are applied to one
/// physical line at a time, so nothing matches across a line break.
pub fn search(project: &Project, query: &str, options: SearchOptions) -> Result<SearchOutcome> {
    if query.is_empty() {
        return Ok(SearchOutcome::default());
    }
    let matcher = match LineMatcher::new(query, options) {
        Ok(matcher) => matcher,
        Err(e) => {
            tracing::debug!(query, error = %e, "rejected search query");
            return Ok(SearchOutcome::rejected(e));
        }
    };

    let (per_file, diagnostics) =
        scan_files(project, &project.config().search_extensions, |file, text| {
            match_lines(file, text, |line| matcher.is_match(line).then_some(()))
        })?;

    let results: Vec<_> = per_file
        .into_iter()
        .flatten()
        .map(|(_, line)| line)
        .collect();
    tracing::info!(query, results = results.len(), "search complete");

    Ok(SearchOutcome {
        results,
        error: None,
        diagnostics,
    })
}

/// Search a root directory with default configuration. An empty query
/// returns an empty outcome even when the root does not exist.
pub fn search_root(root: &Path, query: &str, options: SearchOptions) -> Result<SearchOutcome> {
    if query.is_empty() {
        return Ok(SearchOutcome::default());
    }
    let project = Project::discover(root)?;
    search(&project, query, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use crate::error::ScanError;
    use std::fs;
    use tempfile::tempdir;

    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("rtl")).unwrap();
        fs::write(
            dir.path().join("rtl/fifo.sv"),
            "module fifo;\n  // TODO: foo overflow\n  logic FOO_EN;\nendmodule\n",
        )
        .unwrap();
        fs::write(dir.path().join("README.md"), "The foo block.\n").unwrap();
        fs::write(dir.path().join("run.tcl"), "foo\n").unwrap();
        dir
    }

    fn open(dir: &tempfile::TempDir) -> Project {
        Project::open(dir.path(), ScanConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_query() {
        let dir = fixture();
        let outcome = search(&open(&dir), "", SearchOptions::default()).unwrap();
        assert!(outcome.results.is_empty());
        assert!(outcome.error.is_none());

        // Any root, even a missing one.
        let outcome = search_root(
            Path::new("/no/such/root"),
            "",
            SearchOptions::default(),
        )
        .unwrap();
        assert!(outcome.results.is_empty());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_invalid_regex_is_reported() {
        let dir = fixture();
        let options = SearchOptions {
            use_regex: true,
            ..Default::default()
        };
        let outcome = search(&open(&dir), "(unclosed", options).unwrap();
        assert!(outcome.results.is_empty());
        let error = outcome.error.expect("invalid regex must be reported");
        assert_eq!(error.pattern, "(unclosed");
        assert!(error.to_string().starts_with("Regex error:"));
    }

    #[test]
    fn test_case_sensitivity() {
        let dir = fixture();
        let project = open(&dir);

        let insensitive = search(&project, "FOO", SearchOptions::default()).unwrap();
        assert!(insensitive
            .results
            .iter()
            .any(|r| r.line_text.contains("foo overflow")));
        assert_eq!(insensitive.results.len(), 3);

        let sensitive = search(
            &project,
            "FOO",
            SearchOptions {
                case_sensitive: true,
                ..Default::default()
            },
        )
        .unwrap();
        let lines: Vec<_> = sensitive.results.iter().map(|r| r.line_text.as_str()).collect();
        assert_eq!(lines, vec!["  logic FOO_EN;"]);
    }

    #[test]
    fn test_results_carry_location() {
        let dir = fixture();
        let outcome = search(&open(&dir), "overflow", SearchOptions::default()).unwrap();
        assert_eq!(outcome.results.len(), 1);
        let hit = &outcome.results[0];
        assert_eq!(hit.file, "rtl/fifo.sv");
        assert_eq!(hit.line_number, 2);
        assert_eq!(hit.line_text, "  // TODO: foo overflow");
    }

    #[test]
    fn test_regex_search() {
        let dir = fixture();
        let project = open(&dir);
        let options = SearchOptions {
            use_regex: true,
            case_sensitive: true,
        };

        let outcome = search(&project, r"^module\s+\w+", options).unwrap();
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].line_number, 1);

        // Case-insensitive regex.
        let outcome = search(
            &project,
            r"foo_en",
            SearchOptions {
                use_regex: true,
                case_sensitive: false,
            },
        )
        .unwrap();
        assert_eq!(outcome.results.len(), 1);
    }

    #[test]
    fn test_no_match_across_lines() {
        let dir = fixture();
        let options = SearchOptions {
            use_regex: true,
            case_sensitive: true,
        };
        let outcome = search(&open(&dir), r"fifo;\s+//", options).unwrap();
        assert!(outcome.results.is_empty());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_markdown_searched_tcl_skipped() {
        let dir = fixture();
        let outcome = search(&open(&dir), "foo", SearchOptions::default()).unwrap();
        let files: Vec<_> = outcome.results.iter().map(|r| r.file.as_str()).collect();
        assert!(files.contains(&"README.md"));
        assert!(!files.contains(&"run.tcl"));
    }

    #[test]
    fn test_search_root_missing() {
        let err = search_root(Path::new("/no/such/root"), "x", SearchOptions::default())
            .unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }
}
