//! Line-oriented search and `` `include `` discovery.

pub mod includes;
pub mod text;

pub use includes::{find_includes, IncludeReport};
pub use text::{search, search_root, LineMatcher, SearchOptions, SearchOutcome};

use crate::index::LineMatch;
use crate::scan::SourceFile;

/// Run `select` over each line of `text`, keeping the lines it accepts along
/// with whatever it extracted from them.
pub(crate) fn match_lines<T, F>(file: &SourceFile, text: &str, select: F) -> Vec<(T, LineMatch)>
where
    F: Fn(&str) -> Option<T>,
{
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            select(line).map(|value| {
                (
                    value,
                    LineMatch {
                        file: file.relative.clone(),
                        line_number: idx + 1,
                        line_text: line.to_string(),
                    },
                )
            })
        })
        .collect()
}
