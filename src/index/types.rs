//! Result types produced by the engine.
//!
//! Everything here is derived from disk on each call and never persisted.

use serde::Serialize;
use std::fmt;

/// How a design-source file is categorised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    /// RTL / design under test.
    Design,
    /// Testbench infrastructure.
    Testbench,
    /// A test inside a testbench directory.
    Test,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileCategory::Design => write!(f, "design"),
            FileCategory::Testbench => write!(f, "testbench"),
            FileCategory::Test => write!(f, "test"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub relative_path: String,
    pub category: FileCategory,
}

/// The kind of a recognised declaration header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Module,
    Class,
    Interface,
}

impl DeclarationKind {
    pub const ALL: [DeclarationKind; 3] = [
        DeclarationKind::Module,
        DeclarationKind::Class,
        DeclarationKind::Interface,
    ];

    /// The keyword that introduces this declaration.
    pub fn keyword(&self) -> &'static str {
        match self {
            DeclarationKind::Module => "module",
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Module => write!(f, "Module"),
            DeclarationKind::Class => write!(f, "Class"),
            DeclarationKind::Interface => write!(f, "Interface"),
        }
    }
}

/// A module, class or interface header found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    /// Root-relative path of the declaring file.
    pub defining_file: String,
    /// Line of the keyword (1-indexed).
    pub line: usize,
}

/// One line that matched a symbol or a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    /// Root-relative path.
    pub file: String,
    /// 1-indexed.
    pub line_number: usize,
    /// The line without its terminator.
    pub line_text: String,
}

/// An occurrence of an indexed name.
pub type UsageRecord = LineMatch;

/// A line matched by a free-text query.
pub type SearchResult = LineMatch;

/// A symbol together with its references from other files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub symbol_name: String,
    pub kind: DeclarationKind,
    pub defining_file: String,
    pub external_reference_count: usize,
    pub external_references: Vec<UsageRecord>,
}
