//! Declaration index, reference scanning and the dependency view.
//!
//! Data flows one way: classify → extract → component index → usages →
//! dependency edges. Each stage returns a plain value that the next stage
//! takes as input.

pub mod classify;
pub mod components;
pub mod deps;
pub mod extract;
pub mod types;
pub mod usage;

pub use classify::{categorize, classify, ClassifiedFiles};
pub use components::{Collision, ComponentIndex};
pub use deps::{external_edges, external_usages, DependencyReport};
pub use extract::{extract, extract_file};
pub use types::{
    Declaration, DeclarationKind, DependencyEdge, FileCategory, FileRecord, LineMatch,
    SearchResult, UsageRecord,
};
pub use usage::{find_usages, UsageReport};
