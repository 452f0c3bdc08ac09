//! # ve-scan
//!
//! Lexical code intelligence for SystemVerilog/Verilog projects.
//!
//! Every query re-walks the project tree. Nothing is cached or persisted, so
//! results always reflect what is on disk right now.
//!
//! ## Operations
//!
//! - **classify**: split design sources into design, testbench and test files
//! - **extract**: module/class/interface headers from one file's text
//! - **component index**: name → defining file over the whole project
//! - **usages**: word-boundary references to a set of names
//! - **search**: literal or regex, line by line
//! - **dependency view**: symbols referenced outside their own file
//! - **includes**: `` `include `` directives grouped by target
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vescan::{external_usages, search, Project, SearchOptions};
//!
//! let project = Project::discover("/work/my_ip")?;
//!
//! for edge in external_usages(&project)?.edges {
//!     println!("{} ({}) used {} times", edge.symbol_name, edge.defining_file,
//!         edge.external_reference_count);
//! }
//!
//! let outcome = search(&project, "fifo_full", SearchOptions::default())?;
//! println!("{} hits", outcome.results.len());
//! # Ok::<(), vescan::ScanError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod project;
pub mod scan;
pub mod search;

pub use error::{QueryError, Result, ScanError};

pub use config::{Environment, ScanConfig};
pub use project::{find_file, list_files, read_project_file, resolve_within_root, Project};
pub use scan::{Diagnostic, Diagnostics, ScanStage};

pub use index::{
    categorize, classify, extract, extract_file, external_edges, external_usages, find_usages,
    ClassifiedFiles, Collision, ComponentIndex, Declaration, DeclarationKind, DependencyEdge,
    DependencyReport, FileCategory, FileRecord, LineMatch, SearchResult, UsageRecord, UsageReport,
};
pub use search::{find_includes, search, search_root, IncludeReport, SearchOptions, SearchOutcome};
