//! Scanner configuration, loaded from `.vescan/config.toml`.
//!
//! Every field has a default, so a missing file (or a file that only sets a
//! couple of keys) still produces a complete configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{Result, ScanError};

pub const CONFIG_DIR: &str = ".vescan";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extensions treated as design sources (classified and indexed).
    pub design_extensions: Vec<String>,
    /// Extensions scanned for symbol references.
    pub reference_extensions: Vec<String>,
    /// Extensions scanned by free-text search.
    pub search_extensions: Vec<String>,
    /// Extensions scanned for `` `include `` directives.
    pub include_extensions: Vec<String>,
    /// Directory-name fragments that mark testbench code.
    pub testbench_markers: Vec<String>,
    /// File-name fragments that mark a testbench file as a test.
    pub test_file_markers: Vec<String>,
    /// Maximum directory depth; `None` walks without bound.
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    pub respect_gitignore: bool,
    pub include_hidden: bool,
    /// Named project roots a front end can pick from.
    pub environments: Vec<Environment>,
}

/// A named project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub path: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let reference_extensions = strings(&["sv", "v", "vh", "svh", "svt", "h", "py", "txt"]);
        let mut search_extensions = reference_extensions.clone();
        search_extensions.push("md".to_string());

        Self {
            design_extensions: strings(&["sv", "v"]),
            reference_extensions,
            search_extensions,
            include_extensions: strings(&[
                "sv", "v", "vh", "svh", "svt", "vhf", "vhpp", "svs", "svm",
            ]),
            testbench_markers: strings(&["tb", "test"]),
            test_file_markers: strings(&["_test.sv", "_tests.sv"]),
            max_depth: Some(64),
            follow_links: false,
            respect_gitignore: false,
            include_hidden: true,
            environments: Vec::new(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ScanConfig {
    /// Load config from `path`, falling back to defaults when the file is
    /// missing or invalid.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default config");
                Self::default()
            }
        }
    }

    /// Load config from `path`. A missing file is not an error.
    pub fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ScanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Default config location for a project root.
    pub fn path_for(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Look up a configured environment by id.
    pub fn environment(&self, id: &str) -> Option<&Environment> {
        self.environments.iter().find(|env| env.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_extension_sets() {
        let config = ScanConfig::default();
        assert_eq!(config.design_extensions, vec!["sv", "v"]);
        assert!(config.reference_extensions.contains(&"svh".to_string()));
        assert!(!config.reference_extensions.contains(&"md".to_string()));
        assert!(config.search_extensions.contains(&"md".to_string()));
        assert_eq!(
            config.search_extensions.len(),
            config.reference_extensions.len() + 1
        );
    }

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempdir().unwrap();
        let config = ScanConfig::load(&ScanConfig::path_for(dir.path()));
        assert_eq!(config.max_depth, Some(64));
        assert!(config.environments.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
max_depth = 8

[[environments]]
id = "fifo_project"
name = "FIFO Project"
path = "/work/fifo"
"#,
        )
        .unwrap();

        let config = ScanConfig::try_load(&path).unwrap();
        assert_eq!(config.max_depth, Some(8));
        assert_eq!(config.design_extensions, vec!["sv", "v"]);

        let env = config.environment("fifo_project").unwrap();
        assert_eq!(env.name, "FIFO Project");
        assert_eq!(env.path, PathBuf::from("/work/fifo"));
        assert!(config.environment("missing").is_none());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_depth = \"deep\"").unwrap();

        assert!(matches!(
            ScanConfig::try_load(&path),
            Err(ScanError::Config(_))
        ));
        // The lenient loader falls back.
        assert_eq!(ScanConfig::load(&path).max_depth, Some(64));
    }
}
