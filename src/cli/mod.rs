//! Command-line surface for `vescan`.
//!
//! Commands:
//! - Listing: files, classify, components, locate
//! - References: usages, deps, includes
//! - Text: search, view

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ScanConfig;
use crate::error::{Result, ScanError};

#[derive(Parser, Debug)]
#[command(name = "vescan")]
#[command(about = "Lexical code intelligence for SystemVerilog projects")]
#[command(override_help = HELP_TEXT)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Use a named environment from the root's config instead of --root
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

const HELP_TEXT: &str = "
vescan - lexical code intelligence for SystemVerilog projects

Listing:
  files                 Every file under the root
  classify              Design / testbench / test split
  components [--all]    Declared modules, classes, interfaces
  locate <file_name>    Find a file by name

References:
  usages <names..>      Word-boundary references to names
  deps                  Symbols used outside their own file
  includes              `include directives by target

Text:
  search <query>        Line search (--regex, --case-sensitive)
  view <path>           Print a file inside the root

Options:
  -r, --root <PATH>     Project root (default: .)
  -e, --env <ID>        Named environment from .vescan/config.toml
      --json            JSON output
  -v, --verbose         Debug logging
";

#[derive(Subcommand, Debug)]
pub enum Commands {
    // ─── Listing ──────────────────────────────────────────────────
    /// List every file under the root
    Files,

    /// Split design sources into design, testbench and test files
    Classify,

    /// Show the component index
    Components {
        /// Show every declaration, duplicates included
        #[arg(long)]
        all: bool,
    },

    /// Find the first file with this exact name
    Locate {
        file_name: String,
    },

    // ─── References ───────────────────────────────────────────────
    /// Find word-boundary references to one or more names
    Usages {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Symbols referenced outside the file that declares them
    Deps,

    /// List `include directives grouped by included file
    Includes,

    // ─── Text ─────────────────────────────────────────────────────
    /// Search file contents line by line
    Search {
        query: String,

        /// Treat the query as a regular expression
        #[arg(long)]
        regex: bool,

        #[arg(long)]
        case_sensitive: bool,
    },

    /// Print a file, refusing paths outside the root
    View {
        path: PathBuf,
    },
}

impl Cli {
    /// The project root to scan: `--env` when given, otherwise `--root`.
    ///
    /// Environments are read from `--root`'s config. A relative environment
    /// path is taken relative to that root.
    pub fn project_root(&self) -> Result<PathBuf> {
        let Some(id) = &self.env else {
            return Ok(self.root.clone());
        };
        let config = ScanConfig::try_load(&ScanConfig::path_for(&self.root))?;
        let env = config
            .environment(id)
            .ok_or_else(|| ScanError::Config(format!("unknown environment '{}'", id)))?;
        Ok(if env.path.is_absolute() {
            env.path.clone()
        } else {
            self.root.join(&env.path)
        })
    }

    /// Default log filter for this invocation.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "vescan=debug"
        } else {
            "vescan=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_search_flags() {
        let cli = Cli::try_parse_from([
            "vescan",
            "search",
            "fifo_.*",
            "--regex",
            "--case-sensitive",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Search {
                query,
                regex,
                case_sensitive,
            } => {
                assert_eq!(query, "fifo_.*");
                assert!(regex);
                assert!(case_sensitive);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_usages_requires_names() {
        assert!(Cli::try_parse_from(["vescan", "usages"]).is_err());
        let cli = Cli::try_parse_from(["vescan", "usages", "Foo", "Bar"]).unwrap();
        assert!(matches!(cli.command, Commands::Usages { names } if names == ["Foo", "Bar"]));
    }

    #[test]
    fn test_root_defaults_to_cwd() {
        let cli = Cli::try_parse_from(["vescan", "deps"]).unwrap();
        assert_eq!(cli.project_root().unwrap(), PathBuf::from("."));
        assert_eq!(cli.log_filter(), "vescan=info");
    }

    #[test]
    fn test_env_resolves_from_config() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(crate::config::CONFIG_DIR)).unwrap();
        fs::write(
            ScanConfig::path_for(dir.path()),
            "[[environments]]\nid = \"ip\"\nname = \"FIFO IP\"\npath = \"blocks/fifo\"\n",
        )
        .unwrap();
        let root = dir.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["vescan", "-r", root, "-e", "ip", "files"]).unwrap();
        assert_eq!(cli.project_root().unwrap(), dir.path().join("blocks/fifo"));

        let cli = Cli::try_parse_from(["vescan", "-r", root, "-e", "nope", "files"]).unwrap();
        assert!(matches!(cli.project_root(), Err(ScanError::Config(_))));
    }
}
