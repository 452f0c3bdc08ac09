//! vescan CLI - lexical code intelligence for SystemVerilog projects.
//!
//! Usage:
//!   vescan files                     # Every file under the root
//!   vescan classify                  # Design / testbench / test split
//!   vescan components [--all]        # Component index
//!   vescan usages <names..>          # References to names
//!   vescan deps                      # Cross-file dependencies
//!   vescan search <query> [--regex]  # Line search
//!   vescan includes                  # `include directives
//!   vescan view <path>               # Print a file inside the root
//!   vescan locate <file_name>        # Find a file by name

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use vescan::cli::{Cli, Commands};
use vescan::{
    classify, external_usages, find_file, find_includes, find_usages, list_files,
    read_project_file, search, ComponentIndex, Diagnostics, Project, SearchOptions,
};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for results.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = cli.project_root()?;
    let project = Project::discover(&root)
        .with_context(|| format!("cannot open project at {}", root.display()))?;
    let json = cli.json;

    match cli.command {
        Commands::Files => {
            let (files, diagnostics) = list_files(&project)?;
            if json {
                print_json(&serde_json::json!({ "files": files, "diagnostics": diagnostics }))?;
            } else {
                for file in &files {
                    println!("{}", file);
                }
                warn_skipped(&diagnostics);
            }
        }

        Commands::Classify => {
            let classified = classify(&project)?;
            if json {
                print_json(&classified)?;
            } else {
                for record in classified.records() {
                    println!("{:<10} {}", record.category.to_string(), record.relative_path);
                }
                warn_skipped(&classified.diagnostics);
            }
        }

        Commands::Components { all } => {
            let index = ComponentIndex::build(&project)?;
            if json {
                if all {
                    print_json(&index.declarations())?;
                } else {
                    print_json(&serde_json::json!({
                        "components": index.to_map(),
                        "collisions": index.collisions(),
                        "diagnostics": index.diagnostics,
                    }))?;
                }
            } else {
                if all {
                    for decl in index.declarations() {
                        println!(
                            "{:<10} {:<32} {}:{}",
                            decl.kind.to_string(),
                            decl.name,
                            decl.defining_file,
                            decl.line
                        );
                    }
                } else {
                    for (name, file) in index.definitions() {
                        println!("{:<32} {}", name, file);
                    }
                    for collision in index.collisions() {
                        eprintln!(
                            "warning: '{}' declared in {}; using the last",
                            collision.name,
                            collision.files.join(", ")
                        );
                    }
                }
                warn_skipped(&index.diagnostics);
            }
        }

        Commands::Locate { file_name } => match find_file(&project, &file_name)? {
            Some(path) => {
                if json {
                    print_json(&serde_json::json!({ "file": path }))?;
                } else {
                    println!("{}", path);
                }
            }
            None => bail!("no file named '{}' under {}", file_name, root.display()),
        },

        Commands::Usages { names } => {
            let report = find_usages(&project, names)?;
            if json {
                print_json(&report)?;
            } else {
                for (name, records) in &report.usages {
                    println!("{} ({} usages)", name, records.len());
                    for r in records {
                        println!("  {}:{}: {}", r.file, r.line_number, r.line_text.trim());
                    }
                }
                warn_skipped(&report.diagnostics);
            }
        }

        Commands::Deps => {
            let report = external_usages(&project)?;
            if json {
                print_json(&report)?;
            } else {
                for edge in &report.edges {
                    println!(
                        "{} {} ({}) <- {} external references",
                        edge.kind, edge.symbol_name, edge.defining_file, edge.external_reference_count
                    );
                    for r in &edge.external_references {
                        println!("  {}:{}", r.file, r.line_number);
                    }
                }
                warn_skipped(&report.diagnostics);
            }
        }

        Commands::Includes => {
            let report = find_includes(&project)?;
            if json {
                print_json(&report)?;
            } else {
                for (included, records) in &report.includes {
                    if report.unresolved.contains(included) {
                        println!("{}  (not found under root)", included);
                    } else {
                        println!("{}", included);
                    }
                    for r in records {
                        println!("  {}:{}", r.file, r.line_number);
                    }
                }
                warn_skipped(&report.diagnostics);
            }
        }

        Commands::Search {
            query,
            regex,
            case_sensitive,
        } => {
            let options = SearchOptions {
                use_regex: regex,
                case_sensitive,
            };
            let outcome = search(&project, &query, options)?;
            if json {
                print_json(&outcome)?;
            } else {
                if let Some(error) = outcome.error {
                    bail!(error);
                }
                for r in &outcome.results {
                    println!("{}:{}: {}", r.file, r.line_number, r.line_text);
                }
                warn_skipped(&outcome.diagnostics);
            }
        }

        Commands::View { path } => {
            let text = read_project_file(&project, &path)
                .with_context(|| format!("cannot view {}", path.display()))?;
            if json {
                print_json(&serde_json::json!({ "path": path, "content": text }))?;
            } else {
                print!("{}", text);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn warn_skipped(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!("warning: {}", diagnostics);
    for diagnostic in diagnostics.iter() {
        tracing::debug!(%diagnostic, "skipped");
    }
}
