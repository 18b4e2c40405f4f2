//! `project-tree` CLI.
//!
//! Scans a project directory and prints its structure as JSON, writing the
//! `project_structure.json` sidecar into the scanned root by default.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use project_tree::{ResultSource, ScanOptions, cache, scan};
use std::path::PathBuf;

mod paths;

#[derive(Parser)]
#[command(name = "project-tree")]
#[command(about = "Generate a JSON representation of a directory tree")]
#[command(version)]
#[command(arg_required_else_help = true)]
#[command(group(ArgGroup::new("target").required(true).args(["root", "root_flag"])))]
struct Cli {
    /// Root directory to scan
    root: Option<PathBuf>,

    /// Root directory to scan (alternative to the positional argument)
    #[arg(short = 'r', long = "root", value_name = "DIR", conflicts_with = "root")]
    root_flag: Option<PathBuf>,

    /// Do not read <root>/.gitignore for extra ignored names
    #[arg(long, env = "PROJECT_TREE_NO_GITIGNORE")]
    no_gitignore: bool,

    /// Reuse <root>/project_structure.json if it exists instead of rescanning
    #[arg(long, env = "PROJECT_TREE_USE_CACHE")]
    use_cache: bool,

    /// Do not write <root>/project_structure.json
    #[arg(long, env = "PROJECT_TREE_NO_WRITE")]
    no_write: bool,

    /// Do not print the tree to stdout
    #[arg(short, long)]
    quiet: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> ScanOptions {
        ScanOptions::new()
            .follow_ignore_file(!self.no_gitignore)
            .force_regenerate(!self.use_cache)
            .write_result(!self.no_write)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity; stdout is reserved for JSON
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(root) = cli.root.as_ref().or(cli.root_flag.as_ref()) else {
        anyhow::bail!("a root directory is required");
    };

    let root = paths::expand_tilde(root)?;
    let outcome = scan(&root, &cli.options())
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    match outcome.source {
        ResultSource::Cache => {
            tracing::info!("Loaded cached structure from {}", outcome.cache_path.display());
        }
        ResultSource::Walked => {
            tracing::info!(
                "Scanned {} entries ({} warnings)",
                outcome.result.iter().count(),
                outcome.warnings.len()
            );
        }
    }

    if !cli.quiet {
        println!("{}", cache::to_pretty_json(&outcome.result)?);
    }

    Ok(())
}
