//! Sync command implementation
//!
//! Loads `static.yaml`, then runs the full pipeline for every configured
//! repository in parallel: resolve identity, pre-scan destinations for local
//! edits, clone or fetch+reset/pull, distribute files. All pipelines run to
//! completion before the command reports; a failing repository does not
//! abort its siblings, but it does make the exit status non-zero.

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;
use std::time::Duration;

use static_sync::config;
use static_sync::coordinator;
use static_sync::git::SystemGit;
use static_sync::output::OutputConfig;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to config file (defaults to static.yaml in the project root)
    #[arg(short, long, value_name = "PATH", env = "STATIC_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project root directory (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "PATH")]
    pub project_root: Option<PathBuf>,

    /// Only distribute files whose name matches one of these glob patterns
    #[arg(long, value_name = "PATTERN")]
    pub only: Vec<String>,

    /// Per-git-operation timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 300)]
    pub timeout: u64,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the sync command
pub fn execute(args: SyncArgs, output: &OutputConfig) -> Result<()> {
    let project_root = match args.project_root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    let config_path = args
        .config
        .unwrap_or_else(|| project_root.join(config::CONFIG_FILE));

    let config = config::from_file(&config_path)?;
    if config.repos.is_empty() {
        if !args.quiet {
            println!("Nothing to sync: no repositories configured.");
        }
        return Ok(());
    }

    let git = SystemGit::new(Duration::from_secs(args.timeout));
    let report = coordinator::sync_all(&config, &project_root, &git, &args.only)?;

    if !args.quiet {
        for outcome in &report.outcomes {
            match &outcome.result {
                Ok(summary) => {
                    let marker = output.status(&style("ok").green().to_string(), "ok");
                    println!(
                        "  {}  {} ({} copied, {} unchanged, {} ignored)",
                        marker,
                        outcome.name,
                        summary.stats.copied,
                        summary.stats.unchanged,
                        summary.stats.ignored
                    );
                }
                Err(e) => {
                    let marker = output.status(&style("failed").red().to_string(), "failed");
                    println!("  {}  {}: {}", marker, outcome.name, e);
                }
            }
        }
    }

    let failures = report.failures();
    if !failures.is_empty() {
        anyhow::bail!(
            "{} of {} repositories failed: {}",
            failures.len(),
            report.outcomes.len(),
            failures.join(", ")
        );
    }

    Ok(())
}
