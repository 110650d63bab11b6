//! Clear command implementation
//!
//! Deletes the entire temporary workspace root (`.statictmp/`). The next
//! sync re-clones every remote repository from scratch. Distributed files in
//! the project tree are untouched.

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;

use static_sync::output::OutputConfig;
use static_sync::workspace::WorkspacePaths;

/// Arguments for the clear command
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Project root directory (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "PATH")]
    pub project_root: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the clear command
pub fn execute(args: ClearArgs, output: &OutputConfig) -> Result<()> {
    let project_root = match args.project_root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    let paths = WorkspacePaths::new(&project_root);
    let existed = paths.root().exists();
    paths.clear()?;

    if !args.quiet {
        let marker = output.status(&style("ok").green().to_string(), "ok");
        if existed {
            println!("  {}  removed {}", marker, paths.root().display());
        } else {
            println!("  {}  nothing to clear", marker);
        }
    }

    Ok(())
}
