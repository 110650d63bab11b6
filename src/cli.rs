//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// static-sync - Sync static assets from external git repositories
#[derive(Parser, Debug)]
#[command(name = "static-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sync all configured repositories and distribute their files
    Sync(commands::sync::SyncArgs),
    /// Delete the temporary workspace, forcing re-clones on the next sync
    Clear(commands::clear::ClearArgs),
    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let level = self
            .log_level
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Info);
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(level)
            .format_timestamp(None)
            .init();

        let output = crate::commands::output_config(&self.color);

        match self.command {
            Commands::Sync(args) => commands::sync::execute(args, &output),
            Commands::Clear(args) => commands::clear::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
