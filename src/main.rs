//! # static-sync CLI
//!
//! Binary entry point. Parses arguments with `clap` and dispatches to the
//! command implementations; the core logic lives in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
