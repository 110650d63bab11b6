//! # CLI Command Implementations
//!
//! One module per subcommand. Each defines a clap `Args` struct and an
//! `execute` function that calls into the `static_sync` library.

pub mod clear;
pub mod completions;
pub mod sync;

use static_sync::output::OutputConfig;

/// Build the output configuration from the global `--color` flag.
pub fn output_config(color_flag: &str) -> OutputConfig {
    OutputConfig::from_env_and_flag(color_flag)
}
