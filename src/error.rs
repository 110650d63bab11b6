//! # Error Handling
//!
//! Centralized error type for static-sync, built with `thiserror`. Each
//! variant carries enough context to report a failure at the boundary of the
//! unit it affects: the whole run (configuration), one repository (git), or
//! one file (distribution).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for static-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be found.
    ///
    /// Fatal to the whole run: no repository is processed.
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// An error occurred while parsing the `static.yaml` configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A repository named a host alias that is not in the alias table.
    #[error("Unknown host alias '{alias}' for repository '{repo}'")]
    UnknownHost { alias: String, repo: String },

    /// A git subprocess exited with a non-zero status.
    ///
    /// Fatal to that repository's pipeline only; siblings proceed.
    #[error("git {command} failed in {}: {stderr}", dir.display())]
    GitCommand {
        command: String,
        dir: PathBuf,
        stderr: String,
    },

    /// A git subprocess exceeded the per-operation timeout and was killed.
    #[error("git {command} timed out after {seconds}s in {}", dir.display())]
    GitTimeout {
        command: String,
        dir: PathBuf,
        seconds: u64,
    },

    /// The git binary itself could not be spawned.
    #[error("failed to run git {command}: {message}")]
    GitSpawn { command: String, message: String },

    /// An error scoped to a single file during distribution.
    #[error("Distribution error for {}: {message}", path.display())]
    Distribute { path: PathBuf, message: String },

    /// An error occurred with a path-related operation.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config_not_found() {
        let error = Error::ConfigNotFound {
            path: PathBuf::from("static.yaml"),
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration file not found"));
        assert!(display.contains("static.yaml"));
    }

    #[test]
    fn test_error_display_config_parse() {
        let error = Error::ConfigParse {
            message: "repos must be a mapping".to_string(),
            hint: None,
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("repos must be a mapping"));
    }

    #[test]
    fn test_error_display_config_parse_with_hint() {
        let error = Error::ConfigParse {
            message: "missing file map".to_string(),
            hint: Some("add a 'file:' block to the repo entry".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("hint:"));
        assert!(display.contains("add a 'file:'"));
    }

    #[test]
    fn test_error_display_unknown_host() {
        let error = Error::UnknownHost {
            alias: "gothib".to_string(),
            repo: "owner/widget".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unknown host alias 'gothib'"));
        assert!(display.contains("owner/widget"));
    }

    #[test]
    fn test_error_display_git_command() {
        let error = Error::GitCommand {
            command: "fetch --all".to_string(),
            dir: PathBuf::from("/tmp/ws/widget"),
            stderr: "could not resolve host".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("git fetch --all failed"));
        assert!(display.contains("/tmp/ws/widget"));
        assert!(display.contains("could not resolve host"));
    }

    #[test]
    fn test_error_display_git_timeout() {
        let error = Error::GitTimeout {
            command: "clone".to_string(),
            dir: PathBuf::from("/tmp/ws"),
            seconds: 300,
        };
        let display = format!("{}", error);
        assert!(display.contains("timed out after 300s"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_error =
            serde_yaml::from_str::<serde_yaml::Value>("invalid: [unclosed").unwrap_err();
        let error: Error = yaml_error.into();
        let display = format!("{}", error);
        assert!(display.contains("YAML parsing error"));
    }
}
