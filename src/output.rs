//! # Output Configuration
//!
//! Controls whether CLI output uses color, based on the `--color` flag and
//! the usual environment conventions (`NO_COLOR`, `CLICOLOR`,
//! `CLICOLOR_FORCE`, `TERM=dumb`, TTY detection via `console`).

use std::env;

/// Output configuration for the CLI.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `--color=always` forces colors on (overriding NO_COLOR),
    /// `--color=never` forces them off, and `auto` detects from the
    /// environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even empty) disables colors.
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Style a status marker: colored when enabled, plain otherwise.
    pub fn status(&self, colored: &str, plain: &str) -> String {
        if self.use_color {
            colored.to_string()
        } else {
            plain.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_enables_color() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_never_disables_color() {
        let config = OutputConfig::from_env_and_flag("never");
        assert!(!config.use_color);
    }

    #[test]
    fn test_flag_is_case_insensitive() {
        assert!(OutputConfig::from_env_and_flag("ALWAYS").use_color);
        assert!(!OutputConfig::from_env_and_flag("Never").use_color);
    }

    #[test]
    fn test_status_picks_variant() {
        let color = OutputConfig { use_color: true };
        let plain = OutputConfig { use_color: false };
        assert_eq!(color.status("\u{1b}[32mok\u{1b}[0m", "[ok]"), "\u{1b}[32mok\u{1b}[0m");
        assert_eq!(plain.status("\u{1b}[32mok\u{1b}[0m", "[ok]"), "[ok]");
    }
}
