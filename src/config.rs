//! # Configuration Schema and Parsing
//!
//! This module defines the structures that represent the `static.yaml`
//! configuration file and the logic for parsing it.
//!
//! The document shape is:
//!
//! ```yaml
//! host: github              # optional default host alias
//! hostDict:                 # optional alias -> URL prefix overrides
//!   mycorp: "https://git.mycorp.example/"
//! repos:
//!   owner/widget:
//!     host: github          # optional; "local" treats the name as a path
//!     url: https://...      # optional, used verbatim when present
//!     tag: v1.2.0           # optional pinned revision
//!     commit: abc123        # optional; tag wins when both are given
//!     file:
//!       /lib/widget.js: /vendor/widget.js
//! ```
//!
//! Parsing goes through raw `serde_yaml` values rather than derived structs
//! so that the document order of `repos` and of each `file` map is preserved,
//! and so that the tag-before-commit precedence is resolved exactly once at
//! load time instead of being re-derived throughout the pipeline.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Conventional configuration file name, looked up in the project root.
pub const CONFIG_FILE: &str = "static.yaml";

/// One `src -> dst` entry of a repository's file map.
///
/// A trailing path separator on either side marks that side as a directory
/// rather than a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
    /// Path inside the repository workspace, relative to its root.
    pub src: String,
    /// Destination path relative to the project root.
    pub dst: String,
}

/// One configured dependency: where to fetch it and what to distribute.
#[derive(Debug, Clone)]
pub struct RepoSpec {
    /// Unique key within the configuration; may embed an owner segment
    /// (e.g. `owner/widget`).
    pub name: String,
    /// Host alias selecting a URL template, or `local` to treat `name` as a
    /// filesystem path. Falls back to the config-level default when absent.
    pub host: Option<String>,
    /// Explicit clone URL, used verbatim and skipping host resolution.
    pub url: Option<String>,
    /// Pinned tag or commit, already resolved with tag-before-commit
    /// precedence. `None` means track the default branch.
    pub revision: Option<String>,
    /// Ordered file map, resolved relative to the workspace root and the
    /// project root respectively.
    pub files: Vec<FileMapping>,
}

/// The parsed `static.yaml` document.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Default host alias applied to repos without an explicit `host`.
    pub host: Option<String>,
    /// User host table, merged over the builtin aliases (override wins).
    pub host_dict: HashMap<String, String>,
    /// All configured repositories in document order.
    pub repos: Vec<RepoSpec>,
}

/// Parses a YAML string into a `Config`.
pub fn parse(yaml_content: &str) -> Result<Config> {
    use serde_yaml::Value;

    let doc: Value = serde_yaml::from_str(yaml_content).map_err(Error::Yaml)?;
    let map = match doc {
        Value::Null => return Ok(Config::default()),
        Value::Mapping(map) => map,
        _ => {
            return Err(Error::ConfigParse {
                message: "top-level document must be a mapping".to_string(),
                hint: Some("expected keys: host, hostDict, repos".to_string()),
            });
        }
    };

    let mut config = Config::default();

    for (key, value) in map {
        let key = key.as_str().ok_or_else(|| Error::ConfigParse {
            message: "top-level keys must be strings".to_string(),
            hint: None,
        })?;

        match key {
            "host" => {
                config.host = Some(expect_str(&value, "host")?.to_string());
            }
            "hostDict" => {
                let dict = expect_mapping(value, "hostDict")?;
                for (alias, prefix) in dict {
                    let alias = alias
                        .as_str()
                        .ok_or_else(|| Error::ConfigParse {
                            message: "hostDict aliases must be strings".to_string(),
                            hint: None,
                        })?
                        .to_string();
                    let prefix = expect_str(&prefix, "hostDict entry")?.to_string();
                    config.host_dict.insert(alias, prefix);
                }
            }
            "repos" => {
                let repos = expect_mapping(value, "repos")?;
                for (name, body) in repos {
                    let name = name
                        .as_str()
                        .ok_or_else(|| Error::ConfigParse {
                            message: "repository names must be strings".to_string(),
                            hint: None,
                        })?
                        .to_string();
                    config.repos.push(parse_repo(name, body)?);
                }
            }
            other => {
                return Err(Error::ConfigParse {
                    message: format!("unknown top-level key: {}", other),
                    hint: Some("expected keys: host, hostDict, repos".to_string()),
                });
            }
        }
    }

    Ok(config)
}

/// Convert one `repos` entry into a `RepoSpec`.
///
/// `tag` takes precedence over `commit`; both optional. An absent or null
/// body is a repository with defaults only (default host, no pinned
/// revision, nothing to distribute).
fn parse_repo(name: String, body: serde_yaml::Value) -> Result<RepoSpec> {
    use serde_yaml::Value;

    if name.is_empty() {
        return Err(Error::ConfigParse {
            message: "repository name must not be empty".to_string(),
            hint: None,
        });
    }

    let mut spec = RepoSpec {
        name: name.clone(),
        host: None,
        url: None,
        revision: None,
        files: Vec::new(),
    };

    let map = match body {
        Value::Null => return Ok(spec),
        Value::Mapping(map) => map,
        _ => {
            return Err(Error::ConfigParse {
                message: format!("repository '{}' must be a mapping", name),
                hint: None,
            });
        }
    };

    let mut tag = None;
    let mut commit = None;

    for (key, value) in map {
        let key = key.as_str().ok_or_else(|| Error::ConfigParse {
            message: format!("keys of repository '{}' must be strings", name),
            hint: None,
        })?;

        match key {
            "host" => spec.host = Some(expect_str(&value, "host")?.to_string()),
            "url" => spec.url = Some(expect_str(&value, "url")?.to_string()),
            "tag" => tag = Some(expect_str(&value, "tag")?.to_string()),
            "commit" => commit = Some(expect_str(&value, "commit")?.to_string()),
            "file" => {
                let files = expect_mapping(value, "file")?;
                for (src, dst) in files {
                    let src = expect_str(&src, "file source")?.to_string();
                    let dst = expect_str(&dst, "file destination")?.to_string();
                    spec.files.push(FileMapping { src, dst });
                }
            }
            other => {
                return Err(Error::ConfigParse {
                    message: format!("unknown key '{}' in repository '{}'", other, name),
                    hint: Some("expected keys: host, url, tag, commit, file".to_string()),
                });
            }
        }
    }

    // Pinned-revision precedence, resolved once here.
    spec.revision = tag.or(commit);

    Ok(spec)
}

fn expect_str<'a>(value: &'a serde_yaml::Value, what: &str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| Error::ConfigParse {
        message: format!("{} must be a string", what),
        hint: None,
    })
}

fn expect_mapping(value: serde_yaml::Value, what: &str) -> Result<serde_yaml::Mapping> {
    match value {
        serde_yaml::Value::Mapping(map) => Ok(map),
        _ => Err(Error::ConfigParse {
            message: format!("{} must be a mapping", what),
            hint: None,
        }),
    }
}

/// Parse a `Config` from a YAML file path.
///
/// A missing file is a [`Error::ConfigNotFound`], fatal to the whole sync.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}
