//! Host alias resolution
//!
//! Maps a short host alias plus a repository name to a clonable URL. The
//! alias table is built once per run from builtin defaults and the user's
//! `hostDict`, with user entries winning on collision. The reserved alias
//! `local` selects no remote at all: the repository name is treated as a
//! filesystem path and only file distribution runs for that entry.

use crate::config::RepoSpec;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Reserved alias marking a repository as a local path, not a remote.
pub const LOCAL_HOST: &str = "local";

/// Alias used when neither the repo nor the config names a host.
pub const DEFAULT_HOST: &str = "github";

const GIT_SUFFIX: &str = ".git";

/// Where a repository's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSource {
    /// A remote repository reachable at a clone URL.
    Remote { url: String },
    /// A directory already on disk; no git operation applies.
    Local { path: PathBuf },
}

/// Resolves repository specs to their source, using an alias table fixed at
/// construction time.
#[derive(Debug, Clone)]
pub struct HostResolver {
    table: HashMap<String, String>,
    default_alias: String,
}

fn builtin_hosts() -> HashMap<String, String> {
    HashMap::from([
        ("github".to_string(), "https://github.com/".to_string()),
        ("gitlab".to_string(), "https://gitlab.com/".to_string()),
        ("bitbucket".to_string(), "https://bitbucket.org/".to_string()),
    ])
}

impl HostResolver {
    /// Build the resolver from an optional default alias and user overrides.
    /// Override entries win over builtins on collision.
    pub fn new(default_alias: Option<&str>, overrides: &HashMap<String, String>) -> Self {
        let mut table = builtin_hosts();
        for (alias, prefix) in overrides {
            table.insert(alias.clone(), prefix.clone());
        }
        Self {
            table,
            default_alias: default_alias.unwrap_or(DEFAULT_HOST).to_string(),
        }
    }

    /// Resolve one repository spec to its source.
    ///
    /// Precedence: explicit `url` verbatim, then the `local` marker, then
    /// alias prefix + name + `.git`.
    pub fn resolve(&self, spec: &RepoSpec) -> Result<RepoSource> {
        if let Some(url) = &spec.url {
            return Ok(RepoSource::Remote { url: url.clone() });
        }

        let alias = spec.host.as_deref().unwrap_or(&self.default_alias);
        if alias == LOCAL_HOST {
            return Ok(RepoSource::Local {
                path: PathBuf::from(&spec.name),
            });
        }

        let prefix = self.table.get(alias).ok_or_else(|| Error::UnknownHost {
            alias: alias.to_string(),
            repo: spec.name.clone(),
        })?;

        let mut url = String::with_capacity(prefix.len() + spec.name.len() + GIT_SUFFIX.len());
        url.push_str(prefix);
        if !prefix.ends_with('/') {
            url.push('/');
        }
        url.push_str(&spec.name);
        if !url.ends_with(GIT_SUFFIX) {
            url.push_str(GIT_SUFFIX);
        }
        Ok(RepoSource::Remote { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, host: Option<&str>, url: Option<&str>) -> RepoSpec {
        RepoSpec {
            name: name.to_string(),
            host: host.map(String::from),
            url: url.map(String::from),
            revision: None,
            files: Vec::new(),
        }
    }

    #[test]
    fn test_resolve_default_host() {
        let resolver = HostResolver::new(None, &HashMap::new());
        let source = resolver.resolve(&spec("owner/widget", None, None)).unwrap();
        assert_eq!(
            source,
            RepoSource::Remote {
                url: "https://github.com/owner/widget.git".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_named_builtin_host() {
        let resolver = HostResolver::new(None, &HashMap::new());
        let source = resolver
            .resolve(&spec("owner/widget", Some("gitlab"), None))
            .unwrap();
        assert_eq!(
            source,
            RepoSource::Remote {
                url: "https://gitlab.com/owner/widget.git".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_config_default_alias() {
        let overrides =
            HashMap::from([("mycorp".to_string(), "https://git.mycorp.example/".to_string())]);
        let resolver = HostResolver::new(Some("mycorp"), &overrides);
        let source = resolver.resolve(&spec("tools/widget", None, None)).unwrap();
        assert_eq!(
            source,
            RepoSource::Remote {
                url: "https://git.mycorp.example/tools/widget.git".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_override_wins_over_builtin() {
        let overrides =
            HashMap::from([("github".to_string(), "https://ghe.mycorp.example/".to_string())]);
        let resolver = HostResolver::new(None, &overrides);
        let source = resolver.resolve(&spec("owner/widget", None, None)).unwrap();
        assert_eq!(
            source,
            RepoSource::Remote {
                url: "https://ghe.mycorp.example/owner/widget.git".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_explicit_url_verbatim() {
        let resolver = HostResolver::new(None, &HashMap::new());
        let source = resolver
            .resolve(&spec(
                "widget",
                Some("github"),
                Some("git@internal.example:tools/widget.git"),
            ))
            .unwrap();
        assert_eq!(
            source,
            RepoSource::Remote {
                url: "git@internal.example:tools/widget.git".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_local_marker() {
        let resolver = HostResolver::new(None, &HashMap::new());
        let source = resolver
            .resolve(&spec("../shared/assets", Some(LOCAL_HOST), None))
            .unwrap();
        assert_eq!(
            source,
            RepoSource::Local {
                path: PathBuf::from("../shared/assets")
            }
        );
    }

    #[test]
    fn test_resolve_unknown_alias() {
        let resolver = HostResolver::new(None, &HashMap::new());
        let result = resolver.resolve(&spec("widget", Some("gothib"), None));
        assert!(matches!(result, Err(Error::UnknownHost { .. })));
    }

    #[test]
    fn test_resolve_prefix_without_trailing_slash() {
        let overrides = HashMap::from([("bare".to_string(), "https://host.example".to_string())]);
        let resolver = HostResolver::new(Some("bare"), &overrides);
        let source = resolver.resolve(&spec("widget", None, None)).unwrap();
        assert_eq!(
            source,
            RepoSource::Remote {
                url: "https://host.example/widget.git".to_string()
            }
        );
    }
}
