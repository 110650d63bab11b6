//! Per-repository synchronization engine
//!
//! Drives one repository's workspace to the desired state:
//!
//! - no workspace yet: clone, then hard-reset when a revision is pinned;
//! - workspace present, pinned: fetch all remotes, hard-reset to the pin
//!   (destructive, which is fine: the workspace is a disposable mirror);
//! - workspace present, unpinned: fetch, then fast-forward pull of the
//!   default branch;
//! - local source: no git at all, the path is used as-is.
//!
//! Any git failure is terminal for this repository and is reported by the
//! coordinator; there are no retries.

use crate::error::{Error, Result};
use crate::git::GitClient;
use crate::hosts::RepoSource;
use crate::workspace::{short_name, WorkspacePaths};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// What the engine did to bring the workspace up to date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Fresh clone (reset to the pin afterwards when one was given).
    Cloned,
    /// Existing workspace fetched and hard-reset to a pinned revision.
    Reset { revision: String },
    /// Existing workspace fetched and fast-forwarded.
    Pulled,
    /// Local source; nothing to synchronize.
    LocalOnly,
}

/// Synchronizes one repository's on-disk mirror.
pub struct SyncEngine<'a> {
    git: &'a dyn GitClient,
    paths: &'a WorkspacePaths,
}

impl<'a> SyncEngine<'a> {
    pub fn new(git: &'a dyn GitClient, paths: &'a WorkspacePaths) -> Self {
        Self { git, paths }
    }

    /// Bring `source` to `revision` (or the default branch) and return the
    /// workspace directory that now holds its content.
    pub fn sync(
        &self,
        name: &str,
        source: &RepoSource,
        revision: Option<&str>,
    ) -> Result<(PathBuf, SyncAction)> {
        match source {
            RepoSource::Local { path } => {
                if !path.exists() {
                    return Err(Error::Path {
                        message: format!(
                            "local repository '{}' not found at {}",
                            name,
                            path.display()
                        ),
                    });
                }
                debug!("{}: local source, skipping git", short_name(name));
                Ok((path.clone(), SyncAction::LocalOnly))
            }
            RepoSource::Remote { url } => {
                let workspace = self.paths.workspace_path(url);
                if workspace.exists() {
                    self.update(name, &workspace, revision)
                } else {
                    self.checkout(name, url, &workspace, revision)
                }
            }
        }
    }

    /// Initial checkout into an absent workspace.
    fn checkout(
        &self,
        name: &str,
        url: &str,
        workspace: &Path,
        revision: Option<&str>,
    ) -> Result<(PathBuf, SyncAction)> {
        self.paths.ensure_root()?;

        info!("{}: cloning {}", short_name(name), url);
        let target = workspace.to_string_lossy().into_owned();
        let output = self.git.run(&["clone", url, &target], self.paths.root())?;
        if !output.first_line.is_empty() {
            info!("{}: {}", name, output.first_line);
        }

        // A fresh clone already sits on the remote's default branch; only a
        // pinned revision needs a follow-up reset.
        if let Some(rev) = revision {
            self.git.run(&["reset", "--hard", rev], workspace)?;
            info!("{}: HEAD is now at {}", short_name(name), rev);
        }

        Ok((workspace.to_path_buf(), SyncAction::Cloned))
    }

    /// Update an existing workspace: fetch, then reset or pull.
    fn update(
        &self,
        name: &str,
        workspace: &Path,
        revision: Option<&str>,
    ) -> Result<(PathBuf, SyncAction)> {
        debug!("{}: fetching all remotes", name);
        self.git.run(&["fetch", "--all"], workspace)?;

        let action = match revision {
            Some(rev) => {
                self.git.run(&["reset", "--hard", rev], workspace)?;
                info!("{}: HEAD is now at {}", short_name(name), rev);
                SyncAction::Reset {
                    revision: rev.to_string(),
                }
            }
            None => {
                let output = self.git.run(&["pull", "--ff-only"], workspace)?;
                if !output.first_line.is_empty() {
                    info!("{}: {}", name, output.first_line);
                }
                SyncAction::Pulled
            }
        };

        Ok((workspace.to_path_buf(), action))
    }
}
