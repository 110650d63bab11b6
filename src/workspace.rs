//! Workspace path resolution
//!
//! Every remote repository is mirrored into a directory under the project's
//! temporary workspace root (`.statictmp/`). The directory name is derived
//! deterministically from the clone URL, so re-running a sync reuses the
//! existing mirror instead of re-cloning. The root is only ever deleted by
//! the explicit `clear` operation.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the temporary workspace directory inside the project root.
pub const WORKSPACE_DIR: &str = ".statictmp";

const GIT_SUFFIX: &str = ".git";

/// Resolves workspace paths for one project root.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    root: PathBuf,
}

impl WorkspacePaths {
    pub fn new(project_root: &Path) -> Self {
        Self {
            root: project_root.join(WORKSPACE_DIR),
        }
    }

    /// The workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Deterministic mirror directory for a clone URL.
    ///
    /// The final path segment of the URL, minus a `.git` suffix, names the
    /// directory. Pure: identical input always yields identical output.
    pub fn workspace_path(&self, url: &str) -> PathBuf {
        self.root.join(repo_basename(url))
    }

    /// Create the workspace root if it does not exist yet.
    pub fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    /// Recursively delete the entire workspace root, forcing the next sync
    /// to re-clone everything. A missing root is not an error.
    pub fn clear(&self) -> Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }
}

/// Short display name of a repository: the final segment of an
/// owner-prefixed name, or the name unchanged.
pub fn short_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Final path segment of a URL with any `.git` suffix stripped.
///
/// Handles both URL-style (`https://host/owner/repo.git`) and scp-style
/// (`git@host:owner/repo.git`) remotes.
fn repo_basename(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    // scp-style remotes without a path separator: git@host:repo.git
    let last = last.rsplit(':').next().unwrap_or(last);
    last.strip_suffix(GIT_SUFFIX).unwrap_or(last).to_string()
}
