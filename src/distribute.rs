//! File distribution
//!
//! Copies mapped files and directories out of a repository workspace into
//! the consuming project's tree. Eligibility is decided by a file-name
//! allow-list (glob patterns) and by dot-file exclusion during directory
//! recursion. Destinations the pre-scan judged locally modified are left
//! untouched and reported as ignored. Copies reproduce the source's access
//! and modification timestamps, so an untouched destination still looks
//! unchanged on the next sync.
//!
//! Every filesystem error here is scoped to the single file it hit: it is
//! logged and counted, and distribution continues with the remaining files.

use crate::config::FileMapping;
use crate::error::{Error, Result};
use crate::modified;
use glob::Pattern;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Per-repository distribution counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributeStats {
    /// Files written to the project tree.
    pub copied: usize,
    /// Destinations already byte-identical to their source.
    pub unchanged: usize,
    /// Destinations skipped because they were locally modified.
    pub ignored: usize,
    /// Entries excluded by the allow-list or dot-file rule.
    pub filtered: usize,
    /// Per-file errors (logged, distribution continued).
    pub failed: usize,
}

/// Copies allow-listed workspace files into a project root.
pub struct Distributor {
    project_root: PathBuf,
    allow: Vec<Pattern>,
}

impl Distributor {
    /// Build a distributor; `patterns` are matched against file names.
    /// An empty list means everything is eligible.
    pub fn new(project_root: &Path, patterns: &[String]) -> Result<Self> {
        let allow = patterns
            .iter()
            .map(|p| Pattern::new(p).map_err(Error::Glob))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            project_root: project_root.to_path_buf(),
            allow,
        })
    }

    /// Pre-scan the destinations of `mappings` against the current
    /// workspace content, returning the set that must not be overwritten.
    ///
    /// Run before the workspace is fetched or reset, so the comparison is
    /// against the files as they were last distributed.
    pub fn prescan(&self, workspace: &Path, mappings: &[FileMapping]) -> HashSet<PathBuf> {
        let mut protected = HashSet::new();
        for (src, dst) in self.resolve_pairs(workspace, mappings) {
            match modified::is_locally_modified(&src, &dst) {
                Ok(true) => {
                    protected.insert(dst);
                }
                Ok(false) => {}
                Err(e) => debug!("prescan skipped {}: {}", dst.display(), e),
            }
        }
        protected
    }

    /// Copy every eligible mapped file, skipping `protected` destinations.
    pub fn distribute(
        &self,
        workspace: &Path,
        mappings: &[FileMapping],
        protected: &HashSet<PathBuf>,
    ) -> DistributeStats {
        let mut stats = DistributeStats::default();

        for mapping in mappings {
            let src = workspace.join(rel(&mapping.src));
            if !src.exists() {
                warn!(
                    "source missing in workspace: {} (from {})",
                    src.display(),
                    mapping.src
                );
                stats.failed += 1;
                continue;
            }
            for (src_file, dst_file) in self.expand_mapping(&src, &mapping.dst, &mut stats) {
                self.copy_one(&src_file, &dst_file, protected, &mut stats);
            }
        }

        stats
    }

    /// Resolve all mappings to concrete (source file, destination file)
    /// pairs under the same eligibility rules as distribution, so the
    /// pre-scan only considers files a copy could actually touch.
    fn resolve_pairs(&self, workspace: &Path, mappings: &[FileMapping]) -> Vec<(PathBuf, PathBuf)> {
        let mut scratch = DistributeStats::default();
        mappings
            .iter()
            .filter_map(|m| {
                let src = workspace.join(rel(&m.src));
                src.exists()
                    .then(|| self.expand_mapping(&src, &m.dst, &mut scratch))
            })
            .flatten()
            .collect()
    }

    /// Expand one mapping into eligible (source file, destination file)
    /// pairs, applying the allow-list and dot-file exclusion.
    fn expand_mapping(
        &self,
        src: &Path,
        dst_spec: &str,
        stats: &mut DistributeStats,
    ) -> Vec<(PathBuf, PathBuf)> {
        let dst_base = self.project_root.join(rel(dst_spec));
        let dst_is_dir = dst_spec.ends_with('/');

        if src.is_file() {
            if !self.eligible(src) {
                stats.filtered += 1;
                return Vec::new();
            }
            // A trailing separator on the destination means "into this
            // directory, under the source's own name".
            let dst = if dst_is_dir {
                match src.file_name() {
                    Some(name) => dst_base.join(name),
                    None => dst_base,
                }
            } else {
                dst_base
            };
            return vec![(src.to_path_buf(), dst)];
        }

        // Directory source: mirror the subtree, skipping dot-entries.
        let mut pairs = Vec::new();
        let walker = WalkDir::new(src).into_iter().filter_entry(|e| {
            e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
        });
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("walk error under {}: {}", src.display(), e);
                    stats.failed += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if !self.eligible(entry.path()) {
                stats.filtered += 1;
                continue;
            }
            match entry.path().strip_prefix(src) {
                Ok(relative) => pairs.push((entry.path().to_path_buf(), dst_base.join(relative))),
                Err(_) => {
                    stats.failed += 1;
                }
            }
        }
        pairs
    }

    fn eligible(&self, path: &Path) -> bool {
        if self.allow.is_empty() {
            return true;
        }
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };
        self.allow.iter().any(|p| p.matches(&name))
    }

    fn copy_one(
        &self,
        src: &Path,
        dst: &Path,
        protected: &HashSet<PathBuf>,
        stats: &mut DistributeStats,
    ) {
        if protected.contains(dst) {
            info!("ignored (locally modified): {}", dst.display());
            stats.ignored += 1;
            return;
        }

        match copy_with_times(src, dst) {
            Ok(true) => {
                info!("{} -> {}", src.display(), dst.display());
                stats.copied += 1;
            }
            Ok(false) => stats.unchanged += 1,
            Err(e) => {
                warn!("{}", e);
                stats.failed += 1;
            }
        }
    }
}

/// Strip a leading separator so mapping paths stay inside their roots.
fn rel(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Copy `src` to `dst`, reproducing the source timestamps.
///
/// Returns false without touching anything when the destination is already
/// byte-identical, so an unchanged re-run performs zero copy actions.
fn copy_with_times(src: &Path, dst: &Path) -> Result<bool> {
    let scoped = |e: std::io::Error| Error::Distribute {
        path: dst.to_path_buf(),
        message: e.to_string(),
    };

    let content = fs::read(src).map_err(scoped)?;
    if dst.exists() && fs::read(dst).map_err(scoped)? == content {
        return Ok(false);
    }

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(scoped)?;
    }
    fs::write(dst, &content).map_err(scoped)?;

    let meta = fs::metadata(src).map_err(scoped)?;
    let mut times = fs::FileTimes::new();
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    fs::File::options()
        .write(true)
        .open(dst)
        .map_err(scoped)?
        .set_times(times)
        .map_err(scoped)?;

    Ok(true)
}
