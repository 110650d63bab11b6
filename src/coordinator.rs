//! Sync coordination across repositories
//!
//! Fans the per-repository pipelines (resolve identity → pre-scan → clone or
//! fetch+reset/pull → distribute) out over a rayon parallel iterator and
//! folds every pipeline's result into one `SyncReport`. A repository's
//! failure is recorded in its own outcome and never cancels or blocks the
//! others; the report exists only once every pipeline has resolved.
//!
//! Only the filesystem is shared between pipelines (the workspace root and
//! the project tree); each pipeline's git invocations carry their own
//! working directory and each modification pre-scan is local to its
//! pipeline.

use crate::config::Config;
use crate::distribute::{DistributeStats, Distributor};
use crate::error::Result;
use crate::git::GitClient;
use crate::hosts::{HostResolver, RepoSource};
use crate::sync::{SyncAction, SyncEngine};
use crate::workspace::WorkspacePaths;
use log::error;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// What one successful repository pipeline accomplished.
#[derive(Debug, Clone)]
pub struct RepoSummary {
    pub action: SyncAction,
    pub stats: DistributeStats,
}

/// Terminal state of one repository's pipeline.
#[derive(Debug)]
pub struct RepoOutcome {
    pub name: String,
    pub result: Result<RepoSummary>,
}

/// Aggregate of all pipelines; present only after every one has resolved.
#[derive(Debug)]
pub struct SyncReport {
    pub outcomes: Vec<RepoOutcome>,
}

impl SyncReport {
    /// Names of the repositories whose pipelines failed.
    pub fn failures(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.name.as_str())
            .collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Run the full sync pipeline for every configured repository.
///
/// Configuration-level problems (an invalid allow-list pattern) are fatal
/// and reported before any repository is processed; per-repository failures
/// land in the report.
pub fn sync_all(
    config: &Config,
    project_root: &Path,
    git: &dyn GitClient,
    allow_patterns: &[String],
) -> Result<SyncReport> {
    let resolver = HostResolver::new(config.host.as_deref(), &config.host_dict);
    let paths = WorkspacePaths::new(project_root);
    let distributor = Distributor::new(project_root, allow_patterns)?;

    let outcomes = config
        .repos
        .par_iter()
        .map(|spec| {
            let result = run_pipeline(spec, &resolver, &paths, git, &distributor);
            if let Err(e) = &result {
                error!("{}: {}", spec.name, e);
            }
            RepoOutcome {
                name: spec.name.clone(),
                result,
            }
        })
        .collect();

    Ok(SyncReport { outcomes })
}

/// One repository's pipeline, strictly ordered within itself.
fn run_pipeline(
    spec: &crate::config::RepoSpec,
    resolver: &HostResolver,
    paths: &WorkspacePaths,
    git: &dyn GitClient,
    distributor: &Distributor,
) -> Result<RepoSummary> {
    let source = resolver.resolve(spec)?;

    // Pre-scan against the workspace as it was last distributed, before any
    // fetch or reset rewrites it. An absent workspace protects nothing.
    let protected = match existing_content_dir(&source, paths) {
        Some(dir) => distributor.prescan(&dir, &spec.files),
        None => HashSet::new(),
    };

    let engine = SyncEngine::new(git, paths);
    let (workspace, action) = engine.sync(&spec.name, &source, spec.revision.as_deref())?;

    let stats = distributor.distribute(&workspace, &spec.files, &protected);
    Ok(RepoSummary { action, stats })
}

fn existing_content_dir(source: &RepoSource, paths: &WorkspacePaths) -> Option<PathBuf> {
    let dir = match source {
        RepoSource::Local { path } => path.clone(),
        RepoSource::Remote { url } => paths.workspace_path(url),
    };
    dir.exists().then_some(dir)
}
