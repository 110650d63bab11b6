//! # static-sync
//!
//! Library powering the `static-sync` command-line tool: a
//! configuration-driven synchronizer that mirrors external git repositories
//! into a local workspace and distributes selected files into the consuming
//! project's tree, without clobbering files the user has hand-edited since
//! the last sync.
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the `static.yaml` schema naming each
//!   repository, its optional pinned revision, and its file map.
//! - **Host resolution (`hosts`)**: alias + repository name → clone URL,
//!   with a builtin alias table overridable per run and a `local` marker
//!   that bypasses git entirely.
//! - **Workspace (`workspace`)**: deterministic per-repository mirror
//!   directories under the project's `.statictmp/` root.
//! - **Sync engine (`sync`, `git`)**: clone / fetch+reset / fetch+pull via
//!   the system `git`, each invocation with an explicit working directory
//!   and a kill-on-expiry timeout.
//! - **Modification detection (`modified`)**: a quick similarity ratio
//!   gated by modification-time ordering decides which destinations are
//!   hand-edited and must not be overwritten.
//! - **Distribution (`distribute`)**: allow-list filtered copying with
//!   source timestamps preserved.
//! - **Coordination (`coordinator`)**: all repository pipelines run in
//!   parallel; one aggregate report resolves after every pipeline has,
//!   successful or not.

pub mod config;
pub mod coordinator;
pub mod distribute;
pub mod error;
pub mod git;
pub mod hosts;
pub mod modified;
pub mod output;
pub mod sync;
pub mod workspace;
