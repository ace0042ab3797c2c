//! # sygkro-sync
//!
//! The synchronization engine: reconciles the previously rendered template
//! (*base*), the current project (*ours*), and the freshly rendered template
//! (*theirs*) with per-file three-way merges, then applies the result without
//! ever deleting a user file.
//!
//! Call [`sync_project`] for the full pipeline, or [`three_way_merge`] +
//! [`apply_merge`] to drive the merge against already rendered trees.

pub mod controller;
pub mod diff;
pub mod error;
pub mod merge;

pub use controller::{sync_project, template_diff, SyncOutcome};
pub use diff::diff_dirs;
pub use error::SyncError;
pub use merge::{
    apply_merge, three_way_merge, MergeFileResult, MergeResult, MergeStatus, CONFLICT_SUFFIX,
};
