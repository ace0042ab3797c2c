//! Sync orchestration.
//!
//! A sync resolves the template with full history, renders *theirs* at HEAD
//! and *base* at the previously synced commit into scoped temp directories,
//! merges against the project, applies, and only then rewrites the sync
//! record. Any failure before apply leaves both the project and the record
//! untouched.

use std::path::Path;

use tempfile::TempDir;

use sygkro_core::{read_sync_record, write_sync_record};
use sygkro_engine::render_template;
use sygkro_vcs::{checkout, resolve_for_sync};

use crate::diff::diff_dirs;
use crate::error::{io_err, SyncError};
use crate::merge::{apply_merge, three_way_merge, MergeResult};

/// What a sync did.
#[derive(Debug)]
pub struct SyncOutcome {
    /// Per-file merge results; empty when the project was already in step.
    pub result: MergeResult,
    /// `template_version` before the sync (empty on a first sync).
    pub old_version: String,
    /// The resolved HEAD commit. Recorded in the sync record only when
    /// something was applied.
    pub new_version: String,
}

/// Run a full sync for the project at `project_dir`.
///
/// `config_path` locates the sync record; `tracking_override` replaces the
/// recorded tracking ref for this run (and is persisted with the record on
/// success, as the record is rewritten wholesale).
pub fn sync_project(
    project_dir: &Path,
    config_path: &Path,
    tracking_override: Option<&str>,
) -> Result<SyncOutcome, SyncError> {
    let mut record = read_sync_record(config_path)?;
    if let Some(tracking_ref) = tracking_override {
        record.source.template_tracking_ref = tracking_ref.to_string();
    }
    let old_version = record.source.template_version.clone();

    let resolved = resolve_for_sync(
        &record.source.template_path,
        &record.source.template_tracking_ref,
    )?;
    tracing::info!(
        "syncing against {} at {}",
        record.source.template_path,
        resolved.commit_sha
    );

    // Render theirs at HEAD.
    let theirs_dir = scratch_dir("sygkro-theirs-")?;
    render_template(&resolved.path, theirs_dir.path(), &record.inputs)?;

    // Render base at the previously synced commit; empty tree on a first sync.
    let base_dir = scratch_dir("sygkro-base-")?;
    if !old_version.is_empty() {
        checkout(&resolved.path, &old_version)?;
        render_template(&resolved.path, base_dir.path(), &record.inputs)?;
    }

    let result = three_way_merge(base_dir.path(), project_dir, theirs_dir.path())?;
    if result.files.is_empty() {
        tracing::info!("no differences found");
        return Ok(SyncOutcome {
            result,
            old_version,
            new_version: resolved.commit_sha,
        });
    }

    apply_merge(project_dir, base_dir.path(), theirs_dir.path(), &result)?;

    record.source.template_version = resolved.commit_sha.clone();
    write_sync_record(config_path, &record)?;

    Ok(SyncOutcome {
        result,
        old_version,
        new_version: resolved.commit_sha,
    })
}

/// Render the template at its old and new versions and return the unified
/// diff between them — the preview of what a sync would bring in.
pub fn template_diff(
    config_path: &Path,
    tracking_override: Option<&str>,
) -> Result<String, SyncError> {
    let mut record = read_sync_record(config_path)?;
    if let Some(tracking_ref) = tracking_override {
        record.source.template_tracking_ref = tracking_ref.to_string();
    }

    let resolved = resolve_for_sync(
        &record.source.template_path,
        &record.source.template_tracking_ref,
    )?;

    let new_dir = scratch_dir("sygkro-diff-new-")?;
    render_template(&resolved.path, new_dir.path(), &record.inputs)?;

    // On a first sync the old tree stays empty and everything shows as added.
    let old_dir = scratch_dir("sygkro-diff-old-")?;
    if !record.source.template_version.is_empty() {
        checkout(&resolved.path, &record.source.template_version)?;
        render_template(&resolved.path, old_dir.path(), &record.inputs)?;
    }

    diff_dirs(old_dir.path(), new_dir.path())
}

fn scratch_dir(prefix: &str) -> Result<TempDir, SyncError> {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .map_err(|e| io_err(std::env::temp_dir(), e))
}
