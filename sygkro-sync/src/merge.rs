//! Per-file three-way merge.
//!
//! Classification walks the union of files in *base* and *theirs* and decides
//! a [`MergeStatus`] per file from which trees contain it and whether the
//! contents moved; line-level reconciliation is delegated to
//! `git merge-file --diff3`, whose conflict-marker output (labels `project`,
//! `base`, `template`) is the sidecar file format.
//!
//! Files that exist only in *ours* belong to the user and are never touched.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use walkdir::WalkDir;

use crate::error::{io_err, SyncError};

/// Suffix appended to a file's relative path to name its conflict sidecar.
pub const CONFLICT_SUFFIX: &str = ".sygkro-conflict";

/// Outcome of merging a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStatus {
    /// No action needed; filtered out of [`MergeResult::files`].
    Unchanged,
    /// Merge succeeded without conflicts; the project file is rewritten.
    Clean,
    /// Overlapping edits; a `.sygkro-conflict` sidecar is written and the
    /// project file is left untouched.
    Conflict,
    /// New file from the template, added to the project.
    NewFile,
    /// Deleted in the template; reported but never auto-deleted.
    DeletedFile,
}

/// Merge outcome for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeFileResult {
    /// Path relative to the project root.
    pub rel_path: PathBuf,
    pub status: MergeStatus,
    /// Sidecar path, set iff `status == Conflict`.
    pub conflict_path: Option<PathBuf>,
}

/// Merge outcome across all template files.
#[derive(Debug, Default)]
pub struct MergeResult {
    pub files: Vec<MergeFileResult>,
    pub has_conflict: bool,
}

fn conflict_path_for(rel_path: &Path) -> PathBuf {
    PathBuf::from(format!("{}{CONFLICT_SUFFIX}", rel_path.display()))
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify every file across `base_dir` / `ours_dir` / `theirs_dir`.
///
/// `base_dir` may be an empty (or missing) directory on a first sync.
/// `Unchanged` results are filtered out; `has_conflict` is set iff some file
/// classified as `Conflict`. Nothing is written — see [`apply_merge`].
pub fn three_way_merge(
    base_dir: &Path,
    ours_dir: &Path,
    theirs_dir: &Path,
) -> Result<MergeResult, SyncError> {
    let base_files = collect_files(base_dir)?;
    let theirs_files = collect_files(theirs_dir)?;

    let mut result = MergeResult::default();
    for rel in base_files.union(&theirs_files) {
        let in_base = base_files.contains(rel);
        let in_theirs = theirs_files.contains(rel);
        let ours_exists = is_file(&ours_dir.join(rel));

        let file_result =
            classify_file(base_dir, ours_dir, theirs_dir, rel, in_base, ours_exists, in_theirs)?;

        tracing::debug!("{}: {:?}", rel.display(), file_result.status);
        if file_result.status == MergeStatus::Conflict {
            result.has_conflict = true;
        }
        if file_result.status != MergeStatus::Unchanged {
            result.files.push(file_result);
        }
    }

    Ok(result)
}

fn classify_file(
    base_dir: &Path,
    ours_dir: &Path,
    theirs_dir: &Path,
    rel: &Path,
    in_base: bool,
    ours_exists: bool,
    in_theirs: bool,
) -> Result<MergeFileResult, SyncError> {
    let base_path = base_dir.join(rel);
    let ours_path = ours_dir.join(rel);
    let theirs_path = theirs_dir.join(rel);

    let unchanged = || MergeFileResult {
        rel_path: rel.to_path_buf(),
        status: MergeStatus::Unchanged,
        conflict_path: None,
    };
    let with_status = |status: MergeStatus| MergeFileResult {
        rel_path: rel.to_path_buf(),
        status,
        conflict_path: None,
    };
    let conflicted = || MergeFileResult {
        rel_path: rel.to_path_buf(),
        status: MergeStatus::Conflict,
        conflict_path: Some(conflict_path_for(rel)),
    };

    let result = match (in_base, ours_exists, in_theirs) {
        // Present everywhere: the ordinary three-way case.
        (true, true, true) => {
            let base = fs::read(&base_path).map_err(|e| io_err(&base_path, e))?;
            let theirs = fs::read(&theirs_path).map_err(|e| io_err(&theirs_path, e))?;
            if base == theirs {
                unchanged()
            } else {
                let ours = fs::read(&ours_path).map_err(|e| io_err(&ours_path, e))?;
                if base == ours {
                    // User never touched it: take theirs.
                    with_status(MergeStatus::Clean)
                } else {
                    let (_, has_conflict) =
                        merge_file(Some(&base_path), &ours_path, &theirs_path, rel)?;
                    if has_conflict {
                        conflicted()
                    } else {
                        with_status(MergeStatus::Clean)
                    }
                }
            }
        }

        // Template deleted the file; report, never auto-delete.
        (true, true, false) => with_status(MergeStatus::DeletedFile),

        // User deleted the file.
        (true, false, true) => {
            let base = fs::read(&base_path).map_err(|e| io_err(&base_path, e))?;
            let theirs = fs::read(&theirs_path).map_err(|e| io_err(&theirs_path, e))?;
            if base == theirs {
                // Template did not move: respect the deletion.
                unchanged()
            } else {
                // Template moved: restore with the new content.
                with_status(MergeStatus::NewFile)
            }
        }

        // Deleted on both sides.
        (true, false, false) => unchanged(),

        // No common ancestor, both sides have it.
        (false, true, true) => {
            let ours = fs::read(&ours_path).map_err(|e| io_err(&ours_path, e))?;
            let theirs = fs::read(&theirs_path).map_err(|e| io_err(&theirs_path, e))?;
            if ours == theirs {
                unchanged()
            } else {
                let (_, has_conflict) = merge_file(None, &ours_path, &theirs_path, rel)?;
                if has_conflict {
                    conflicted()
                } else {
                    with_status(MergeStatus::Clean)
                }
            }
        }

        // Brand-new template file.
        (false, false, true) => with_status(MergeStatus::NewFile),

        // In ours only, or nowhere: not ours to manage.
        (false, true, false) | (false, false, false) => unchanged(),
    };

    Ok(result)
}

// ---------------------------------------------------------------------------
// Line merge
// ---------------------------------------------------------------------------

/// Run `git merge-file --diff3` over the three inputs.
///
/// `base` of `None` substitutes an empty ancestor. Returns the merged bytes
/// and whether conflicts were marked; the tool runs on temp copies, so no
/// operand is ever modified in place.
fn merge_file(
    base: Option<&Path>,
    ours: &Path,
    theirs: &Path,
    rel: &Path,
) -> Result<(Vec<u8>, bool), SyncError> {
    let scratch = tempfile::Builder::new()
        .prefix("sygkro-merge-")
        .tempdir()
        .map_err(|e| io_err(std::env::temp_dir(), e))?;

    let ours_copy = scratch.path().join("ours");
    let base_copy = scratch.path().join("base");
    let theirs_copy = scratch.path().join("theirs");

    let base_bytes = match base {
        Some(path) => fs::read(path).map_err(|e| io_err(path, e))?,
        None => Vec::new(),
    };
    let ours_bytes = fs::read(ours).map_err(|e| io_err(ours, e))?;
    let theirs_bytes = fs::read(theirs).map_err(|e| io_err(theirs, e))?;

    fs::write(&ours_copy, ours_bytes).map_err(|e| io_err(&ours_copy, e))?;
    fs::write(&base_copy, base_bytes).map_err(|e| io_err(&base_copy, e))?;
    fs::write(&theirs_copy, theirs_bytes).map_err(|e| io_err(&theirs_copy, e))?;

    let output = Command::new("git")
        .args(["merge-file", "-p", "--diff3"])
        .args(["-L", "project", "-L", "base", "-L", "template"])
        .arg(&ours_copy)
        .arg(&base_copy)
        .arg(&theirs_copy)
        .output()
        .map_err(|e| SyncError::MergeTool {
            path: rel.to_path_buf(),
            detail: format!("failed to run git merge-file: {e}"),
        })?;

    // Exit status 0 is a clean merge; 1–127 is the conflict count (output
    // still valid); anything else is a tool failure.
    match output.status.code() {
        Some(0) => Ok((output.stdout, false)),
        Some(code) if (1..=127).contains(&code) => Ok((output.stdout, true)),
        _ => Err(SyncError::MergeTool {
            path: rel.to_path_buf(),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Apply
// ---------------------------------------------------------------------------

/// Materialize a [`MergeResult`] in the project tree.
///
/// Clean merges rewrite the project file; conflicts write the
/// `.sygkro-conflict` sidecar and leave the original untouched; new files are
/// copied in from `theirs_dir`; deletions are report-only. Applying the same
/// result twice converges to the same tree.
pub fn apply_merge(
    project_dir: &Path,
    base_dir: &Path,
    theirs_dir: &Path,
    result: &MergeResult,
) -> Result<(), SyncError> {
    for file in &result.files {
        let project_path = project_dir.join(&file.rel_path);
        let base_path = base_dir.join(&file.rel_path);
        let theirs_path = theirs_dir.join(&file.rel_path);

        match file.status {
            MergeStatus::Clean => {
                let merged = if is_file(&base_path) {
                    merge_file(Some(&base_path), &project_path, &theirs_path, &file.rel_path)?.0
                } else {
                    // No ancestor: a clean verdict without a base means ours
                    // and theirs agree, so theirs is the merged content.
                    fs::read(&theirs_path).map_err(|e| io_err(&theirs_path, e))?
                };
                fs::write(&project_path, merged).map_err(|e| io_err(&project_path, e))?;
                tracing::info!("updated: {}", file.rel_path.display());
            }

            MergeStatus::Conflict => {
                let merged = if is_file(&base_path) {
                    merge_file(Some(&base_path), &project_path, &theirs_path, &file.rel_path)?.0
                } else {
                    merge_file(None, &project_path, &theirs_path, &file.rel_path)?.0
                };
                let conflict_rel = file
                    .conflict_path
                    .clone()
                    .unwrap_or_else(|| conflict_path_for(&file.rel_path));
                let conflict_abs = project_dir.join(&conflict_rel);
                if let Some(parent) = conflict_abs.parent() {
                    fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
                }
                fs::write(&conflict_abs, merged).map_err(|e| io_err(&conflict_abs, e))?;
                tracing::info!(
                    "conflict: {} (see {})",
                    file.rel_path.display(),
                    conflict_rel.display()
                );
            }

            MergeStatus::NewFile => {
                let content = fs::read(&theirs_path).map_err(|e| io_err(&theirs_path, e))?;
                if let Some(parent) = project_path.parent() {
                    fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
                }
                fs::write(&project_path, content).map_err(|e| io_err(&project_path, e))?;
                tracing::info!("added: {}", file.rel_path.display());
            }

            MergeStatus::DeletedFile | MergeStatus::Unchanged => {}
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tree helpers
// ---------------------------------------------------------------------------

/// Relative paths of all regular files under `dir`, sorted.
///
/// A missing directory yields the empty set (a first sync has no base tree).
pub(crate) fn collect_files(dir: &Path) -> Result<BTreeSet<PathBuf>, SyncError> {
    let mut files = BTreeSet::new();
    if !dir.exists() {
        return Ok(files);
    }
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| SyncError::Walk {
            path: dir.to_path_buf(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(dir) {
            files.insert(rel.to_path_buf());
        }
    }
    Ok(files)
}

fn is_file(path: &Path) -> bool {
    path.is_file()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
