//! `sygkro project sync` — merge template updates into the project.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use sygkro_core::SYNC_RECORD_FILE;
use sygkro_sync::{sync_project, MergeStatus};

/// Arguments for `sygkro project sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the sync record file.
    #[arg(long, short = 'c', default_value = SYNC_RECORD_FILE)]
    pub config: PathBuf,

    /// Git reference to use (branch, tag, or commit SHA).
    #[arg(long, short = 'r', default_value = "")]
    pub git_ref: String,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let project_dir = project_dir_of(&self.config);
        let tracking = (!self.git_ref.is_empty()).then_some(self.git_ref.as_str());

        let outcome =
            sync_project(&project_dir, &self.config, tracking).context("sync failed")?;

        if outcome.result.files.is_empty() {
            println!("No differences found.");
            return Ok(());
        }

        for file in &outcome.result.files {
            match file.status {
                MergeStatus::Clean => println!("  updated: {}", file.rel_path.display()),
                MergeStatus::Conflict => {
                    let sidecar = file
                        .conflict_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    println!("  conflict: {} (see {sidecar})", file.rel_path.display());
                }
                MergeStatus::NewFile => println!("  added: {}", file.rel_path.display()),
                MergeStatus::DeletedFile => {
                    println!("  deleted in template (kept): {}", file.rel_path.display())
                }
                MergeStatus::Unchanged => {}
            }
        }

        // Conflicts are not an error: the sync still completed and the
        // record was updated.
        if outcome.result.has_conflict {
            println!("Sync completed with conflicts. Review .sygkro-conflict files.");
        } else {
            println!("Sync completed successfully.");
        }
        Ok(())
    }
}

fn project_dir_of(config: &Path) -> PathBuf {
    match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
