//! `sygkro project diff` — preview the upstream template delta.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sygkro_core::SYNC_RECORD_FILE;
use sygkro_sync::template_diff;

/// Arguments for `sygkro project diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Path to the sync record file.
    #[arg(long, short = 'c', default_value = SYNC_RECORD_FILE)]
    pub config: PathBuf,

    /// Git reference to use (branch, tag, or commit SHA).
    #[arg(long, short = 'r', default_value = "")]
    pub git_ref: String,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let tracking = (!self.git_ref.is_empty()).then_some(self.git_ref.as_str());

        let diff = template_diff(&self.config, tracking).context("failed to compute diff")?;
        if diff.is_empty() {
            println!("No differences found.");
            return Ok(());
        }

        print!("{diff}");
        if !diff.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}
