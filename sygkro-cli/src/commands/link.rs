//! `sygkro project link` — bind an existing project to a template.

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use sygkro_core::{write_sync_record, SyncRecord, SyncSource, SYNC_RECORD_FILE};

use super::{load_template, short_ref};
use crate::prompt::collect_inputs;

/// Arguments for `sygkro project link`.
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Path or git repo reference to the template (required).
    #[arg(long, short = 's')]
    pub template: String,

    /// Directory of the project to link.
    #[arg(long, short = 't', default_value = ".")]
    pub target: PathBuf,

    /// Git reference (branch, tag, or commit SHA) to use for the template.
    #[arg(long, short = 'r', default_value = "")]
    pub git_ref: String,

    /// Accept the default value for every input without prompting.
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl LinkArgs {
    pub fn run(self) -> Result<()> {
        if !self.target.exists() {
            bail!("target directory {} does not exist", self.target.display());
        }

        let resolved = sygkro_vcs::resolve(&self.template, &self.git_ref)
            .with_context(|| format!("failed to resolve template '{}'", self.template))?;
        let config = load_template(&resolved)?;

        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut stdout = io::stdout();
        let inputs = collect_inputs(&config, self.quiet, &mut reader, &mut stdout)?;

        let record = SyncRecord {
            source: SyncSource {
                template_path: self.template.clone(),
                template_name: config.name.clone(),
                template_version: resolved.commit_sha.clone(),
                template_tracking_ref: short_ref(&resolved.head_ref),
            },
            inputs,
        };
        write_sync_record(&self.target.join(SYNC_RECORD_FILE), &record)
            .context("failed to write sync record")?;

        println!(
            "Project linked to template {} successfully!\nRun 'sygkro project sync' to synchronize the project with the template.",
            self.template
        );
        Ok(())
    }
}
