//! `sygkro project create` — render a template into a new project directory.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use sygkro_core::{write_sync_record, SyncRecord, SyncSource, SLUG_DIR, SYNC_RECORD_FILE};
use sygkro_engine::{process_template_dir, render_string};

use super::{load_template, short_ref};
use crate::prompt::collect_inputs;

/// Arguments for `sygkro project create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Path or git repo reference to the template (required).
    #[arg(long, short = 's')]
    pub template: String,

    /// Target directory under which the project directory is created.
    #[arg(long, short = 't', default_value = ".")]
    pub target: PathBuf,

    /// Git reference (branch, tag, or commit SHA) to use for the template.
    #[arg(long, short = 'r', default_value = "")]
    pub git_ref: String,
}

impl CreateArgs {
    pub fn run(self) -> Result<()> {
        let resolved = sygkro_vcs::resolve(&self.template, &self.git_ref)
            .with_context(|| format!("failed to resolve template '{}'", self.template))?;
        let config = load_template(&resolved)?;

        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut stdout = io::stdout();
        let inputs = collect_inputs(&config, false, &mut reader, &mut stdout)?;

        let project_name =
            render_string(SLUG_DIR, &inputs).context("failed to render project directory name")?;
        if project_name.is_empty() {
            bail!("the 'slug' input rendered an empty project directory name");
        }

        let destination = self.target.join(&project_name);
        if destination.exists() {
            bail!(
                "destination directory {} already exists",
                destination.display()
            );
        }
        fs::create_dir_all(&destination)
            .with_context(|| format!("failed to create {}", destination.display()))?;

        process_template_dir(
            &resolved.path.join(SLUG_DIR),
            &destination,
            &inputs,
            config.options.as_ref(),
        )
        .context("failed to render template")?;

        let record = SyncRecord {
            source: SyncSource {
                // Preserve the original reference string, not the resolved path.
                template_path: self.template.clone(),
                template_name: config.name.clone(),
                template_version: resolved.commit_sha.clone(),
                template_tracking_ref: short_ref(&resolved.head_ref),
            },
            inputs,
        };
        write_sync_record(&destination.join(SYNC_RECORD_FILE), &record)
            .context("failed to write sync record")?;

        println!("Project created successfully in {}", destination.display());
        Ok(())
    }
}
