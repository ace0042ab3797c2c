//! `sygkro template new <name>` — scaffold a template directory.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use sygkro_core::{
    write_template_config, Inputs, TemplateConfig, TemplatingConfig, SLUG_DIR,
    TEMPLATE_CONFIG_FILE,
};

// Starter file for new templates; written verbatim, rendered at project
// creation time.
const README_TEMPLATE: &str = include_str!("../templates/README.md.tpl");

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Scaffold a template directory with a manifest and a starter file.
    New(NewArgs),
}

pub fn run(command: TemplateCommand) -> Result<()> {
    match command {
        TemplateCommand::New(args) => args.run(),
    }
}

/// Arguments for `sygkro template new`.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Name of the template; also the directory created for it.
    pub name: String,
}

impl NewArgs {
    pub fn run(self) -> Result<()> {
        let template_dir = Path::new(&self.name);
        if template_dir.exists() {
            bail!("directory {} already exists", template_dir.display());
        }

        let slug_dir = template_dir.join(SLUG_DIR);
        fs::create_dir(template_dir)
            .with_context(|| format!("failed to create {}", template_dir.display()))?;
        fs::create_dir(&slug_dir)
            .with_context(|| format!("failed to create {}", slug_dir.display()))?;

        let mut inputs = Inputs::new();
        inputs.insert("name".to_string(), "my-project".to_string());
        inputs.insert("slug".to_string(), "my-project".to_string());
        inputs.insert(
            "description".to_string(),
            "A new project created by sygkro".to_string(),
        );
        inputs.insert("author".to_string(), "Your Name".to_string());

        let config = TemplateConfig {
            name: self.name.clone(),
            description: "A new template created by sygkro".to_string(),
            templating: TemplatingConfig { inputs },
            ..TemplateConfig::default()
        };
        write_template_config(&template_dir.join(TEMPLATE_CONFIG_FILE), &config)
            .context("failed to write template config")?;

        fs::write(slug_dir.join("README.md"), README_TEMPLATE)
            .context("failed to write starter README")?;

        println!("Template {} created successfully.", self.name);
        Ok(())
    }
}
