//! `sygkro project` subcommand dispatch.

use anyhow::Result;
use clap::Subcommand;

use super::create::CreateArgs;
use super::diff::DiffArgs;
use super::link::LinkArgs;
use super::sync::SyncArgs;

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Render a template into a new project directory.
    Create(CreateArgs),

    /// Link an existing project to a template without rendering.
    Link(LinkArgs),

    /// Merge template updates into the project (3-way merge).
    Sync(SyncArgs),

    /// Show what changed in the template since the last sync.
    Diff(DiffArgs),
}

pub fn run(command: ProjectCommand) -> Result<()> {
    match command {
        ProjectCommand::Create(args) => args.run(),
        ProjectCommand::Link(args) => args.run(),
        ProjectCommand::Sync(args) => args.run(),
        ProjectCommand::Diff(args) => args.run(),
    }
}
