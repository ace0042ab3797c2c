//! sygkro — project templating and synchronization CLI.
//!
//! # Usage
//!
//! ```text
//! sygkro template new <name>
//! sygkro project create --template <ref> [--target <dir>] [--git-ref <r>]
//! sygkro project link --template <ref> [--target <dir>] [--git-ref <r>] [--quiet]
//! sygkro project sync [--config <p>] [--git-ref <r>]
//! sygkro project diff [--config <p>] [--git-ref <r>]
//! ```

mod commands;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{project::ProjectCommand, template::TemplateCommand};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "sygkro",
    version,
    about = "Create projects from templates and keep them in sync",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage templates.
    Template {
        #[command(subcommand)]
        command: TemplateCommand,
    },

    /// Create, link, sync, and diff template-backed projects.
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Template { command } => commands::template::run(command),
        Commands::Project { command } => commands::project::run(command),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
