use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{
    check_command, init_command, resolve_command, schema_command, settings_command,
};
use crate::utils::DEFAULT_FIXTURE;

#[derive(Parser, Debug)]
#[command(name = "seo-projector")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug              Enable debug logging\n    SEO_PROJECTOR_CONFIG=FILE   Use FILE instead of config discovery")]
pub struct Cli {
    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the host description and configuration come from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Fixture describing subject kinds and their SEO metadata
    #[arg(short, long, global = true, default_value = DEFAULT_FIXTURE)]
    pub fixture: PathBuf,

    /// Projector configuration file (JSON or TOML); discovered when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the registered schema as SDL
    #[command(visible_alias = "s")]
    Schema,
    /// Resolve the seo field for one subject
    #[command(visible_alias = "r")]
    Resolve {
        /// Subject reference, e.g. post:12 or category:4
        subject: String,

        /// Sub-fields to select (e.g. "title openGraphType"); all fields when omitted
        #[arg(short, long)]
        select: Option<String>,
    },
    /// Resolve the site-wide SEO settings
    Settings {
        /// Sub-fields to select; all fields when omitted
        #[arg(short, long)]
        select: Option<String>,
    },
    /// Validate configuration and fixture and report what gets registered
    Check {
        /// Print the registration report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a starter configuration and fixture
    Init {
        /// Directory to write into (defaults to current directory)
        #[arg(long = "cwd")]
        cwd: Option<String>,

        /// Force overwrite existing files
        #[arg(short = 'F', long)]
        force: bool,
    },
}

impl Cli {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        tracing::debug!("Executing {:?}", self.command);
        let sources = self.sources;
        match self.command {
            Commands::Schema => schema_command(&sources),
            Commands::Resolve { subject, select } => {
                resolve_command(&sources, &subject, select.as_deref())
            }
            Commands::Settings { select } => settings_command(&sources, select.as_deref()),
            Commands::Check { json } => check_command(&sources, json),
            Commands::Init { cwd, force } => init_command(cwd.as_deref(), force),
        }
    }
}
