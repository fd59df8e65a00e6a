pub mod check;
pub mod init;
pub mod resolve;
pub mod schema;

pub use check::check_command;
pub use init::init_command;
pub use resolve::{resolve_command, settings_command};
pub use schema::schema_command;

use anyhow::{Context, Result};
use seo_projector_core::{ConfigLoader, ProjectorConfig};

use crate::cli::SourceArgs;
use crate::utils::{Fixture, Site, build_site};

/// Load configuration from `--config`, or by discovery
pub fn load_config(sources: &SourceArgs) -> Result<ProjectorConfig> {
    match &sources.config {
        Some(path) => ProjectorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => ConfigLoader::load().context("Failed to load config"),
    }
}

/// Load fixture and config, then register the projector on a fresh host
pub fn load_site(sources: &SourceArgs) -> Result<(Fixture, ProjectorConfig, Site)> {
    let config = load_config(sources)?;
    let fixture = Fixture::load(&sources.fixture)?;
    let site = build_site(&fixture, config.clone())?;
    Ok((fixture, config, site))
}
