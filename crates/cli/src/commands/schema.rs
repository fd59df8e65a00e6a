use anyhow::Result;
use tracing::debug;

use super::load_site;
use crate::cli::SourceArgs;

pub fn schema_command(sources: &SourceArgs) -> Result<()> {
    debug!("Rendering schema from {}", sources.fixture.display());
    let (_, _, site) = load_site(sources)?;
    print!("{}", site.host.to_sdl());
    Ok(())
}
