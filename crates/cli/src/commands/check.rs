use anyhow::Result;

use super::load_site;
use crate::cli::SourceArgs;
use crate::display::print_registration_report;

pub fn check_command(sources: &SourceArgs, json: bool) -> Result<()> {
    let (fixture, config, site) = load_site(sources)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&site.report)?);
        return Ok(());
    }

    print_registration_report(&site.report, &config, fixture.subject_kinds.len());
    Ok(())
}
