use anyhow::{Context, Result, anyhow};
use seo_projector_core::{
    FieldTable, RequestContext, SubjectCategory,
    host::{ExecutionResult, parse_selection},
};
use serde_json::json;
use tracing::debug;

use super::load_site;
use crate::cli::SourceArgs;
use crate::display::print_execution_errors;
use crate::utils::parse_subject_ref;

/// Sub-fields of `MediaItem` selected when nothing else is asked for
const MEDIA_FIELDS: &str = "databaseId sourceUrl altText";

/// Every field of a table, object-typed ones expanded to their media fields
pub fn default_selection(table: &FieldTable) -> String {
    table
        .iter()
        .map(|field| {
            if field.result_type().is_scalar() {
                field.name().to_string()
            } else {
                format!("{} {{ {} }}", field.name(), MEDIA_FIELDS)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_result(result: &ExecutionResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&result.data)?);
    print_execution_errors(&result.errors);
    Ok(())
}

pub fn resolve_command(sources: &SourceArgs, subject_arg: &str, select: Option<&str>) -> Result<()> {
    let (kind_name, id) = parse_subject_ref(subject_arg)?;
    debug!("Resolving {} {}", kind_name, id);

    let (fixture, config, site) = load_site(sources)?;
    let kind = fixture
        .subject_kind(&kind_name)
        .ok_or_else(|| anyhow!("Unknown subject kind '{}'", kind_name))?;
    let owner = kind
        .owner_type()
        .ok_or_else(|| anyhow!("Subject kind '{}' has no GraphQL type", kind_name))?;

    let parent = match kind.category {
        SubjectCategory::Content => json!({ "ID": id }),
        SubjectCategory::Taxonomy => json!({ "term_id": id }),
    };
    let inner = match select {
        Some(select) => select.to_string(),
        None => default_selection(site.projector.metadata_table()),
    };
    let selection = parse_selection(&format!("{} {{ {} }}", config.field_name, inner))
        .context("Invalid selection")?;

    let ctx = RequestContext::new().with_request_id(format!("cli-{kind_name}:{id}"));
    let result = site.host.execute(owner, &parent, &selection, &ctx)?;
    print_result(&result)
}

pub fn settings_command(sources: &SourceArgs, select: Option<&str>) -> Result<()> {
    let (_, config, site) = load_site(sources)?;
    let inner = match select {
        Some(select) => select.to_string(),
        None => default_selection(site.projector.settings_table()),
    };
    let selection = parse_selection(&format!("{} {{ {} }}", config.settings_field, inner))
        .context("Invalid selection")?;

    let result = site
        .host
        .query(&selection, &RequestContext::new().with_request_id("cli-settings"))?;
    print_result(&result)
}
