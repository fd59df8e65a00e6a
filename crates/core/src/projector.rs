//! Metadata field projector
//!
//! Builds the `SEO` and `SeoSettings` field tables over a
//! [`MetadataSource`] and registers them with a [`SchemaHost`]:
//!
//! - `type SEO { title, description, canonicalUrl, socialImage, ... }`
//! - `type SeoSettings { separator }`
//! - `RootQuery.seoSettings: SeoSettings`
//! - `<Kind>.seo: SEO` for every content type and taxonomy
//!
//! Subject kinds are read once, when [`Projector::register`] runs. Kinds the
//! host exposes afterwards do not get a `seo` field.

use crate::{
    config::ProjectorConfig,
    error::{Error, Result},
    field::{FieldSpec, FieldTable},
    host::{FieldOutput, FieldRegistration, ResolveInfo, Resolver, SchemaHost},
    resolver::{Resolution, resolve_metadata_with_errors},
    source::MetadataSource,
    types::{CompositeRecord, RequestContext, SubjectIdentity, SubjectKind, TypeRef, Value},
};
use serde::Serialize;
use serde_json::Map;
use std::sync::Arc;

fn text_field<F>(name: &str, description: &str, source: &Arc<dyn MetadataSource>, read: F) -> FieldSpec
where
    F: Fn(&dyn MetadataSource, &SubjectIdentity) -> Result<Option<String>> + Send + Sync + 'static,
{
    let source = Arc::clone(source);
    let field = name.to_string();
    FieldSpec::new(name, TypeRef::string(), move |subject, _| {
        let text = read(source.as_ref(), subject)
            .map_err(|e| Error::field(&field, e.to_string()))?;
        Ok(text.filter(|text| !text.is_empty()).map(Value::String))
    })
    .with_description(description)
}

fn social_image_field(source: &Arc<dyn MetadataSource>, media_type: &str) -> FieldSpec {
    let source = Arc::clone(source);
    FieldSpec::new("socialImage", TypeRef::object(media_type), move |subject, ctx| {
        // Only the most recently selected image is exposed
        let images = source
            .image_details(subject)
            .map_err(|e| Error::field("socialImage", e.to_string()))?;
        let Some(image) = images.first() else {
            return Ok(None);
        };

        match ctx.media_loader() {
            Some(loader) => loader
                .load_media(image.id)
                .map_err(|e| Error::field("socialImage", e.to_string())),
            None => {
                let mut media = Map::new();
                media.insert("databaseId".to_string(), Value::from(image.id));
                if let Some(url) = &image.url {
                    media.insert("sourceUrl".to_string(), Value::String(url.clone()));
                }
                if let Some(alt) = &image.alt {
                    media.insert("altText".to_string(), Value::String(alt.clone()));
                }
                Ok(Some(Value::Object(media)))
            }
        }
    })
}

/// The `SEO` table, in resolution order
pub fn metadata_table(
    source: &Arc<dyn MetadataSource>,
    media_type: &str,
    exclude: &[String],
) -> Result<FieldTable> {
    FieldTable::builder()
        .with_field(text_field("title", "SEO title", source, |s, subject| s.title(subject)))
        .with_field(text_field("description", "SEO description", source, |s, subject| {
            s.description(subject)
        }))
        .with_field(text_field("canonicalUrl", "Canonical URL", source, |s, subject| {
            s.canonical_url(subject)
        }))
        .with_field(social_image_field(source, media_type))
        .with_field(text_field("openGraphTitle", "Open Graph title", source, |s, subject| {
            s.open_graph_title(subject)
        }))
        .with_field(text_field(
            "openGraphDescription",
            "Open Graph description",
            source,
            |s, subject| s.open_graph_description(subject),
        ))
        .with_field(text_field(
            "openGraphType",
            "Open Graph type ('website', 'article', ...)",
            source,
            |s, subject| s.open_graph_type(subject),
        ))
        .with_field(text_field("twitterTitle", "Twitter title", source, |s, subject| {
            s.twitter_title(subject)
        }))
        .with_field(text_field(
            "twitterDescription",
            "Twitter description",
            source,
            |s, subject| s.twitter_description(subject),
        ))
        .exclude(exclude.iter().cloned())
        .build()
}

/// The `SeoSettings` table; accessors ignore the subject
pub fn settings_table(source: &Arc<dyn MetadataSource>, exclude: &[String]) -> Result<FieldTable> {
    let source = Arc::clone(source);
    // The separator is always set; an empty one is still a value
    let separator = FieldSpec::new("separator", TypeRef::string(), move |_, _| {
        source
            .title_separator()
            .map(|separator| Some(Value::String(separator)))
            .map_err(|e| Error::field("separator", e.to_string()))
    })
    .with_description("Title separator setting for seo titles");

    FieldTable::builder()
        .with_field(separator)
        .exclude(exclude.iter().cloned())
        .build()
}

/// What a registration pass did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationReport {
    pub object_types: Vec<String>,
    /// `Owner.field` of the settings field
    pub root_field: String,
    /// Owner types that received the `seo` field
    pub registered: Vec<String>,
    /// Subject kinds without a GraphQL type name
    pub skipped: Vec<String>,
}

/// Projects a metadata source onto a schema host
pub struct Projector {
    config: ProjectorConfig,
    metadata_table: Arc<FieldTable>,
    settings_table: Arc<FieldTable>,
}

impl Projector {
    pub fn new(source: Arc<dyn MetadataSource>) -> Result<Self> {
        Self::with_config(source, ProjectorConfig::default())
    }

    /// Build both field tables once; they are shared by every resolver.
    ///
    /// GraphQL object types need at least one field, so excluding every
    /// field of either table is a configuration error.
    pub fn with_config(source: Arc<dyn MetadataSource>, config: ProjectorConfig) -> Result<Self> {
        config.validate()?;
        let metadata_table = metadata_table(&source, &config.media_type, &config.exclude_fields)?;
        let settings_table = settings_table(&source, &config.exclude_fields)?;
        for (type_name, table) in [
            (&config.seo_type, &metadata_table),
            (&config.settings_type, &settings_table),
        ] {
            if table.is_empty() {
                return Err(Error::ConfigError(format!(
                    "exclude_fields removes every field of {type_name}"
                )));
            }
        }

        Ok(Self {
            config,
            metadata_table: Arc::new(metadata_table),
            settings_table: Arc::new(settings_table),
        })
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    pub fn metadata_table(&self) -> &FieldTable {
        &self.metadata_table
    }

    pub fn settings_table(&self) -> &FieldTable {
        &self.settings_table
    }

    /// Resolve `SEO` for one subject
    pub fn resolve_subject(&self, subject: &SubjectIdentity, ctx: &RequestContext) -> Resolution {
        resolve_metadata_with_errors(subject, ctx, &self.metadata_table)
    }

    /// Resolve `SeoSettings`
    pub fn resolve_settings(&self, ctx: &RequestContext) -> Resolution {
        resolve_metadata_with_errors(&SubjectIdentity::Global, ctx, &self.settings_table)
    }

    /// Register the projected types and fields with `host`.
    ///
    /// `None` means no schema host is installed: nothing is registered and
    /// `MissingHostCapability` is returned. Every check runs before the host
    /// is touched, so a failed registration leaves it unchanged; registering
    /// twice fails with `AlreadyRegistered`.
    pub fn register(&self, host: Option<&mut dyn SchemaHost>) -> Result<RegistrationReport> {
        let Some(host) = host else {
            tracing::warn!("Schema host must be installed and active for SEO fields to be registered");
            return Err(Error::MissingHostCapability(
                "no schema host installed".to_string(),
            ));
        };

        let plan = self.plan(host)?;
        let config = &self.config;
        let mut report = RegistrationReport {
            skipped: plan.skipped,
            ..Default::default()
        };

        host.register_object_type(&config.seo_type, None, &self.metadata_table)?;
        report.object_types.push(config.seo_type.clone());
        host.register_object_type(&config.settings_type, None, &self.settings_table)?;
        report.object_types.push(config.settings_type.clone());

        let settings = Arc::clone(&self.settings_table);
        let settings_resolver: Resolver = Arc::new(move |info: &ResolveInfo<'_>| {
            let resolution = resolve_metadata_with_errors(&SubjectIdentity::Global, info.ctx, &settings);
            Ok(into_output(resolution))
        });
        host.register_field(FieldRegistration {
            owner_type: plan.root_type.clone(),
            field_name: config.settings_field.clone(),
            result_type: TypeRef::object(&config.settings_type),
            description: Some("The SEO Framework settings".to_string()),
            resolver: settings_resolver,
        })?;
        report.root_field = format!("{}.{}", plan.root_type, config.settings_field);

        for (kind, owner) in plan.owners {
            let table = Arc::clone(&self.metadata_table);
            let resolver: Resolver = Arc::new(move |info: &ResolveInfo<'_>| {
                let Some(subject) = kind.identify(info.parent) else {
                    tracing::debug!(
                        "No {} identity on {} parent, resolving {} as absent",
                        kind.name,
                        info.owner_type,
                        info.field_name
                    );
                    return Ok(FieldOutput::default());
                };
                Ok(into_output(resolve_metadata_with_errors(&subject, info.ctx, &table)))
            });

            host.register_field(FieldRegistration {
                owner_type: owner.clone(),
                field_name: config.field_name.clone(),
                result_type: TypeRef::object(&config.seo_type),
                description: Some(format!("The SEO Framework data of the {owner}")),
                resolver,
            })?;
            tracing::debug!("Attached {}.{}", owner, config.field_name);
            report.registered.push(owner);
        }

        tracing::info!(
            "Registered {} on {} types ({} skipped)",
            config.field_name,
            report.registered.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Work out everything registration will do, failing on the first conflict
    fn plan(&self, host: &dyn SchemaHost) -> Result<RegistrationPlan> {
        let config = &self.config;

        for type_name in [&config.seo_type, &config.settings_type] {
            if host.has_type(type_name) {
                return Err(Error::AlreadyRegistered(format!("type {type_name}")));
            }
        }
        for (type_name, table) in [
            (&config.seo_type, &self.metadata_table),
            (&config.settings_type, &self.settings_table),
        ] {
            for field in table.iter() {
                if let TypeRef::Object(result) = field.result_type() {
                    if !host.has_type(result) {
                        return Err(Error::UnknownType(format!(
                            "'{result}' (result type of {type_name}.{})",
                            field.name()
                        )));
                    }
                }
            }
        }

        let root_type = config
            .root_type
            .clone()
            .unwrap_or_else(|| host.root_type().to_string());
        check_attachable(host, &root_type, &config.settings_field)?;

        let mut owners: Vec<(SubjectKind, String)> = Vec::new();
        let mut skipped = Vec::new();
        for kind in host.list_subject_kinds() {
            let Some(owner) = kind.owner_type().map(str::to_string) else {
                if config.skip_unnamed_kinds {
                    tracing::warn!("Subject kind '{}' has no GraphQL type name, skipping", kind.name);
                    skipped.push(kind.name);
                    continue;
                }
                return Err(Error::UnknownSubjectKind(format!(
                    "'{}' has no GraphQL type name",
                    kind.name
                )));
            };

            if owners.iter().any(|(_, planned)| *planned == owner) {
                return Err(Error::AlreadyRegistered(format!(
                    "field {owner}.{} (type shared by subject kind '{}')",
                    config.field_name, kind.name
                )));
            }
            check_attachable(host, &owner, &config.field_name)?;
            owners.push((kind, owner));
        }

        Ok(RegistrationPlan {
            root_type,
            owners,
            skipped,
        })
    }
}

/// Checked registration steps, applied only once all of them passed
struct RegistrationPlan {
    root_type: String,
    owners: Vec<(SubjectKind, String)>,
    skipped: Vec<String>,
}

fn check_attachable(host: &dyn SchemaHost, owner: &str, field_name: &str) -> Result<()> {
    if !host.has_type(owner) {
        return Err(Error::UnknownType(owner.to_string()));
    }
    if host.has_field(owner, field_name) {
        return Err(Error::AlreadyRegistered(format!("field {owner}.{field_name}")));
    }
    Ok(())
}

fn into_output(resolution: Resolution) -> FieldOutput {
    FieldOutput {
        value: resolution.record.map(CompositeRecord::into_value),
        errors: resolution.errors,
    }
}
