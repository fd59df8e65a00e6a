use anyhow::{Context, Result};
use seo_projector_core::{
    InMemorySchemaHost, Projector, ProjectorConfig, RegistrationReport, StaticMetadataSource,
    SubjectKind,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Default fixture file name, looked up in the working directory
pub const DEFAULT_FIXTURE: &str = "seo-fixture.json";

/// What the in-memory host exposes plus the metadata behind it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub subject_kinds: Vec<SubjectKind>,

    /// Extra host-provided types, `MediaItem` is always declared
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host_types: Vec<String>,

    #[serde(default)]
    pub metadata: StaticMetadataSource,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))
    }

    pub fn subject_kind(&self, name: &str) -> Option<&SubjectKind> {
        self.subject_kinds.iter().find(|kind| kind.name == name)
    }
}

/// A host with the projector registered on it
pub struct Site {
    pub host: InMemorySchemaHost,
    pub projector: Projector,
    pub report: RegistrationReport,
}

/// Build an in-memory host from a fixture and register the projector on it
pub fn build_site(fixture: &Fixture, config: ProjectorConfig) -> Result<Site> {
    let root_type = config.root_type.clone().unwrap_or_else(|| "RootQuery".to_string());
    let mut host = InMemorySchemaHost::with_root_type(root_type, fixture.subject_kinds.clone());
    host.declare_type(&config.media_type);
    for name in &fixture.host_types {
        host.declare_type(name);
    }

    let projector = Projector::with_config(Arc::new(fixture.metadata.clone()), config)
        .context("Failed to build field tables")?;
    let report = projector
        .register(Some(&mut host))
        .context("Failed to register SEO schema")?;

    Ok(Site {
        host,
        projector,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "subject_kinds": [
            { "name": "post", "category": "content", "graphql_single_name": "Post" },
            { "name": "category", "category": "taxonomy", "graphql_single_name": "Category" },
            { "name": "nav_menu", "category": "taxonomy" }
        ],
        "metadata": {
            "separator": "|",
            "posts": { "1": { "title": "Hello" } }
        }
    }"#;

    #[test]
    fn test_build_site_registers_named_kinds() {
        let fixture: Fixture = serde_json::from_str(FIXTURE).unwrap();
        let site = build_site(&fixture, ProjectorConfig::default()).unwrap();

        assert_eq!(site.report.registered, vec!["Post", "Category"]);
        assert_eq!(site.report.skipped, vec!["nav_menu"]);
        assert!(fixture.subject_kind("category").is_some());
        assert!(fixture.subject_kind("page").is_none());
    }
}
