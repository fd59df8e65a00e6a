//! Registration against a schema host that is not the in-memory one

use seo_projector_core::{
    Error, FieldTable, Projector, RequestContext, SchemaHost, StaticMetadataSource, SubjectKind,
    host::{FieldRegistration, ResolveInfo},
    source::SeoEntry,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Records what was registered, keyed by type name
#[derive(Default)]
struct RecordingHost {
    kinds: Vec<SubjectKind>,
    /// Types the host brings along: root, media and every kind's owner
    provided: Vec<String>,
    types: BTreeMap<String, Vec<String>>,
    fields: Vec<FieldRegistration>,
}

impl RecordingHost {
    fn new(kinds: Vec<SubjectKind>) -> Self {
        let mut provided = vec!["Query".to_string(), "MediaItem".to_string()];
        provided.extend(kinds.iter().filter_map(|kind| kind.owner_type().map(str::to_string)));
        Self {
            kinds,
            provided,
            ..Default::default()
        }
    }

    fn field(&self, owner: &str, name: &str) -> Option<&FieldRegistration> {
        self.fields
            .iter()
            .find(|field| field.owner_type == owner && field.field_name == name)
    }
}

impl SchemaHost for RecordingHost {
    fn list_subject_kinds(&self) -> Vec<SubjectKind> {
        self.kinds.clone()
    }

    fn root_type(&self) -> &str {
        "Query"
    }

    fn has_type(&self, name: &str) -> bool {
        self.provided.iter().any(|provided| provided == name) || self.types.contains_key(name)
    }

    fn has_field(&self, type_name: &str, field_name: &str) -> bool {
        self.field(type_name, field_name).is_some()
    }

    fn register_object_type(
        &mut self,
        name: &str,
        _description: Option<&str>,
        fields: &FieldTable,
    ) -> seo_projector_core::Result<()> {
        if self.types.contains_key(name) {
            return Err(Error::AlreadyRegistered(format!("type {name}")));
        }
        let names = fields.names().into_iter().map(str::to_string).collect();
        self.types.insert(name.to_string(), names);
        Ok(())
    }

    fn register_field(&mut self, registration: FieldRegistration) -> seo_projector_core::Result<()> {
        self.fields.push(registration);
        Ok(())
    }
}

fn projector() -> Projector {
    let source = StaticMetadataSource::new().with_post(
        5,
        SeoEntry {
            title: Some("Recorded".to_string()),
            open_graph_type: Some("article".to_string()),
            ..Default::default()
        },
    );
    Projector::new(Arc::new(source)).unwrap()
}

#[test]
fn test_registers_through_trait() {
    let mut host = RecordingHost::new(vec![
        SubjectKind::content("post", "Post"),
        SubjectKind::taxonomy("post_tag", "Tag"),
    ]);

    let report = projector().register(Some(&mut host)).unwrap();

    assert_eq!(report.root_field, "Query.seoSettings");
    assert_eq!(host.types["SEO"].len(), 9);
    assert_eq!(host.types["SeoSettings"], vec!["separator"]);
    assert!(host.field("Post", "seo").is_some());
    assert!(host.field("Tag", "seo").is_some());
    assert_eq!(host.fields.len(), 3);
}

#[test]
fn test_resolver_reads_parent_identity() {
    let mut host = RecordingHost::new(vec![SubjectKind::content("post", "Post")]);
    projector().register(Some(&mut host)).unwrap();

    let registration = host.field("Post", "seo").unwrap();
    let ctx = RequestContext::new();
    let parent = json!({ "ID": "5" });
    let output = (registration.resolver)(&ResolveInfo {
        owner_type: "Post",
        field_name: "seo",
        parent: &parent,
        ctx: &ctx,
    })
    .unwrap();

    assert_eq!(
        output.value,
        Some(json!({ "title": "Recorded", "openGraphType": "article" }))
    );
    assert!(output.errors.is_empty());
}

#[test]
fn test_settings_resolver_uses_default_separator() {
    let mut host = RecordingHost::new(Vec::new());
    projector().register(Some(&mut host)).unwrap();

    let registration = host.field("Query", "seoSettings").unwrap();
    let ctx = RequestContext::new();
    let output = (registration.resolver)(&ResolveInfo {
        owner_type: "Query",
        field_name: "seoSettings",
        parent: &serde_json::Value::Null,
        ctx: &ctx,
    })
    .unwrap();

    assert_eq!(output.value, Some(json!({ "separator": "-" })));
}

#[test]
fn test_second_registration_is_rejected() {
    let mut host = RecordingHost::new(vec![SubjectKind::content("post", "Post")]);
    let projector = projector();
    projector.register(Some(&mut host)).unwrap();

    let err = projector.register(Some(&mut host)).unwrap_err();
    assert!(matches!(err, Error::AlreadyRegistered(_)));
    assert_eq!(host.fields.len(), 2);
}

#[test]
fn test_conflicting_host_field_stops_before_any_registration() {
    let mut host = RecordingHost::new(vec![
        SubjectKind::content("post", "Post"),
        SubjectKind::content("page", "Page"),
    ]);
    let existing = projector();
    let mut other = RecordingHost::new(vec![SubjectKind::content("page", "Page")]);
    existing.register(Some(&mut other)).unwrap();
    let taken = other.field("Page", "seo").unwrap().clone();
    host.fields.push(taken);

    let err = projector().register(Some(&mut host)).unwrap_err();

    assert!(matches!(err, Error::AlreadyRegistered(ref what) if what == "field Page.seo"));
    assert!(host.types.is_empty());
    assert_eq!(host.fields.len(), 1);
}
