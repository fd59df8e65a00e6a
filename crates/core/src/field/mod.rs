//! Field tables
//!
//! A [`FieldTable`] is the declarative mapping behind every projected type:
//! field name, result type, description and the accessor that produces the
//! value for a subject. Tables are validated once when built and never
//! change afterwards.

use crate::{
    error::{Error, Result},
    types::{RequestContext, SubjectIdentity, TypeRef, Value},
};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, LazyLock};

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").expect("field name pattern is valid")
});

/// Check a name against the GraphQL name grammar
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Reads one metadata value for a subject
pub type Accessor =
    Arc<dyn Fn(&SubjectIdentity, &RequestContext) -> Result<Option<Value>> + Send + Sync>;

/// One exposed metadata field
#[derive(Clone)]
pub struct FieldSpec {
    name: String,
    result_type: TypeRef,
    description: Option<String>,
    accessor: Accessor,
}

impl FieldSpec {
    pub fn new<F>(name: impl Into<String>, result_type: TypeRef, accessor: F) -> Self
    where
        F: Fn(&SubjectIdentity, &RequestContext) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            result_type,
            description: None,
            accessor: Arc::new(accessor),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn result_type(&self) -> &TypeRef {
        &self.result_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Invoke the accessor
    pub fn access(&self, subject: &SubjectIdentity, ctx: &RequestContext) -> Result<Option<Value>> {
        (self.accessor)(subject, ctx)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("result_type", &self.result_type)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Immutable, ordered set of field specs with unique names
#[derive(Debug, Clone, Default)]
pub struct FieldTable {
    fields: Vec<FieldSpec>,
}

impl FieldTable {
    pub fn builder() -> FieldTableBuilder {
        FieldTableBuilder::new()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldTable {
    type Item = &'a FieldSpec;
    type IntoIter = std::slice::Iter<'a, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Builder for [`FieldTable`]
#[derive(Debug, Default)]
pub struct FieldTableBuilder {
    fields: Vec<FieldSpec>,
    excluded: HashSet<String>,
}

impl FieldTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; declaration order is resolution order
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Leave the named fields out of the built table
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    /// Validate and build the table.
    ///
    /// Every declared field is validated, excluded or not, so a bad
    /// declaration never hides behind configuration.
    pub fn build(self) -> Result<FieldTable> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !is_valid_name(&field.name) {
                return Err(Error::InvalidFieldName(field.name.clone()));
            }
            if let TypeRef::Object(type_name) = &field.result_type {
                if !is_valid_name(type_name) {
                    return Err(Error::UnknownType(format!(
                        "'{}' (result type of field '{}')",
                        type_name, field.name
                    )));
                }
            }
            if !seen.insert(field.name.as_str()) {
                return Err(Error::DuplicateField(field.name.clone()));
            }
        }

        for name in &self.excluded {
            if !seen.contains(name.as_str()) {
                tracing::debug!("Excluded field '{}' is not in this table", name);
            }
        }

        let fields = self
            .fields
            .into_iter()
            .filter(|field| !self.excluded.contains(&field.name))
            .collect();

        Ok(FieldTable { fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn constant(name: &str, value: Value) -> FieldSpec {
        FieldSpec::new(name, TypeRef::string(), move |_, _| Ok(Some(value.clone())))
    }

    #[test]
    fn test_build_keeps_declaration_order() {
        let table = FieldTable::builder()
            .with_field(constant("title", json!("a")))
            .with_field(constant("description", json!("b")))
            .with_field(constant("canonicalUrl", json!("c")))
            .build()
            .unwrap();

        assert_eq!(table.names(), vec!["title", "description", "canonicalUrl"]);
        assert_eq!(table.len(), 3);
        assert!(table.get("description").is_some());
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = FieldTable::builder()
            .with_field(constant("title", json!("a")))
            .with_field(constant("title", json!("b")))
            .build()
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateField(name) if name == "title"));
    }

    #[test]
    fn test_invalid_names_rejected() {
        for bad in ["", "1title", "og-title", "seo title"] {
            let err = FieldTable::builder()
                .with_field(constant(bad, json!("x")))
                .build()
                .unwrap_err();
            assert!(matches!(err, Error::InvalidFieldName(_)), "{bad:?} accepted");
        }
    }

    #[test]
    fn test_invalid_result_type_rejected() {
        let err = FieldTable::builder()
            .with_field(FieldSpec::new("socialImage", TypeRef::object(""), |_, _| Ok(None)))
            .build()
            .unwrap_err();

        assert!(matches!(err, Error::UnknownType(_)));
    }

    #[test]
    fn test_exclude_drops_fields() {
        let table = FieldTable::builder()
            .with_field(constant("title", json!("a")))
            .with_field(constant("twitterTitle", json!("b")))
            .exclude(["twitterTitle", "notAField"])
            .build()
            .unwrap();

        assert_eq!(table.names(), vec!["title"]);
    }

    #[test]
    fn test_excluded_duplicates_still_rejected() {
        let err = FieldTable::builder()
            .with_field(constant("title", json!("a")))
            .with_field(constant("title", json!("b")))
            .exclude(["title"])
            .build()
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateField(_)));
    }

    #[test]
    fn test_access_invokes_accessor() {
        let field = FieldSpec::new("title", TypeRef::string(), |subject, _| {
            Ok(Some(json!(subject.to_string())))
        })
        .with_description("SEO title");

        let value = field
            .access(&SubjectIdentity::Content { id: 9 }, &RequestContext::new())
            .unwrap();
        assert_eq!(value, Some(json!("content:9")));
        assert_eq!(field.description(), Some("SEO title"));
    }
}
