use crate::utils::id_from_value;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Whether a subject kind is a content type or a taxonomy.
///
/// Parsed case-insensitively, so host dumps using `Content` or `TAXONOMY` load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum SubjectCategory {
    Content,
    Taxonomy,
}

impl FromStr for SubjectCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("content") {
            Ok(SubjectCategory::Content)
        } else if s.eq_ignore_ascii_case("taxonomy") {
            Ok(SubjectCategory::Taxonomy)
        } else {
            Err(format!(
                "unknown variant '{s}', expected one of: content, taxonomy"
            ))
        }
    }
}

impl TryFrom<String> for SubjectCategory {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// A content type or taxonomy exposed by the schema host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectKind {
    /// Host-side identifier, e.g. `post` or `category`
    pub name: String,

    pub category: SubjectCategory,

    /// Name of the GraphQL type that owns the `seo` field, e.g. `Post`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphql_single_name: Option<String>,
}

impl SubjectKind {
    pub fn content(name: impl Into<String>, single_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: SubjectCategory::Content,
            graphql_single_name: Some(single_name.into()),
        }
    }

    pub fn taxonomy(name: impl Into<String>, single_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: SubjectCategory::Taxonomy,
            graphql_single_name: Some(single_name.into()),
        }
    }

    /// The owning GraphQL type, if the host exposes one
    pub fn owner_type(&self) -> Option<&str> {
        self.graphql_single_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Derive the identity accessors need from a resolved parent node.
    ///
    /// Content nodes carry their id under `ID`, term nodes under `term_id`.
    pub fn identify(&self, node: &Value) -> Option<SubjectIdentity> {
        match self.category {
            SubjectCategory::Content => node
                .get("ID")
                .and_then(id_from_value)
                .map(|id| SubjectIdentity::Content { id }),
            SubjectCategory::Taxonomy => {
                node.get("term_id")
                    .and_then(id_from_value)
                    .map(|id| SubjectIdentity::Term {
                        id,
                        taxonomy: self.name.clone(),
                    })
            }
        }
    }
}

/// Identity handed to every accessor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubjectIdentity {
    Content { id: u64 },
    Term { id: u64, taxonomy: String },
    /// Site-wide settings, no subject
    Global,
}

impl fmt::Display for SubjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectIdentity::Content { id } => write!(f, "content:{id}"),
            SubjectIdentity::Term { id, taxonomy } => write!(f, "{taxonomy}:{id}"),
            SubjectIdentity::Global => f.write_str("global"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_is_case_insensitive() {
        let kind: SubjectKind = serde_json::from_value(json!({
            "name": "category",
            "category": "TAXONOMY",
            "graphql_single_name": "Category"
        }))
        .unwrap();
        assert_eq!(kind.category, SubjectCategory::Taxonomy);

        let err = serde_json::from_value::<SubjectCategory>(json!("menu")).unwrap_err();
        assert!(err.to_string().contains("expected one of: content, taxonomy"));

        assert_eq!("Content".parse(), Ok(SubjectCategory::Content));
        assert_eq!(serde_json::to_value(SubjectCategory::Taxonomy).unwrap(), json!("taxonomy"));
    }

    #[test]
    fn test_owner_type_ignores_blank_names() {
        let mut kind = SubjectKind::content("post", "Post");
        assert_eq!(kind.owner_type(), Some("Post"));

        kind.graphql_single_name = Some("  ".to_string());
        assert_eq!(kind.owner_type(), None);

        kind.graphql_single_name = None;
        assert_eq!(kind.owner_type(), None);
    }

    #[test]
    fn test_identify_content_and_terms() {
        let post = SubjectKind::content("post", "Post");
        assert_eq!(
            post.identify(&json!({ "ID": 12 })),
            Some(SubjectIdentity::Content { id: 12 })
        );
        assert_eq!(post.identify(&json!({ "term_id": 12 })), None);

        let tag = SubjectKind::taxonomy("post_tag", "Tag");
        assert_eq!(
            tag.identify(&json!({ "term_id": "5" })),
            Some(SubjectIdentity::Term {
                id: 5,
                taxonomy: "post_tag".to_string()
            })
        );
    }

    #[test]
    fn test_identity_display() {
        assert_eq!(SubjectIdentity::Content { id: 3 }.to_string(), "content:3");
        assert_eq!(
            SubjectIdentity::Term {
                id: 4,
                taxonomy: "category".to_string()
            }
            .to_string(),
            "category:4"
        );
        assert_eq!(SubjectIdentity::Global.to_string(), "global");
    }
}
