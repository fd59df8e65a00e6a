use super::{ImageDetails, MetadataSource};
use crate::{error::Result, types::SubjectIdentity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

fn default_separator() -> String {
    "-".to_string()
}

/// Stored SEO metadata of one post or term
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_description: Option<String>,
}

/// Metadata source backed by fixed data, e.g. a JSON fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMetadataSource {
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Entries keyed by post id
    #[serde(default)]
    pub posts: BTreeMap<u64, SeoEntry>,

    /// Entries keyed by taxonomy, then term id
    #[serde(default)]
    pub terms: BTreeMap<String, BTreeMap<u64, SeoEntry>>,
}

impl Default for StaticMetadataSource {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            posts: BTreeMap::new(),
            terms: BTreeMap::new(),
        }
    }
}

impl StaticMetadataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_post(mut self, id: u64, entry: SeoEntry) -> Self {
        self.posts.insert(id, entry);
        self
    }

    pub fn with_term(mut self, taxonomy: impl Into<String>, id: u64, entry: SeoEntry) -> Self {
        self.terms.entry(taxonomy.into()).or_default().insert(id, entry);
        self
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn entry(&self, subject: &SubjectIdentity) -> Option<&SeoEntry> {
        match subject {
            SubjectIdentity::Content { id } => self.posts.get(id),
            SubjectIdentity::Term { id, taxonomy } => {
                self.terms.get(taxonomy).and_then(|terms| terms.get(id))
            }
            SubjectIdentity::Global => None,
        }
    }

    fn text(&self, subject: &SubjectIdentity, pick: fn(&SeoEntry) -> &Option<String>) -> Result<Option<String>> {
        Ok(self.entry(subject).and_then(|entry| pick(entry).clone()))
    }
}

impl MetadataSource for StaticMetadataSource {
    fn title(&self, subject: &SubjectIdentity) -> Result<Option<String>> {
        self.text(subject, |e| &e.title)
    }

    fn description(&self, subject: &SubjectIdentity) -> Result<Option<String>> {
        self.text(subject, |e| &e.description)
    }

    fn canonical_url(&self, subject: &SubjectIdentity) -> Result<Option<String>> {
        self.text(subject, |e| &e.canonical_url)
    }

    fn image_details(&self, subject: &SubjectIdentity) -> Result<Vec<ImageDetails>> {
        Ok(self
            .entry(subject)
            .map(|entry| entry.images.clone())
            .unwrap_or_default())
    }

    fn open_graph_title(&self, subject: &SubjectIdentity) -> Result<Option<String>> {
        self.text(subject, |e| &e.open_graph_title)
    }

    fn open_graph_description(&self, subject: &SubjectIdentity) -> Result<Option<String>> {
        self.text(subject, |e| &e.open_graph_description)
    }

    fn open_graph_type(&self, subject: &SubjectIdentity) -> Result<Option<String>> {
        self.text(subject, |e| &e.open_graph_type)
    }

    fn twitter_title(&self, subject: &SubjectIdentity) -> Result<Option<String>> {
        self.text(subject, |e| &e.twitter_title)
    }

    fn twitter_description(&self, subject: &SubjectIdentity) -> Result<Option<String>> {
        self.text(subject, |e| &e.twitter_description)
    }

    fn title_separator(&self) -> Result<String> {
        Ok(self.separator.clone())
    }
}
