//! Metadata sources
//!
//! The projector never computes SEO metadata itself; it asks a
//! [`MetadataSource`] injected at boot.

pub mod static_source;

pub use static_source::{SeoEntry, StaticMetadataSource};

use crate::{error::Result, types::SubjectIdentity};
use serde::{Deserialize, Serialize};

/// One social image candidate for a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDetails {
    /// Attachment id of the image
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Read-only accessors of an SEO metadata provider.
///
/// Implementations must be safe to call concurrently; the projector shares
/// one instance across every resolver.
pub trait MetadataSource: Send + Sync {
    fn title(&self, subject: &SubjectIdentity) -> Result<Option<String>>;

    fn description(&self, subject: &SubjectIdentity) -> Result<Option<String>>;

    /// Canonical URL, honoring a custom canonical set on the subject
    fn canonical_url(&self, subject: &SubjectIdentity) -> Result<Option<String>>;

    /// Social image candidates, most recently selected first
    fn image_details(&self, subject: &SubjectIdentity) -> Result<Vec<ImageDetails>>;

    fn open_graph_title(&self, subject: &SubjectIdentity) -> Result<Option<String>>;

    fn open_graph_description(&self, subject: &SubjectIdentity) -> Result<Option<String>>;

    /// Open Graph type ('website', 'article', ...)
    fn open_graph_type(&self, subject: &SubjectIdentity) -> Result<Option<String>>;

    fn twitter_title(&self, subject: &SubjectIdentity) -> Result<Option<String>>;

    fn twitter_description(&self, subject: &SubjectIdentity) -> Result<Option<String>>;

    /// Site-wide title separator
    fn title_separator(&self) -> Result<String>;
}
