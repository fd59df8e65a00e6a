use crate::error::Result;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Loads media nodes (the `MediaItem` type) by database id
pub trait MediaLoader: Send + Sync {
    fn load_media(&self, id: u64) -> Result<Option<Value>>;
}

/// Per-request context handed unchanged to every accessor
#[derive(Clone, Default)]
pub struct RequestContext {
    request_id: Option<String>,
    media: Option<Arc<dyn MediaLoader>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_media_loader(mut self, loader: Arc<dyn MediaLoader>) -> Self {
        self.media = Some(loader);
        self
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn media_loader(&self) -> Option<&dyn MediaLoader> {
        self.media.as_deref()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("request_id", &self.request_id)
            .field("media_loader", &self.media.is_some())
            .finish()
    }
}
