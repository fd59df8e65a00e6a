//! seo-projector - Project SEO metadata onto a typed query schema
//!
//! This crate provides functionality to:
//! - Describe metadata fields as validated, ordered field tables
//! - Register `SEO` / `SeoSettings` types and `seo` fields with a schema host
//! - Resolve a subject's metadata into a sparse record, isolating accessor failures
pub mod config;
pub mod error;
pub mod field;
pub mod host;
pub mod projector;
pub mod resolver;
pub mod source;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::{ConfigLoader, ProjectorConfig};
pub use field::{FieldSpec, FieldTable};
pub use host::{InMemorySchemaHost, SchemaHost};
pub use projector::{Projector, RegistrationReport};
pub use resolver::{FieldError, Resolution, resolve_metadata};
pub use source::{MetadataSource, StaticMetadataSource};
