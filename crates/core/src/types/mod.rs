pub mod context;
pub mod record;
pub mod subject;
pub mod type_ref;

// Re-export commonly used types
pub use context::{MediaLoader, RequestContext};
pub use record::CompositeRecord;
pub use subject::{SubjectCategory, SubjectIdentity, SubjectKind};
pub use type_ref::TypeRef;

/// Values flowing through resolvers
pub use serde_json::Value;
