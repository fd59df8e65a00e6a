//! Schema host interface
//!
//! The projector only talks to the query layer through [`SchemaHost`]:
//! enumerate subject kinds, register object types, attach fields with
//! resolvers. [`InMemorySchemaHost`] is a self-contained implementation
//! that can also execute selections and render SDL.

pub mod memory;
pub mod selection;

pub use memory::{ExecutionError, ExecutionResult, InMemorySchemaHost};
pub use selection::{Selection, parse_selection};

use crate::{
    error::Result,
    field::FieldTable,
    resolver::FieldError,
    types::{RequestContext, SubjectKind, TypeRef, Value},
};
use std::fmt;
use std::sync::Arc;

/// What a resolver sees when it is invoked
#[derive(Debug, Clone, Copy)]
pub struct ResolveInfo<'a> {
    /// Type the field is attached to
    pub owner_type: &'a str,
    pub field_name: &'a str,
    /// Already-resolved parent object (`null` on the root type)
    pub parent: &'a Value,
    pub ctx: &'a RequestContext,
}

/// Value produced by a resolver plus any isolated field failures
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOutput {
    pub value: Option<Value>,
    pub errors: Vec<FieldError>,
}

impl From<Option<Value>> for FieldOutput {
    fn from(value: Option<Value>) -> Self {
        Self {
            value,
            errors: Vec::new(),
        }
    }
}

/// Field resolver attached through [`SchemaHost::register_field`]
pub type Resolver = Arc<dyn Fn(&ResolveInfo<'_>) -> Result<FieldOutput> + Send + Sync>;

/// A field to attach to an existing type
#[derive(Clone)]
pub struct FieldRegistration {
    pub owner_type: String,
    pub field_name: String,
    pub result_type: TypeRef,
    pub description: Option<String>,
    pub resolver: Resolver,
}

impl fmt::Debug for FieldRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistration")
            .field("owner_type", &self.owner_type)
            .field("field_name", &self.field_name)
            .field("result_type", &self.result_type)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Type/field registration capabilities of a query schema host
pub trait SchemaHost {
    /// Content types and taxonomies the schema currently exposes
    fn list_subject_kinds(&self) -> Vec<SubjectKind>;

    /// Name of the synthetic root query type
    fn root_type(&self) -> &str {
        "RootQuery"
    }

    /// Whether a type with this name exists, host-provided or registered
    fn has_type(&self, name: &str) -> bool;

    /// Whether `type_name` already carries a field called `field_name`
    fn has_field(&self, type_name: &str, field_name: &str) -> bool;

    /// Declare a new composite type whose fields are the table's keys
    fn register_object_type(
        &mut self,
        name: &str,
        description: Option<&str>,
        fields: &FieldTable,
    ) -> Result<()>;

    /// Attach a field with a resolver to an existing type
    fn register_field(&mut self, registration: FieldRegistration) -> Result<()>;
}
