//! In-memory schema host
//!
//! Keeps a type registry, executes selections against it with generic
//! field resolution (fields without a resolver read the parent object's
//! key) and renders the registry as GraphQL SDL.

use super::{FieldRegistration, Resolver, ResolveInfo, SchemaHost, Selection};
use crate::{
    error::{Error, Result},
    field::FieldTable,
    types::{RequestContext, SubjectKind, TypeRef, Value},
};
use serde::Serialize;
use serde_json::Map;
use std::fmt::Write as _;

#[derive(Clone)]
struct HostField {
    name: String,
    result_type: TypeRef,
    description: Option<String>,
    resolver: Option<Resolver>,
}

#[derive(Clone)]
struct ObjectType {
    name: String,
    description: Option<String>,
    fields: Vec<HostField>,
    /// Declared by the host itself (root, content and taxonomy types) rather
    /// than registered; fields of external types are read off the parent
    external: bool,
}

impl ObjectType {
    fn external(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            fields: Vec::new(),
            external: true,
        }
    }

    fn field(&self, name: &str) -> Option<&HostField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A field-level error raised while executing a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionError {
    pub path: Vec<String>,
    pub message: String,
}

/// Partial results: `data` holds whatever resolved, `errors` what did not
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub data: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ExecutionError>,
}

/// Schema host holding its registry in memory
#[derive(Clone)]
pub struct InMemorySchemaHost {
    root_type: String,
    subject_kinds: Vec<SubjectKind>,
    types: Vec<ObjectType>,
}

impl InMemorySchemaHost {
    /// Create a host exposing the given subject kinds.
    ///
    /// The root query type and every kind's owning type are declared up
    /// front so fields can be attached to them.
    pub fn new(subject_kinds: Vec<SubjectKind>) -> Self {
        Self::with_root_type("RootQuery", subject_kinds)
    }

    pub fn with_root_type(root_type: impl Into<String>, subject_kinds: Vec<SubjectKind>) -> Self {
        let root_type = root_type.into();
        let mut host = Self {
            types: vec![ObjectType::external(&root_type)],
            root_type,
            subject_kinds: Vec::new(),
        };
        for kind in subject_kinds {
            if let Some(owner) = kind.owner_type() {
                host.declare_type(owner);
            }
            host.subject_kinds.push(kind);
        }
        host
    }

    /// Declare a type the host provides on its own, e.g. `MediaItem`
    pub fn declare_type(&mut self, name: &str) {
        if !self.has_type(name) {
            self.types.push(ObjectType::external(name));
        }
    }

    /// Expose another subject kind. Registration already performed does not
    /// pick it up.
    pub fn add_subject_kind(&mut self, kind: SubjectKind) {
        if let Some(owner) = kind.owner_type() {
            self.declare_type(owner);
        }
        self.subject_kinds.push(kind);
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.object_type(name).is_some()
    }

    /// Names of the fields attached to a type, in registration order
    pub fn field_names(&self, type_name: &str) -> Vec<&str> {
        self.object_type(type_name)
            .map(|ty| ty.fields.iter().map(|field| field.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Result type of a field, if the field exists
    pub fn field_type(&self, type_name: &str, field_name: &str) -> Option<&TypeRef> {
        self.object_type(type_name)
            .and_then(|ty| ty.field(field_name))
            .map(|field| &field.result_type)
    }

    fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.types.iter().find(|ty| ty.name == name)
    }

    fn object_type_mut(&mut self, name: &str) -> Option<&mut ObjectType> {
        self.types.iter_mut().find(|ty| ty.name == name)
    }

    fn check_result_type(&self, result_type: &TypeRef, context: &str) -> Result<()> {
        match result_type {
            TypeRef::String => Ok(()),
            TypeRef::Object(name) if self.has_type(name) => Ok(()),
            TypeRef::Object(name) => Err(Error::UnknownType(format!(
                "'{name}' (result type of {context})"
            ))),
        }
    }

    /// Execute a selection against `type_name`, starting from `parent`
    pub fn execute(
        &self,
        type_name: &str,
        parent: &Value,
        selection: &[Selection],
        ctx: &RequestContext,
    ) -> Result<ExecutionResult> {
        let mut errors = Vec::new();
        let mut path = Vec::new();
        let data = self.execute_object(type_name, parent, selection, ctx, &mut path, &mut errors)?;
        Ok(ExecutionResult { data, errors })
    }

    /// Execute a selection on the root query type
    pub fn query(&self, selection: &[Selection], ctx: &RequestContext) -> Result<ExecutionResult> {
        self.execute(&self.root_type, &Value::Null, selection, ctx)
    }

    fn execute_object(
        &self,
        type_name: &str,
        parent: &Value,
        selection: &[Selection],
        ctx: &RequestContext,
        path: &mut Vec<String>,
        errors: &mut Vec<ExecutionError>,
    ) -> Result<Value> {
        let object_type = self
            .object_type(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.to_string()))?;

        let mut data = Map::new();
        for item in selection {
            path.push(item.name.clone());
            let value = match object_type.field(&item.name) {
                Some(field) => {
                    let value = self.resolve_field(object_type, field, parent, ctx, path, errors);
                    self.complete(Some(&field.result_type), value, item, ctx, path, errors)?
                }
                None if object_type.external => {
                    let value = parent.get(&item.name).cloned().unwrap_or(Value::Null);
                    self.complete(None, value, item, ctx, path, errors)?
                }
                None => {
                    return Err(Error::UnknownField(format!("{}.{}", type_name, item.name)));
                }
            };
            path.pop();
            data.insert(item.name.clone(), value);
        }

        Ok(Value::Object(data))
    }

    fn resolve_field(
        &self,
        owner: &ObjectType,
        field: &HostField,
        parent: &Value,
        ctx: &RequestContext,
        path: &[String],
        errors: &mut Vec<ExecutionError>,
    ) -> Value {
        let Some(resolver) = &field.resolver else {
            return parent.get(&field.name).cloned().unwrap_or(Value::Null);
        };

        let info = ResolveInfo {
            owner_type: &owner.name,
            field_name: &field.name,
            parent,
            ctx,
        };
        match resolver(&info) {
            Ok(output) => {
                for failure in output.errors {
                    let mut failure_path = path.to_vec();
                    failure_path.push(failure.field);
                    errors.push(ExecutionError {
                        path: failure_path,
                        message: failure.message,
                    });
                }
                output.value.unwrap_or(Value::Null)
            }
            Err(e) => {
                tracing::warn!("Resolver for {}.{} failed: {}", owner.name, field.name, e);
                errors.push(ExecutionError {
                    path: path.to_vec(),
                    message: e.to_string(),
                });
                Value::Null
            }
        }
    }

    /// Apply the sub-selection to a resolved value
    fn complete(
        &self,
        result_type: Option<&TypeRef>,
        value: Value,
        item: &Selection,
        ctx: &RequestContext,
        path: &mut Vec<String>,
        errors: &mut Vec<ExecutionError>,
    ) -> Result<Value> {
        if item.children.is_empty() || value.is_null() {
            return Ok(value);
        }

        match value {
            Value::Array(values) => values
                .into_iter()
                .map(|value| self.complete(result_type, value, item, ctx, path, errors))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Object(_) => match result_type {
                Some(TypeRef::Object(name)) => {
                    self.execute_object(name, &value, &item.children, ctx, path, errors)
                }
                _ => Ok(project(&value, &item.children)),
            },
            _ => Err(Error::UnknownField(format!(
                "{} has no sub-fields",
                path.join(".")
            ))),
        }
    }

    /// Render the registry as GraphQL SDL. Types without fields are left out.
    pub fn to_sdl(&self) -> String {
        let mut sdl = String::new();
        for object_type in self.types.iter().filter(|ty| !ty.fields.is_empty()) {
            if !sdl.is_empty() {
                sdl.push('\n');
            }
            if let Some(description) = &object_type.description {
                let _ = writeln!(sdl, "\"{}\"", escape(description));
            }
            let _ = writeln!(sdl, "type {} {{", object_type.name);
            for field in &object_type.fields {
                if let Some(description) = &field.description {
                    let _ = writeln!(sdl, "  \"{}\"", escape(description));
                }
                let _ = writeln!(sdl, "  {}: {}", field.name, field.result_type);
            }
            sdl.push_str("}\n");
        }
        sdl
    }
}

/// Read the selected keys off a plain object
fn project(value: &Value, selection: &[Selection]) -> Value {
    let mut data = Map::new();
    for item in selection {
        let field = value.get(&item.name).cloned().unwrap_or(Value::Null);
        let field = if item.children.is_empty() || field.is_null() {
            field
        } else {
            project(&field, &item.children)
        };
        data.insert(item.name.clone(), field);
    }
    Value::Object(data)
}

fn escape(description: &str) -> String {
    description.replace('\\', "\\\\").replace('"', "\\\"")
}

impl SchemaHost for InMemorySchemaHost {
    fn list_subject_kinds(&self) -> Vec<SubjectKind> {
        self.subject_kinds.clone()
    }

    fn root_type(&self) -> &str {
        &self.root_type
    }

    fn has_type(&self, name: &str) -> bool {
        self.object_type(name).is_some()
    }

    fn has_field(&self, type_name: &str, field_name: &str) -> bool {
        self.field_type(type_name, field_name).is_some()
    }

    fn register_object_type(
        &mut self,
        name: &str,
        description: Option<&str>,
        fields: &FieldTable,
    ) -> Result<()> {
        if self.has_type(name) {
            return Err(Error::AlreadyRegistered(format!("type {name}")));
        }
        for field in fields {
            self.check_result_type(field.result_type(), &format!("{name}.{}", field.name()))?;
        }

        tracing::debug!("Registering object type {} with {} fields", name, fields.len());
        self.types.push(ObjectType {
            name: name.to_string(),
            description: description.map(str::to_string),
            fields: fields
                .iter()
                .map(|field| HostField {
                    name: field.name().to_string(),
                    result_type: field.result_type().clone(),
                    description: field.description().map(str::to_string),
                    resolver: None,
                })
                .collect(),
            external: false,
        });
        Ok(())
    }

    fn register_field(&mut self, registration: FieldRegistration) -> Result<()> {
        let FieldRegistration {
            owner_type,
            field_name,
            result_type,
            description,
            resolver,
        } = registration;

        self.check_result_type(&result_type, &format!("{owner_type}.{field_name}"))?;

        let owner = self
            .object_type_mut(&owner_type)
            .ok_or_else(|| Error::UnknownType(owner_type.clone()))?;
        if owner.field(&field_name).is_some() {
            return Err(Error::AlreadyRegistered(format!("field {owner_type}.{field_name}")));
        }

        tracing::debug!("Registering field {}.{}: {}", owner_type, field_name, result_type);
        owner.fields.push(HostField {
            name: field_name,
            result_type,
            description,
            resolver: Some(resolver),
        });
        Ok(())
    }
}
