//! Per-subject resolution of a field table into a [`CompositeRecord`]

use crate::{
    field::FieldTable,
    types::{CompositeRecord, RequestContext, SubjectIdentity, Value},
};
use serde::Serialize;

/// A single accessor failure, isolated to its field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub subject: String,
    pub message: String,
}

/// Outcome of resolving one subject: the record, if anything resolved, and
/// whatever accessors failed along the way
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub record: Option<CompositeRecord>,
    pub errors: Vec<FieldError>,
}

/// Resolve a subject against a field table.
///
/// Returns `None` when no field produced a value, so the owning field
/// resolves to null rather than an empty object. Failed accessors are
/// treated as absent.
pub fn resolve_metadata(
    subject: &SubjectIdentity,
    ctx: &RequestContext,
    table: &FieldTable,
) -> Option<CompositeRecord> {
    resolve_metadata_with_errors(subject, ctx, table).record
}

/// Same as [`resolve_metadata`], keeping the per-field errors
pub fn resolve_metadata_with_errors(
    subject: &SubjectIdentity,
    ctx: &RequestContext,
    table: &FieldTable,
) -> Resolution {
    let mut record = CompositeRecord::new();
    let mut errors = Vec::new();

    for field in table {
        match field.access(subject, ctx) {
            Ok(Some(Value::Null)) | Ok(None) => {}
            Ok(Some(value)) => record.insert(field.name(), value),
            Err(e) => {
                tracing::warn!(
                    field = field.name(),
                    subject = %subject,
                    request_id = ctx.request_id().unwrap_or("-"),
                    "Accessor failed, resolving field as absent: {}",
                    e
                );
                errors.push(FieldError {
                    field: field.name().to_string(),
                    subject: subject.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        "Resolved {} of {} fields for {}",
        record.len(),
        table.len(),
        subject
    );

    Resolution {
        record: (!record.is_empty()).then_some(record),
        errors,
    }
}
