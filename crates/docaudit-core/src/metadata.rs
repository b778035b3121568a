//! Field metadata extraction.
//!
//! Walks a schema once and records, per dotted path, whether the value must
//! be redacted, ignored, or normalized as a relationship. The resulting
//! [`PolicyIndex`] is immutable and can be shared between diff calls.

use crate::diff::model::DEFAULT_MAX_DEPTH;
use crate::errors::{AuditError, Result};
use crate::schema::{join_path, FieldKind, SchemaField};
use crate::{log_op_end, log_op_error, log_op_start};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Instant;

/// Dotted paths marking redact, ignore and relationship treatment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyIndex {
    redact: BTreeSet<String>,
    ignore: BTreeSet<String>,
    relationship: BTreeSet<String>,
}

impl PolicyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: mark `path` as redacted.
    pub fn with_redact(mut self, path: impl Into<String>) -> Self {
        self.redact.insert(path.into());
        self
    }

    /// Builder: mark `path` as ignored.
    pub fn with_ignore(mut self, path: impl Into<String>) -> Self {
        self.ignore.insert(path.into());
        self
    }

    /// Builder: mark `path` as a relationship.
    pub fn with_relationship(mut self, path: impl Into<String>) -> Self {
        self.relationship.insert(path.into());
        self
    }

    pub fn is_redacted(&self, path: &str) -> bool {
        self.redact.contains(path)
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignore.contains(path)
    }

    pub fn is_relationship(&self, path: &str) -> bool {
        self.relationship.contains(path)
    }

    pub fn redact(&self) -> &BTreeSet<String> {
        &self.redact
    }

    pub fn ignore(&self) -> &BTreeSet<String> {
        &self.ignore
    }

    pub fn relationship(&self) -> &BTreeSet<String> {
        &self.relationship
    }

    pub fn is_empty(&self) -> bool {
        self.redact.is_empty() && self.ignore.is_empty() && self.relationship.is_empty()
    }
}

/// Build the policy index for a field sequence.
///
/// # Errors
///
/// Returns `SchemaTooDeep` if nesting exceeds the default maximum depth.
pub fn extract_field_metadata(fields: &[SchemaField]) -> Result<PolicyIndex> {
    extract_field_metadata_with_depth(fields, DEFAULT_MAX_DEPTH)
}

/// Build the policy index, failing when nesting exceeds `max_depth`.
///
/// Layout wrappers are traversed without contributing a path segment, so
/// annotations inside collapsibles, rows and unnamed tabs are indexed at the
/// document position their values actually occupy.
///
/// # Errors
///
/// Returns `SchemaTooDeep` if nesting exceeds `max_depth`.
pub fn extract_field_metadata_with_depth(
    fields: &[SchemaField],
    max_depth: usize,
) -> Result<PolicyIndex> {
    let start = Instant::now();
    log_op_start!("extract_field_metadata", field_count = fields.len());

    let mut index = PolicyIndex::new();
    match walk(fields, "", 0, max_depth, &mut index) {
        Ok(()) => {
            log_op_end!(
                "extract_field_metadata",
                duration_ms = start.elapsed().as_millis() as u64,
                redact_len = index.redact.len(),
                ignore_len = index.ignore.len(),
                relationship_len = index.relationship.len()
            );
            Ok(index)
        }
        Err(err) => {
            log_op_error!(
                "extract_field_metadata",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn walk(
    fields: &[SchemaField],
    prefix: &str,
    depth: usize,
    max_depth: usize,
    index: &mut PolicyIndex,
) -> Result<()> {
    if depth > max_depth {
        return Err(AuditError::SchemaTooDeep {
            path: prefix.to_string(),
            max_depth,
        });
    }

    for field in fields {
        let Some(name) = field.name.as_deref() else {
            walk(field.children(), prefix, depth + 1, max_depth, index)?;
            continue;
        };

        let path = join_path(prefix, name);
        let recorded = field
            .policy_path()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| path.clone());

        if field.is_redacted() {
            index.redact.insert(recorded.clone());
        }
        if field.is_ignored() {
            index.ignore.insert(recorded.clone());
        }

        match &field.kind {
            FieldKind::Relationship => {
                index.relationship.insert(recorded);
            }
            FieldKind::Group { fields } => {
                walk(fields, &path, depth + 1, max_depth, index)?;
            }
            FieldKind::Layout { fields } => {
                walk(fields, prefix, depth + 1, max_depth, index)?;
            }
            FieldKind::Primitive => {}
        }
    }
    Ok(())
}
