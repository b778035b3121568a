//! docaudit core - audit diffs for document snapshots
//!
//! This crate computes the redacted, minimal before/after projections stored
//! in a document audit trail, including:
//! - Schema loading and audit policy annotations
//! - Field metadata extraction into a [`PolicyIndex`]
//! - The recursive audit diff engine and its Markdown summary
//! - Audit bookkeeping stamps and audit job building
//! - Plugin configuration and structured logging

pub mod audit;
pub mod config;
pub mod diff;
pub mod document;
pub mod errors;
pub mod logging_facility;
pub mod metadata;
pub mod policy;
pub mod schema;

// Re-export commonly used types
pub use audit::{AuditJob, AuditRecorder, AuditSink, AuditTarget, MemorySink};
pub use config::AuditPluginConfig;
pub use diff::{compute_audit_diff, compute_audit_diff_for_fields, AuditDiff, DiffOptions};
pub use errors::{AuditError, ExError, ExErrorKind, Result};
pub use metadata::{extract_field_metadata, PolicyIndex};
pub use policy::{redact_keys, REDACTED};
pub use schema::SchemaField;

#[doc(hidden)]
pub mod __private {
    pub use docaudit_core_types::schema;
    pub use tracing;
}
