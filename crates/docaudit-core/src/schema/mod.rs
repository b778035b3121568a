//! Schema model consumed by the audit diff.
//!
//! The host framework owns the real schema. This module keeps only what the
//! audit engine reads from it: field names, the kind of each field, nesting,
//! and the audit policy annotation found under `custom.flexiweb.audit`.
//!
//! Annotations are validated once, when the host field config is loaded
//! ([`loader`]); everything downstream works with typed [`SchemaField`]s.

pub mod field;
pub mod loader;
pub mod path;

pub use field::{AuditPolicy, FieldKind, SchemaField};
pub use loader::{
    load_fields, load_fields_file, load_fields_file_with_depth, load_fields_str,
    load_fields_with_depth, load_fields_yaml,
};
pub use path::{join_path, DottedPath};
