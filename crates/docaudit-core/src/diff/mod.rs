//! Audit diff engine.
//!
//! Compares a "before" and "after" snapshot of one document under a
//! [`PolicyIndex`](crate::metadata::PolicyIndex) and produces the two
//! projections stored in the audit trail.
//!
//! ## Entry point
//!
//! ```
//! use docaudit_core::diff::compute_audit_diff_for_fields;
//! use docaudit_core::schema::SchemaField;
//! use serde_json::json;
//!
//! let fields = vec![SchemaField::primitive("title")];
//! let diff = compute_audit_diff_for_fields(
//!     Some(&json!({ "title": "Hello" })),
//!     Some(&json!({ "title": "World" })),
//!     &fields,
//! )?;
//! assert_eq!(diff.after["title"], "World");
//! # Ok::<(), docaudit_core::errors::AuditError>(())
//! ```
//!
//! ## Guarantees
//!
//! - **Minimality**: unchanged keys never appear in either projection.
//! - **Containment**: an ignored or redacted path is never opened; nothing
//!   below it reaches the output.
//! - **Determinism**: keys are visited in sorted order and the output maps
//!   are sorted, so identical inputs serialize identically.

pub mod engine;
pub mod human_summary;
pub mod model;
pub mod relationship;

pub use engine::{
    compute_audit_diff, compute_audit_diff_for_fields, compute_audit_diff_with,
};
pub use human_summary::render_human_summary;
pub use model::{AuditDiff, DiffOptions};
pub use relationship::normalize_relationship;
