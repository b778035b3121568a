//! Audit hooks around the diff engine.
//!
//! - [`stamp`]: `createdBy`/`updatedBy`/`publishedBy` bookkeeping written into
//!   documents before they are saved
//! - [`event`]: the [`AuditJob`] model and the builders for change, delete
//!   and global change hooks
//! - [`sink`]: the [`AuditSink`] seam to the host's job queue
//! - [`recorder`]: [`AuditRecorder`], which applies the plugin config and
//!   wires the above together

pub mod event;
pub mod fields;
pub mod recorder;
pub mod sink;
pub mod stamp;

pub use event::{
    collection_change_event, collection_delete_event, global_change_event, AuditAction,
    AuditContext, AuditJob, AuditTarget, AuditType, AuditUser, ChangeOperation, ContextData,
};
pub use fields::{audit_group_fields, with_audit_group};
pub use recorder::AuditRecorder;
pub use sink::{AuditSink, MemorySink, RejectingSink};
pub use stamp::stamp_audit_data;
