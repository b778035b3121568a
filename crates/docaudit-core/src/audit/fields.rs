//! Names and schema of the audit bookkeeping group.

use crate::schema::SchemaField;

/// Collection that stores audit jobs once processed.
pub const AUDIT_LOGS_SLUG: &str = "audit-logs";

pub const DEFAULT_USERNAME_FIELD: &str = "email";
pub const DEFAULT_USERNAME: &str = "System";
pub const DEFAULT_ID: &str = "-";

pub const AUDIT_GROUP_NAME: &str = "audit";
pub const CREATED_BY_FIELD_NAME: &str = "createdBy";
pub const CREATED_AT_FIELD_NAME: &str = "createdAt";
pub const UPDATED_BY_FIELD_NAME: &str = "updatedBy";
pub const UPDATED_AT_FIELD_NAME: &str = "updatedAt";
pub const PUBLISHED_BY_FIELD_NAME: &str = "publishedBy";
pub const PUBLISHED_AT_FIELD_NAME: &str = "publishedAt";

/// Layout wrapper holding the `audit` group.
///
/// The publish pair is only present for collections with drafts enabled.
pub fn audit_group_fields(has_drafts: bool) -> SchemaField {
    let mut names = vec![
        CREATED_BY_FIELD_NAME,
        UPDATED_BY_FIELD_NAME,
        CREATED_AT_FIELD_NAME,
        UPDATED_AT_FIELD_NAME,
    ];
    if has_drafts {
        names.push(PUBLISHED_BY_FIELD_NAME);
        names.push(PUBLISHED_AT_FIELD_NAME);
    }

    let group = SchemaField::group(
        AUDIT_GROUP_NAME,
        names.into_iter().map(SchemaField::primitive).collect(),
    );
    SchemaField::layout(vec![group])
}

/// Append the audit group to an existing field sequence.
pub fn with_audit_group(mut fields: Vec<SchemaField>, has_drafts: bool) -> Vec<SchemaField> {
    fields.push(audit_group_fields(has_drafts));
    fields
}
