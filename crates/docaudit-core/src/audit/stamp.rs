//! Audit bookkeeping stamps written into documents before they are saved.

use crate::audit::event::ChangeOperation;
use crate::audit::fields::{
    AUDIT_GROUP_NAME, CREATED_AT_FIELD_NAME, CREATED_BY_FIELD_NAME, DEFAULT_ID, DEFAULT_USERNAME,
    PUBLISHED_AT_FIELD_NAME, PUBLISHED_BY_FIELD_NAME, UPDATED_AT_FIELD_NAME,
    UPDATED_BY_FIELD_NAME,
};
use crate::errors::{AuditError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

const STATUS_FIELD: &str = "_status";
const STATUS_DRAFT: &str = "draft";
const STATUS_PUBLISHED: &str = "published";

/// Stamp `createdBy`/`updatedBy` (and publish info) into `data.audit`.
///
/// `operation` defaults to update, which is what globals receive. `user` is
/// the authenticated user, if any; its `username_field` attribute and `id`
/// make up the actor label `"<username> (<id>)"`. Publish info is only
/// recorded for an authenticated user.
///
/// # Errors
///
/// `InvalidDocument` if `data` is not an object, or if its `audit` entry
/// exists and is not an object.
pub fn stamp_audit_data(
    data: &mut Value,
    operation: Option<ChangeOperation>,
    original: Option<&Value>,
    user: Option<&Value>,
    username_field: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    let operation = operation.unwrap_or(ChangeOperation::Update);
    let user = user.filter(|u| u.is_object());
    let actor = actor_label(user, username_field);
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    let Value::Object(doc) = data else {
        return Err(AuditError::InvalidDocument {
            reason: "document data is not an object".to_string(),
        });
    };

    let publishing = user.is_some()
        && doc.get(STATUS_FIELD).and_then(Value::as_str) == Some(STATUS_PUBLISHED)
        && match operation {
            ChangeOperation::Create => true,
            ChangeOperation::Update => {
                original
                    .and_then(|o| o.get(STATUS_FIELD))
                    .and_then(Value::as_str)
                    == Some(STATUS_DRAFT)
            }
        };

    let audit = doc
        .entry(AUDIT_GROUP_NAME)
        .or_insert_with(|| Value::Object(Map::new()));
    if audit.is_null() {
        *audit = Value::Object(Map::new());
    }
    let Value::Object(audit) = audit else {
        return Err(AuditError::InvalidDocument {
            reason: format!("'{}' is not an object", AUDIT_GROUP_NAME),
        });
    };

    let (by, at) = match operation {
        ChangeOperation::Create => (CREATED_BY_FIELD_NAME, CREATED_AT_FIELD_NAME),
        ChangeOperation::Update => (UPDATED_BY_FIELD_NAME, UPDATED_AT_FIELD_NAME),
    };
    audit.insert(by.to_string(), Value::String(actor.clone()));
    audit.insert(at.to_string(), Value::String(timestamp.clone()));

    if publishing {
        audit.insert(PUBLISHED_AT_FIELD_NAME.to_string(), Value::String(timestamp));
        audit.insert(PUBLISHED_BY_FIELD_NAME.to_string(), Value::String(actor));
    }

    Ok(())
}

fn actor_label(user: Option<&Value>, username_field: &str) -> String {
    let name = user
        .and_then(|u| u.get(username_field))
        .and_then(non_empty_text)
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
    let id = user
        .and_then(|u| u.get("id"))
        .and_then(non_empty_text)
        .unwrap_or_else(|| DEFAULT_ID.to_string());
    format!("{} ({})", name, id)
}

/// Text form of a scalar, or `None` when it would be empty.
pub(crate) fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
