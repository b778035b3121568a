//! Audit job model and the builders that turn a document change into a job.

use crate::audit::fields::DEFAULT_ID;
use crate::audit::stamp::non_empty_text;
use crate::diff::{compute_audit_diff_with, DiffOptions};
use crate::errors::Result;
use crate::metadata::{extract_field_metadata_with_depth, PolicyIndex};
use crate::schema::SchemaField;
use docaudit_core_types::RequestId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Read,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Read => "read",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditType {
    Collection,
    Global,
}

/// The write that triggered a change hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOperation {
    Create,
    Update,
}

impl From<ChangeOperation> for AuditAction {
    fn from(op: ChangeOperation) -> Self {
        match op {
            ChangeOperation::Create => AuditAction::Create,
            ChangeOperation::Update => AuditAction::Update,
        }
    }
}

/// Snapshot of the acting user stored with the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditUser {
    pub id: String,
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub is_system: bool,
    pub role: String,
}

impl AuditUser {
    /// Read the user attributes from a host user object.
    ///
    /// Returns `None` when `value` is not an object (no authenticated user).
    pub fn from_value(value: &Value) -> Option<Self> {
        let user = value.as_object()?;
        let text = |key: &str| {
            user.get(key)
                .and_then(non_empty_text)
                .unwrap_or_else(|| DEFAULT_ID.to_string())
        };
        Some(Self {
            id: text("id"),
            collection: text("collection"),
            email: user.get("email").and_then(Value::as_str).map(str::to_string),
            is_system: user.get("isSystem").and_then(Value::as_bool).unwrap_or(false),
            role: text("role"),
        })
    }
}

/// The `before`/`after` projection carried by a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditContext {
    pub data: ContextData,
    pub user: Option<AuditUser>,
}

/// Input of the asynchronous audit-log task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditJob {
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: AuditType,
    pub action: AuditAction,
    pub doc_id: String,
    pub user_id: String,
    pub context: AuditContext,
    #[serde(skip)]
    pub request_id: RequestId,
}

/// A collection or global whose changes are audited.
///
/// Holds the slug and the policy index extracted from its schema, so the
/// schema is walked once per target rather than once per change.
#[derive(Debug, Clone)]
pub struct AuditTarget {
    slug: String,
    kind: AuditType,
    index: PolicyIndex,
    options: DiffOptions,
}

impl AuditTarget {
    /// Collection target with default diff options.
    ///
    /// # Errors
    ///
    /// `SchemaTooDeep` if the schema nests too deeply.
    pub fn collection(slug: &str, fields: &[SchemaField]) -> Result<Self> {
        Self::new(slug, AuditType::Collection, fields, DiffOptions::default())
    }

    /// Global target with default diff options.
    ///
    /// # Errors
    ///
    /// `SchemaTooDeep` if the schema nests too deeply.
    pub fn global(slug: &str, fields: &[SchemaField]) -> Result<Self> {
        Self::new(slug, AuditType::Global, fields, DiffOptions::default())
    }

    /// # Errors
    ///
    /// `SchemaTooDeep` if the schema nests deeper than `options.max_depth`.
    pub fn new(
        slug: &str,
        kind: AuditType,
        fields: &[SchemaField],
        options: DiffOptions,
    ) -> Result<Self> {
        let index = extract_field_metadata_with_depth(fields, options.max_depth)?;
        Ok(Self::with_index(slug, kind, index, options))
    }

    pub fn with_index(
        slug: &str,
        kind: AuditType,
        index: PolicyIndex,
        options: DiffOptions,
    ) -> Self {
        Self {
            slug: slug.to_string(),
            kind,
            index,
            options,
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn kind(&self) -> AuditType {
        self.kind
    }

    pub fn index(&self) -> &PolicyIndex {
        &self.index
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }
}

/// Job for a created or updated collection document.
///
/// A create carries only `after`; an update carries both sides.
///
/// # Errors
///
/// `DocumentTooDeep` if either snapshot nests too deeply.
pub fn collection_change_event(
    target: &AuditTarget,
    operation: ChangeOperation,
    previous: Option<&Value>,
    doc: &Value,
    user: Option<&Value>,
) -> Result<AuditJob> {
    let diff = compute_audit_diff_with(previous, Some(doc), &target.index, &target.options)?;
    let data = match operation {
        ChangeOperation::Create => ContextData {
            before: None,
            after: Some(diff.after),
        },
        ChangeOperation::Update => ContextData {
            before: Some(diff.before),
            after: Some(diff.after),
        },
    };
    Ok(build_job(
        target,
        AuditType::Collection,
        operation.into(),
        doc,
        data,
        user,
    ))
}

/// Job for a deleted collection document: the document diffed against absence.
///
/// # Errors
///
/// `DocumentTooDeep` if the snapshot nests too deeply.
pub fn collection_delete_event(
    target: &AuditTarget,
    doc: &Value,
    user: Option<&Value>,
) -> Result<AuditJob> {
    let diff = compute_audit_diff_with(Some(doc), None, &target.index, &target.options)?;
    let data = ContextData {
        before: Some(diff.before),
        after: None,
    };
    Ok(build_job(
        target,
        AuditType::Collection,
        AuditAction::Delete,
        doc,
        data,
        user,
    ))
}

/// Job for a changed global. Globals are never created, so this is always
/// an update.
///
/// # Errors
///
/// `DocumentTooDeep` if either snapshot nests too deeply.
pub fn global_change_event(
    target: &AuditTarget,
    previous: Option<&Value>,
    doc: &Value,
    user: Option<&Value>,
) -> Result<AuditJob> {
    let diff = compute_audit_diff_with(previous, Some(doc), &target.index, &target.options)?;
    let data = ContextData {
        before: Some(diff.before),
        after: Some(diff.after),
    };
    Ok(build_job(
        target,
        AuditType::Global,
        AuditAction::Update,
        doc,
        data,
        user,
    ))
}

fn build_job(
    target: &AuditTarget,
    kind: AuditType,
    action: AuditAction,
    doc: &Value,
    data: ContextData,
    user: Option<&Value>,
) -> AuditJob {
    let user = user.and_then(AuditUser::from_value);
    AuditJob {
        slug: target.slug.clone(),
        kind,
        action,
        doc_id: doc
            .get("id")
            .and_then(non_empty_text)
            .unwrap_or_else(|| DEFAULT_ID.to_string()),
        user_id: user
            .as_ref()
            .map(|u| u.id.clone())
            .unwrap_or_else(|| DEFAULT_ID.to_string()),
        context: AuditContext { data, user },
        request_id: RequestId::new(),
    }
}
