//! Load host field configs into [`SchemaField`] trees.
//!
//! Accepted input is the host's field-config shape: an array of field
//! objects (`name`, `type`, nested `fields` or `tabs`, and a
//! `custom` bag), or a collection/global object carrying such an array under
//! `fields`. The audit annotation is read from `custom.flexiweb.audit`.
//!
//! Nodes without a `type` and `ui` fields carry no data and are dropped.
//! Unknown types load as primitive fields.

use crate::diff::model::DEFAULT_MAX_DEPTH;
use crate::errors::{AuditError, Result};
use crate::schema::field::{AuditPolicy, FieldKind, SchemaField};
use crate::schema::path::{join_path, DottedPath};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Namespace key in the host `custom` bag.
const CUSTOM_NAMESPACE: &str = "flexiweb";
/// Key of the audit annotation inside the namespace.
const CUSTOM_AUDIT_KEY: &str = "audit";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPolicy {
    #[serde(default)]
    is_redacted: bool,
    #[serde(default)]
    ignore: bool,
    #[serde(default)]
    path: Option<String>,
}

/// Load fields from a parsed JSON value, nesting at most
/// [`DEFAULT_MAX_DEPTH`] levels.
///
/// # Errors
///
/// - `InvalidSchema` if the root is neither an array nor an object with a
///   `fields` array, or an audit annotation has the wrong shape
/// - `InvalidPolicyPath` if a `path` override is not a dotted path
/// - `SchemaTooDeep` if nesting exceeds the default maximum depth
pub fn load_fields(value: &Value) -> Result<Vec<SchemaField>> {
    load_fields_with_depth(value, DEFAULT_MAX_DEPTH)
}

/// As [`load_fields`], with an explicit nesting limit.
///
/// Pass the same `max_depth` the extractor and diff run with, so a schema
/// accepted by one stage is not rejected by another.
///
/// # Errors
///
/// As [`load_fields`]; `SchemaTooDeep` reports `max_depth`.
pub fn load_fields_with_depth(value: &Value, max_depth: usize) -> Result<Vec<SchemaField>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(obj) => obj
            .get("fields")
            .and_then(Value::as_array)
            .ok_or_else(|| AuditError::InvalidSchema {
                reason: "schema object has no `fields` array".to_string(),
            })?,
        _ => {
            return Err(AuditError::InvalidSchema {
                reason: "schema root must be an array of fields or an object with `fields`"
                    .to_string(),
            })
        }
    };
    Loader { max_depth }.sequence(items, "", 0)
}

/// Load fields from JSON text.
///
/// # Errors
///
/// `Serialization` on malformed JSON, otherwise as [`load_fields`].
pub fn load_fields_str(json: &str) -> Result<Vec<SchemaField>> {
    load_fields(&parse_json(json)?)
}

/// Load fields from YAML text.
///
/// # Errors
///
/// `Serialization` on malformed YAML, otherwise as [`load_fields`].
pub fn load_fields_yaml(yaml: &str) -> Result<Vec<SchemaField>> {
    load_fields(&parse_yaml(yaml)?)
}

/// Load fields from a `.json`, `.yaml` or `.yml` file.
///
/// # Errors
///
/// `Io` if the file cannot be read, otherwise as the format-specific loader.
pub fn load_fields_file(path: &Path) -> Result<Vec<SchemaField>> {
    load_fields_file_with_depth(path, DEFAULT_MAX_DEPTH)
}

/// As [`load_fields_file`], with an explicit nesting limit.
///
/// # Errors
///
/// As [`load_fields_file`]; `SchemaTooDeep` reports `max_depth`.
pub fn load_fields_file_with_depth(path: &Path, max_depth: usize) -> Result<Vec<SchemaField>> {
    let content = std::fs::read_to_string(path)?;
    let value = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => parse_yaml(&content)?,
        _ => parse_json(&content)?,
    };
    load_fields_with_depth(&value, max_depth)
}

fn parse_json(json: &str) -> Result<Value> {
    Ok(serde_json::from_str(json)?)
}

fn parse_yaml(yaml: &str) -> Result<Value> {
    serde_yaml::from_str(yaml).map_err(|e| AuditError::Serialization {
        message: format!("YAML parse error: {}", e),
    })
}

struct Loader {
    max_depth: usize,
}

impl Loader {
    fn sequence(&self, items: &[Value], prefix: &str, depth: usize) -> Result<Vec<SchemaField>> {
        if depth > self.max_depth {
            return Err(AuditError::SchemaTooDeep {
                path: prefix.to_string(),
                max_depth: self.max_depth,
            });
        }

        let mut fields = Vec::with_capacity(items.len());
        for item in items {
            if let Some(field) = self.field(item, prefix, depth)? {
                fields.push(field);
            }
        }
        Ok(fields)
    }

    fn field(&self, item: &Value, prefix: &str, depth: usize) -> Result<Option<SchemaField>> {
        let Some(obj) = item.as_object() else {
            return Ok(None);
        };
        let Some(field_type) = obj.get("type").and_then(Value::as_str) else {
            return Ok(None);
        };
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let here = name
            .as_deref()
            .map(|n| join_path(prefix, n))
            .unwrap_or_else(|| prefix.to_string());

        let children = |key: &str, child_prefix: &str| -> Result<Vec<SchemaField>> {
            match obj.get(key).and_then(Value::as_array) {
                Some(items) => self.sequence(items, child_prefix, depth + 1),
                None => Ok(Vec::new()),
            }
        };

        let kind = match (field_type, name.is_some()) {
            ("ui", _) => return Ok(None),
            ("relationship" | "upload", true) => FieldKind::Relationship,
            ("group", true) => FieldKind::Group {
                fields: children("fields", &here)?,
            },
            ("group" | "collapsible" | "row", false) => FieldKind::Layout {
                fields: children("fields", prefix)?,
            },
            ("tabs", _) => FieldKind::Layout {
                fields: self.tabs(obj.get("tabs"), prefix, depth + 1)?,
            },
            (_, true) => FieldKind::Primitive,
            (_, false) => return Ok(None),
        };

        let policy = load_policy(obj.get("custom"), &here)?;

        Ok(Some(SchemaField { name, kind, policy }))
    }

    /// Named tabs nest their fields like a group; unnamed tabs are pure layout.
    fn tabs(&self, tabs: Option<&Value>, prefix: &str, depth: usize) -> Result<Vec<SchemaField>> {
        let Some(tabs) = tabs.and_then(Value::as_array) else {
            return Ok(Vec::new());
        };

        let mut fields = Vec::with_capacity(tabs.len());
        for tab in tabs.iter().filter_map(Value::as_object) {
            let name = tab
                .get("name")
                .and_then(Value::as_str)
                .filter(|n| !n.is_empty());
            let items = tab
                .get("fields")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();

            let field = match name {
                Some(name) => {
                    let here = join_path(prefix, name);
                    SchemaField {
                        name: Some(name.to_string()),
                        kind: FieldKind::Group {
                            fields: self.sequence(items, &here, depth + 1)?,
                        },
                        policy: load_policy(tab.get("custom"), &here)?,
                    }
                }
                None => SchemaField::layout(self.sequence(items, prefix, depth + 1)?),
            };
            fields.push(field);
        }
        Ok(fields)
    }
}

fn load_policy(custom: Option<&Value>, here: &str) -> Result<Option<AuditPolicy>> {
    let Some(raw) = custom
        .and_then(|c| c.get(CUSTOM_NAMESPACE))
        .and_then(|ns| ns.get(CUSTOM_AUDIT_KEY))
    else {
        return Ok(None);
    };

    let raw: RawPolicy =
        serde_json::from_value(raw.clone()).map_err(|e| AuditError::InvalidSchema {
            reason: format!("audit annotation on '{}' is malformed: {}", here, e),
        })?;

    let path = raw.path.as_deref().map(DottedPath::parse).transpose()?;

    Ok(Some(AuditPolicy {
        is_redacted: raw.is_redacted,
        ignore: raw.ignore,
        path,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_policy_annotation_is_typed() {
        let fields = load_fields(&json!([
            {
                "name": "secret",
                "type": "text",
                "custom": { "flexiweb": { "audit": { "isRedacted": true } } }
            }
        ]))
        .unwrap();

        assert_eq!(fields.len(), 1);
        assert!(fields[0].is_redacted());
        assert!(fields[0].policy_path().is_none());
    }

    #[test]
    fn test_missing_type_is_skipped() {
        let fields = load_fields(&json!([{ "name": "orphan" }, { "name": "t", "type": "text" }]))
            .unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name.as_deref(), Some("t"));
    }

    #[test]
    fn test_malformed_annotation_is_rejected() {
        let err = load_fields(&json!([
            {
                "name": "x",
                "type": "text",
                "custom": { "flexiweb": { "audit": { "isRedacted": "yes" } } }
            }
        ]))
        .unwrap_err();
        assert!(matches!(err, AuditError::InvalidSchema { .. }));
    }

    #[test]
    fn test_to_many_relationship_is_a_relationship() {
        let fields = load_fields(&json!([
            { "name": "tags", "type": "relationship", "hasMany": true },
            { "name": "cover", "type": "upload" }
        ]))
        .unwrap();
        assert_eq!(fields[0].kind, FieldKind::Relationship);
        assert_eq!(fields[1].kind, FieldKind::Relationship);
    }

    #[test]
    fn test_scalar_root_is_rejected() {
        assert!(matches!(
            load_fields(&json!(42)).unwrap_err(),
            AuditError::InvalidSchema { .. }
        ));
    }
}
