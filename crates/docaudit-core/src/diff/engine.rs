//! Audit diff computation engine.
//!
//! The entry point is [`compute_audit_diff`]: a recursive walk over the union
//! of keys of both snapshots, carrying the dotted path of the current
//! position. At each key the checks run in a fixed order:
//!
//! 1. ignore (global key list or `PolicyIndex::ignore`): skip
//! 2. redact (global key list or `PolicyIndex::redact`): marker on both sides
//! 3. relationship: compare normalized ids
//! 4. nested object: recurse
//! 5. leaf: compare raw values
//!
//! Ignore and redact run before any descent, so nothing below such a path can
//! leak into the output.

use crate::diff::model::{AuditDiff, DiffOptions};
use crate::diff::relationship::normalize_relationship;
use crate::document::Shape;
use crate::errors::{AuditError, Result};
use crate::metadata::{extract_field_metadata_with_depth, PolicyIndex};
use crate::policy::{is_globally_ignored, is_globally_redacted, REDACTED};
use crate::schema::{join_path, SchemaField};
use crate::{log_op_end, log_op_error, log_op_start, log_policy_applied};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::time::Instant;

type Projection = (Map<String, Value>, Map<String, Value>);

/// Diff two snapshots under `index` with default options.
///
/// `None` stands for a document that does not exist on that side (creation
/// or deletion) and is treated as an empty object. A root that is not an
/// object is treated the same way.
///
/// # Errors
///
/// Returns `DocumentTooDeep` if either snapshot nests deeper than
/// [`DEFAULT_MAX_DEPTH`](crate::diff::model::DEFAULT_MAX_DEPTH).
pub fn compute_audit_diff(
    before: Option<&Value>,
    after: Option<&Value>,
    index: &PolicyIndex,
) -> Result<AuditDiff> {
    compute_audit_diff_with(before, after, index, &DiffOptions::default())
}

/// Extract the policy index from `fields`, then diff.
///
/// # Errors
///
/// `SchemaTooDeep` or `DocumentTooDeep` when a depth limit is exceeded.
pub fn compute_audit_diff_for_fields(
    before: Option<&Value>,
    after: Option<&Value>,
    fields: &[SchemaField],
) -> Result<AuditDiff> {
    let options = DiffOptions::default();
    let index = extract_field_metadata_with_depth(fields, options.max_depth)?;
    compute_audit_diff_with(before, after, &index, &options)
}

/// Diff two snapshots under `index` with explicit options.
///
/// # Errors
///
/// Returns `DocumentTooDeep` if either snapshot nests deeper than
/// `options.max_depth`.
pub fn compute_audit_diff_with(
    before: Option<&Value>,
    after: Option<&Value>,
    index: &PolicyIndex,
    options: &DiffOptions,
) -> Result<AuditDiff> {
    let start = Instant::now();
    log_op_start!("compute_audit_diff");

    let walker = Walker { index, options };
    let result = walker.diff_structures(root(before), root(after), "", 0);

    match result {
        Ok((before, after)) => {
            let diff = AuditDiff { before, after };
            log_op_end!(
                "compute_audit_diff",
                duration_ms = start.elapsed().as_millis() as u64,
                changed_len = diff.changed_keys().len()
            );
            Ok(diff)
        }
        Err(err) => {
            log_op_error!(
                "compute_audit_diff",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn root(value: Option<&Value>) -> Option<&Map<String, Value>> {
    match Shape::of(value) {
        Shape::Structure(map) => Some(map),
        Shape::Absent => None,
        Shape::Primitive | Shape::Sequence => {
            tracing::warn!(
                component = module_path!(),
                "snapshot root is not an object; treating it as empty"
            );
            None
        }
    }
}

struct Walker<'a> {
    index: &'a PolicyIndex,
    options: &'a DiffOptions,
}

impl Walker<'_> {
    fn diff_structures(
        &self,
        before: Option<&Map<String, Value>>,
        after: Option<&Map<String, Value>>,
        prefix: &str,
        depth: usize,
    ) -> Result<Projection> {
        if depth > self.options.max_depth {
            return Err(AuditError::DocumentTooDeep {
                path: prefix.to_string(),
                max_depth: self.options.max_depth,
            });
        }

        let keys: BTreeSet<&String> = before
            .into_iter()
            .chain(after)
            .flat_map(|m| m.keys())
            .collect();

        let mut out_before = Map::new();
        let mut out_after = Map::new();

        for key in keys {
            let path = join_path(prefix, key);
            let b = before.and_then(|m| m.get(key));
            let a = after.and_then(|m| m.get(key));

            if is_globally_ignored(key) || self.index.is_ignored(&path) {
                log_policy_applied!("ignore", path);
                continue;
            }

            let is_relationship = self.index.is_relationship(&path);

            if is_globally_redacted(key) || self.index.is_redacted(&path) {
                let changed = if is_relationship {
                    b.map(normalize_relationship) != a.map(normalize_relationship)
                } else {
                    b != a
                };
                if changed {
                    log_policy_applied!("redact", path);
                    out_before.insert(key.clone(), Value::String(REDACTED.to_string()));
                    out_after.insert(key.clone(), Value::String(REDACTED.to_string()));
                }
                continue;
            }

            if is_relationship {
                let nb = b.map(normalize_relationship);
                let na = a.map(normalize_relationship);
                if nb != na {
                    insert_present(&mut out_before, key, nb);
                    insert_present(&mut out_after, key, na);
                }
                continue;
            }

            match (Shape::of(b), Shape::of(a)) {
                (Shape::Structure(bm), Shape::Structure(am)) => {
                    let (nb, na) = self.diff_structures(Some(bm), Some(am), &path, depth + 1)?;
                    insert_non_empty(&mut out_before, key, nb);
                    insert_non_empty(&mut out_after, key, na);
                }
                // One side is an object, the other absent or a non-object:
                // project the object side alone, keep the other side raw.
                (Shape::Structure(bm), _) => {
                    let (nb, _) = self.diff_structures(Some(bm), None, &path, depth + 1)?;
                    insert_non_empty(&mut out_before, key, nb);
                    insert_present(&mut out_after, key, a.cloned());
                }
                (_, Shape::Structure(am)) => {
                    let (_, na) = self.diff_structures(None, Some(am), &path, depth + 1)?;
                    insert_present(&mut out_before, key, b.cloned());
                    insert_non_empty(&mut out_after, key, na);
                }
                _ => {
                    if b != a {
                        insert_present(&mut out_before, key, b.cloned());
                        insert_present(&mut out_after, key, a.cloned());
                    }
                }
            }
        }

        Ok((out_before, out_after))
    }
}

fn insert_present(out: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        out.insert(key.to_string(), value);
    }
}

fn insert_non_empty(out: &mut Map<String, Value>, key: &str, nested: Map<String, Value>) {
    if !nested.is_empty() {
        out.insert(key.to_string(), Value::Object(nested));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_creation_emits_after_only() {
        let diff = compute_audit_diff(
            None,
            Some(&json!({ "title": "New", "meta": { "views": 0 } })),
            &PolicyIndex::new(),
        )
        .unwrap();

        assert!(diff.before.is_empty());
        assert_eq!(
            Value::Object(diff.after),
            json!({ "title": "New", "meta": { "views": 0 } })
        );
    }

    #[test]
    fn test_null_to_object_keeps_null_side() {
        let diff = compute_audit_diff(
            Some(&json!({ "meta": null })),
            Some(&json!({ "meta": { "views": 1, "password": "x" } })),
            &PolicyIndex::new(),
        )
        .unwrap();

        assert_eq!(diff.before["meta"], Value::Null);
        assert_eq!(diff.after["meta"], json!({ "views": 1, "password": REDACTED }));
    }

    #[test]
    fn test_depth_limit_is_an_error() {
        let mut deep = json!("leaf");
        for _ in 0..10 {
            deep = json!({ "n": deep });
        }
        let options = DiffOptions { max_depth: 4 };

        let err = compute_audit_diff_with(None, Some(&deep), &PolicyIndex::new(), &options)
            .unwrap_err();
        assert!(matches!(err, AuditError::DocumentTooDeep { max_depth: 4, .. }));
    }

    #[test]
    fn test_non_object_root_is_empty() {
        let diff = compute_audit_diff(Some(&json!(1)), Some(&json!(2)), &PolicyIndex::new())
            .unwrap();
        assert!(diff.is_empty());
    }
}
