//! Audit diff behaviour against a host-shaped field config.

use docaudit_core::diff::{compute_audit_diff, compute_audit_diff_for_fields};
use docaudit_core::metadata::{extract_field_metadata, PolicyIndex};
use docaudit_core::schema::{load_fields, SchemaField};
use docaudit_core::REDACTED;
use serde_json::{json, Value};

fn fields() -> Vec<SchemaField> {
    load_fields(&json!([
        { "name": "title", "type": "text" },
        { "name": "password", "type": "text" },
        {
            "name": "secret",
            "type": "text",
            "custom": { "flexiweb": { "audit": { "isRedacted": true } } }
        },
        {
            "name": "user",
            "type": "relationship",
            "relationTo": "users",
            "custom": { "flexiweb": { "audit": { "isRedacted": true, "path": "user" } } }
        },
        {
            "name": "author",
            "type": "relationship",
            "relationTo": "users"
        },
        {
            "name": "redactedGroup",
            "type": "group",
            "custom": { "flexiweb": { "audit": { "isRedacted": true, "path": "redactedGroup" } } },
            "fields": [
                { "name": "g1", "type": "text" },
                { "name": "g2", "type": "text" }
            ]
        },
        {
            "name": "partlyRedactedGroup",
            "type": "group",
            "fields": [
                {
                    "name": "g1",
                    "type": "text",
                    "custom": { "flexiweb": { "audit": { "isRedacted": true, "path": "partlyRedactedGroup.g1" } } }
                },
                { "name": "g2", "type": "text" },
                { "name": "g3", "type": "relationship", "hasMany": true, "relationTo": "users" }
            ]
        },
        {
            "name": "nested",
            "type": "group",
            "fields": [
                { "name": "a", "type": "text" },
                {
                    "name": "b",
                    "type": "text",
                    "custom": { "flexiweb": { "audit": { "isRedacted": true, "path": "nested.b" } } }
                }
            ]
        },
        {
            "name": "ignoredGroup",
            "type": "group",
            "custom": { "flexiweb": { "audit": { "ignore": true } } },
            "fields": [
                { "name": "createdAt", "type": "date" },
                { "name": "updatedAt", "type": "date" }
            ]
        }
    ]))
    .unwrap()
}

fn diff(before: Value, after: Value) -> (Value, Value) {
    let d = compute_audit_diff_for_fields(Some(&before), Some(&after), &fields()).unwrap();
    (Value::Object(d.before), Value::Object(d.after))
}

#[test]
fn test_simple_changed_field() {
    let (b, a) = diff(json!({ "title": "Hello" }), json!({ "title": "World" }));
    assert_eq!(b["title"], "Hello");
    assert_eq!(a["title"], "World");
}

#[test]
fn test_global_redact_key() {
    let (b, a) = diff(json!({ "password": "abc123" }), json!({ "password": "xyz789" }));
    assert_eq!(b, json!({ "password": REDACTED }));
    assert_eq!(a, json!({ "password": REDACTED }));
}

#[test]
fn test_global_keys_apply_without_annotation_at_depth() {
    let index = PolicyIndex::new();
    let before = json!({ "meta": { "apiKey": "k1", "lastLogin": "mon", "x": 1 } });
    let after = json!({ "meta": { "apiKey": "k2", "lastLogin": "tue", "x": 1 } });

    let d = compute_audit_diff(Some(&before), Some(&after), &index).unwrap();
    assert_eq!(Value::Object(d.before), json!({ "meta": { "apiKey": REDACTED } }));
    assert_eq!(Value::Object(d.after), json!({ "meta": { "apiKey": REDACTED } }));
}

#[test]
fn test_per_field_redaction() {
    let (b, a) = diff(json!({ "secret": "super" }), json!({ "secret": "mega" }));
    assert_eq!(b["secret"], REDACTED);
    assert_eq!(a["secret"], REDACTED);
}

#[test]
fn test_redaction_wins_over_relationship() {
    let (b, a) = diff(
        json!({ "user": { "id": "u1", "email": "test@example.com" } }),
        json!({ "user": { "id": "u2", "email": "foo@example.com" } }),
    );
    assert_eq!(b["user"], REDACTED);
    assert_eq!(a["user"], REDACTED);
}

#[test]
fn test_redacted_relationship_same_referent_is_no_change() {
    let (b, a) = diff(
        json!({ "user": { "id": "u1", "email": "test@example.com" } }),
        json!({ "user": "u1" }),
    );
    assert_eq!(b, json!({}));
    assert_eq!(a, json!({}));

    let (b, a) = diff(
        json!({ "user": { "id": "u1", "email": "old@example.com" } }),
        json!({ "user": { "id": "u1", "email": "new@example.com" } }),
    );
    assert_eq!(b, json!({}));
    assert_eq!(a, json!({}));
}

#[test]
fn test_unchanged_redacted_field_is_omitted() {
    let (b, a) = diff(json!({ "secret": "same" }), json!({ "secret": "same" }));
    assert_eq!(b, json!({}));
    assert_eq!(a, json!({}));
}

#[test]
fn test_redacted_field_added_marks_both_sides() {
    let (b, a) = diff(json!({}), json!({ "secret": "new" }));
    assert_eq!(b["secret"], REDACTED);
    assert_eq!(a["secret"], REDACTED);
}

#[test]
fn test_ignored_group_removed() {
    let (b, a) = diff(
        json!({ "ignoredGroup": { "createdAt": "2020", "updatedAt": "2021" } }),
        json!({ "ignoredGroup": { "createdAt": "2022", "updatedAt": "2023" } }),
    );
    assert!(b.get("ignoredGroup").is_none());
    assert!(a.get("ignoredGroup").is_none());
}

#[test]
fn test_audit_key_globally_ignored() {
    let (b, a) = diff(
        json!({ "audit": { "updatedBy": "a (1)" }, "title": "x" }),
        json!({ "audit": { "updatedBy": "b (2)" }, "title": "x" }),
    );
    assert_eq!(b, json!({}));
    assert_eq!(a, json!({}));
}

#[test]
fn test_full_group_redaction_contains_children() {
    let (b, a) = diff(
        json!({ "redactedGroup": { "g1": "one", "g2": "two" } }),
        json!({ "redactedGroup": { "g1": "x", "g2": "y" } }),
    );
    assert_eq!(b["redactedGroup"], REDACTED);
    assert_eq!(a["redactedGroup"], REDACTED);
}

#[test]
fn test_partial_group_redaction() {
    let (b, a) = diff(
        json!({
            "partlyRedactedGroup": {
                "g1": "secretBefore",
                "g2": "keepBefore",
                "g3": [{ "id": "u1" }, { "id": "u2" }]
            }
        }),
        json!({
            "partlyRedactedGroup": {
                "g1": "secretAfter",
                "g2": "keepAfter",
                "g3": [{ "id": "u3" }]
            }
        }),
    );

    assert_eq!(
        b["partlyRedactedGroup"],
        json!({ "g1": REDACTED, "g2": "keepBefore", "g3": ["u1", "u2"] })
    );
    assert_eq!(
        a["partlyRedactedGroup"],
        json!({ "g1": REDACTED, "g2": "keepAfter", "g3": ["u3"] })
    );
}

#[test]
fn test_nested_mixed_rules() {
    let (b, a) = diff(
        json!({ "nested": { "a": "hello", "b": "secretBefore" } }),
        json!({ "nested": { "a": "world", "b": "secretAfter" } }),
    );
    assert_eq!(b["nested"], json!({ "a": "hello", "b": REDACTED }));
    assert_eq!(a["nested"], json!({ "a": "world", "b": REDACTED }));
}

#[test]
fn test_relationship_populated_vs_bare_id_is_no_change() {
    let (b, a) = diff(
        json!({ "author": { "id": "u1", "email": "a@b.c" } }),
        json!({ "author": "u1" }),
    );
    assert_eq!(b, json!({}));
    assert_eq!(a, json!({}));
}

#[test]
fn test_relationship_change_emits_ids() {
    let (b, a) = diff(
        json!({ "author": { "id": "u1", "email": "a@b.c" } }),
        json!({ "author": { "id": "u2", "email": "d@e.f" } }),
    );
    assert_eq!(b["author"], "u1");
    assert_eq!(a["author"], "u2");
}

#[test]
fn test_unchanged_fields_omitted() {
    let (b, a) = diff(
        json!({ "title": "same", "nested": { "a": "same", "b": "s" } }),
        json!({ "title": "same", "nested": { "a": "changed", "b": "s" } }),
    );
    assert_eq!(b, json!({ "nested": { "a": "same" } }));
    assert_eq!(a, json!({ "nested": { "a": "changed" } }));
}

#[test]
fn test_identical_documents_give_empty_diff() {
    let doc = json!({
        "title": "t",
        "secret": "s",
        "partlyRedactedGroup": { "g3": [{ "id": "u1" }] },
        "tags": ["a", "b"]
    });
    let d = compute_audit_diff_for_fields(Some(&doc), Some(&doc), &fields()).unwrap();
    assert!(d.is_empty());
}

#[test]
fn test_deletion_projects_before_only() {
    let index = extract_field_metadata(&fields()).unwrap();
    let doc = json!({ "title": "gone", "secret": "s", "author": { "id": "u9" } });

    let d = compute_audit_diff(Some(&doc), None, &index).unwrap();
    assert_eq!(
        Value::Object(d.before),
        json!({ "title": "gone", "secret": REDACTED, "author": "u9" })
    );
    assert_eq!(Value::Object(d.after), json!({ "secret": REDACTED }));
}

#[test]
fn test_sequences_are_opaque_leaves() {
    let (b, a) = diff(json!({ "tags": ["a", "b"] }), json!({ "tags": ["a", "c"] }));
    assert_eq!(b["tags"], json!(["a", "b"]));
    assert_eq!(a["tags"], json!(["a", "c"]));
}

#[test]
fn test_output_serializes_deterministically() {
    let before = json!({ "z": 1, "a": 1, "m": { "y": 1, "b": 1 } });
    let after = json!({ "m": { "b": 2, "y": 2 }, "a": 2, "z": 2 });
    let index = PolicyIndex::new();

    let first = compute_audit_diff(Some(&before), Some(&after), &index).unwrap();
    let second = compute_audit_diff(Some(&before), Some(&after), &index).unwrap();
    let text = serde_json::to_string(&first).unwrap();

    assert_eq!(text, serde_json::to_string(&second).unwrap());
    assert!(text.starts_with(r#"{"before":{"a":1,"m":{"b":1,"y":1},"z":1}"#));
}
