//! Audit hooks end to end: config gating, job building and the sink.

use docaudit_core::audit::{
    AuditAction, AuditRecorder, AuditType, ChangeOperation, MemorySink,
};
use docaudit_core::logging_facility::test_capture::init_test_capture;
use docaudit_core::schema::load_fields;
use docaudit_core::{AuditPluginConfig, SchemaField, REDACTED};
use docaudit_core_types::schema::EVENT_END;
use serde_json::{json, Value};

fn users_fields() -> Vec<SchemaField> {
    load_fields(&json!([
        { "name": "email", "type": "email" },
        { "name": "role", "type": "select" },
        {
            "name": "manager",
            "type": "relationship",
            "relationTo": "users"
        }
    ]))
    .unwrap()
}

fn recorder() -> AuditRecorder<MemorySink> {
    let config = AuditPluginConfig::from_toml_str(
        r#"
        excluded_collections = ["media"]

        [full_audits]
        excluded_globals = ["footer"]
        "#,
    )
    .unwrap();
    AuditRecorder::new(config, MemorySink::new())
}

fn admin() -> Value {
    json!({
        "id": 42,
        "collection": "users",
        "email": "admin@example.com",
        "role": "admin"
    })
}

#[test]
fn test_update_job_carries_projected_diff() {
    let rec = recorder();
    let target = rec
        .target("users", AuditType::Collection, &users_fields())
        .unwrap();

    rec.on_collection_change(
        &target,
        ChangeOperation::Update,
        Some(&json!({
            "id": "u1",
            "email": "old@example.com",
            "password": "a",
            "manager": { "id": "u7", "email": "boss@example.com" },
            "lastLogin": "monday"
        })),
        &json!({
            "id": "u1",
            "email": "new@example.com",
            "password": "b",
            "manager": "u7",
            "lastLogin": "tuesday"
        }),
        Some(&admin()),
    )
    .unwrap();

    let jobs = rec.sink().jobs().unwrap();
    assert_eq!(jobs.len(), 1);
    let job = &jobs[0];

    assert_eq!(job.slug, "users");
    assert_eq!(job.kind, AuditType::Collection);
    assert_eq!(job.action, AuditAction::Update);
    assert_eq!(job.doc_id, "u1");
    assert_eq!(job.user_id, "42");

    let before = Value::Object(job.context.data.before.clone().unwrap());
    let after = Value::Object(job.context.data.after.clone().unwrap());
    assert_eq!(before, json!({ "email": "old@example.com", "password": REDACTED }));
    assert_eq!(after, json!({ "email": "new@example.com", "password": REDACTED }));

    let user = job.context.user.as_ref().unwrap();
    assert_eq!(user.role, "admin");
    assert!(!user.is_system);
}

#[test]
fn test_create_and_delete_jobs() {
    let rec = recorder();
    let target = rec
        .target("posts", AuditType::Collection, &[SchemaField::primitive("title")])
        .unwrap();
    let doc = json!({ "id": 9, "title": "Hello" });

    rec.on_collection_change(&target, ChangeOperation::Create, None, &doc, None)
        .unwrap();
    rec.on_collection_delete(&target, &doc, None).unwrap();

    let jobs = rec.sink().drain().unwrap();
    assert_eq!(jobs.len(), 2);

    assert_eq!(jobs[0].action, AuditAction::Create);
    assert!(jobs[0].context.data.before.is_none());
    assert_eq!(jobs[0].context.data.after.as_ref().unwrap()["title"], "Hello");

    assert_eq!(jobs[1].action, AuditAction::Delete);
    assert_eq!(jobs[1].context.data.before.as_ref().unwrap()["title"], "Hello");
    assert!(jobs[1].context.data.after.is_none());
    assert_eq!(jobs[1].doc_id, "9");
}

#[test]
fn test_excluded_targets_enqueue_nothing() {
    let rec = recorder();
    let media = rec.target("media", AuditType::Collection, &[]).unwrap();
    let footer = rec.target("footer", AuditType::Global, &[]).unwrap();
    let logs = rec
        .target("audit-logs", AuditType::Collection, &[])
        .unwrap();

    assert!(rec
        .on_collection_change(&media, ChangeOperation::Create, None, &json!({}), None)
        .unwrap()
        .is_none());
    assert!(rec
        .on_global_change(&footer, None, &json!({ "a": 1 }), None)
        .unwrap()
        .is_none());
    assert!(rec
        .on_collection_delete(&logs, &json!({ "id": 1 }), None)
        .unwrap()
        .is_none());
    assert!(rec.sink().jobs().unwrap().is_empty());
}

#[test]
fn test_global_job_is_update() {
    let rec = recorder();
    let target = rec.target("settings", AuditType::Global, &[]).unwrap();

    let request_id = rec
        .on_global_change(
            &target,
            Some(&json!({ "siteName": "A" })),
            &json!({ "siteName": "B" }),
            Some(&admin()),
        )
        .unwrap()
        .unwrap();

    let jobs = rec.sink().jobs().unwrap();
    assert_eq!(jobs[0].kind, AuditType::Global);
    assert_eq!(jobs[0].action, AuditAction::Update);
    assert_eq!(jobs[0].request_id, request_id);
}

#[test]
fn test_recording_is_logged_with_request_id() {
    let capture = init_test_capture();
    let rec = recorder();
    let target = rec
        .target("loggedRecordingSlug", AuditType::Collection, &[])
        .unwrap();

    let request_id = rec
        .on_collection_change(&target, ChangeOperation::Create, None, &json!({ "a": 1 }), None)
        .unwrap()
        .unwrap();

    let found = capture.count_events(|e| {
        e.op.as_deref() == Some("record_audit_job")
            && e.event.as_deref() == Some(EVENT_END)
            && e.fields.get("request_id").map(String::as_str) == Some(request_id.as_str())
    });
    assert_eq!(found, 1);
}

#[test]
fn test_stamp_respects_exclusions() {
    let rec = recorder();
    let media = rec.target("media", AuditType::Collection, &[]).unwrap();
    let posts = rec.target("posts", AuditType::Collection, &[]).unwrap();
    let now = chrono::Utc::now();

    let mut media_doc = json!({});
    let mut post_doc = json!({});
    assert!(!rec
        .stamp(&media, &mut media_doc, None, None, None, now)
        .unwrap());
    assert!(rec
        .stamp(&posts, &mut post_doc, None, None, Some(&admin()), now)
        .unwrap());

    assert_eq!(media_doc, json!({}));
    assert_eq!(post_doc["audit"]["updatedBy"], "admin@example.com (42)");
}
