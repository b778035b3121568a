//! Plugin-level hook handlers: config gating, job building and enqueueing.

use crate::audit::event::{
    collection_change_event, collection_delete_event, global_change_event, AuditJob,
    AuditTarget, AuditType, ChangeOperation,
};
use crate::audit::sink::AuditSink;
use crate::audit::stamp::stamp_audit_data;
use crate::config::AuditPluginConfig;
use crate::errors::Result;
use crate::{log_op_end, log_op_error, log_op_start};
use chrono::{DateTime, Utc};
use docaudit_core_types::RequestId;
use serde_json::Value;
use std::time::Instant;

/// Runs the audit hooks of one host application.
pub struct AuditRecorder<S: AuditSink> {
    config: AuditPluginConfig,
    sink: S,
}

impl<S: AuditSink> AuditRecorder<S> {
    pub fn new(config: AuditPluginConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &AuditPluginConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Build a target for `slug` using the configured depth limit.
    ///
    /// # Errors
    ///
    /// `SchemaTooDeep` if the schema nests too deeply.
    pub fn target(
        &self,
        slug: &str,
        kind: AuditType,
        fields: &[crate::schema::SchemaField],
    ) -> Result<AuditTarget> {
        AuditTarget::new(slug, kind, fields, self.config.diff_options())
    }

    /// Stamp bookkeeping fields into `data` before a write.
    ///
    /// Returns `false` and leaves `data` untouched when the target is
    /// excluded from stamping.
    ///
    /// # Errors
    ///
    /// `InvalidDocument` if `data` cannot hold the audit group.
    pub fn stamp(
        &self,
        target: &AuditTarget,
        data: &mut Value,
        operation: Option<ChangeOperation>,
        original: Option<&Value>,
        user: Option<&Value>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let stamped = match target.kind() {
            AuditType::Collection => self.config.stamps_collection(target.slug()),
            AuditType::Global => self.config.stamps_global(target.slug()),
        };
        if !stamped {
            return Ok(false);
        }
        stamp_audit_data(
            data,
            operation,
            original,
            user,
            &self.config.username_field,
            now,
        )?;
        Ok(true)
    }

    /// After-change hook for collections.
    ///
    /// Returns the request id of the enqueued job, or `None` when the
    /// collection is not audited.
    ///
    /// # Errors
    ///
    /// `DocumentTooDeep` from the diff, or `EnqueueFailed` from the sink.
    pub fn on_collection_change(
        &self,
        target: &AuditTarget,
        operation: ChangeOperation,
        previous: Option<&Value>,
        doc: &Value,
        user: Option<&Value>,
    ) -> Result<Option<RequestId>> {
        if !self.config.audits_collection(target.slug()) {
            return Ok(None);
        }
        self.record(target, |t| {
            collection_change_event(t, operation, previous, doc, user)
        })
        .map(Some)
    }

    /// After-delete hook for collections.
    ///
    /// # Errors
    ///
    /// `DocumentTooDeep` from the diff, or `EnqueueFailed` from the sink.
    pub fn on_collection_delete(
        &self,
        target: &AuditTarget,
        doc: &Value,
        user: Option<&Value>,
    ) -> Result<Option<RequestId>> {
        if !self.config.audits_collection(target.slug()) {
            return Ok(None);
        }
        self.record(target, |t| collection_delete_event(t, doc, user))
            .map(Some)
    }

    /// After-change hook for globals.
    ///
    /// # Errors
    ///
    /// `DocumentTooDeep` from the diff, or `EnqueueFailed` from the sink.
    pub fn on_global_change(
        &self,
        target: &AuditTarget,
        previous: Option<&Value>,
        doc: &Value,
        user: Option<&Value>,
    ) -> Result<Option<RequestId>> {
        if !self.config.audits_global(target.slug()) {
            return Ok(None);
        }
        self.record(target, |t| global_change_event(t, previous, doc, user))
            .map(Some)
    }

    fn record<F>(&self, target: &AuditTarget, build: F) -> Result<RequestId>
    where
        F: FnOnce(&AuditTarget) -> Result<AuditJob>,
    {
        let start = Instant::now();
        log_op_start!("record_audit_job", slug = target.slug());

        let result = build(target).and_then(|job| {
            let request_id = job.request_id.clone();
            let action = job.action;
            let doc_id = job.doc_id.clone();
            self.sink.enqueue(job)?;
            Ok((request_id, action, doc_id))
        });

        match result {
            Ok((request_id, action, doc_id)) => {
                log_op_end!(
                    "record_audit_job",
                    duration_ms = start.elapsed().as_millis() as u64,
                    slug = target.slug(),
                    action = action.as_str(),
                    doc_id = %doc_id,
                    request_id = %request_id
                );
                Ok(request_id)
            }
            Err(err) => {
                log_op_error!(
                    "record_audit_job",
                    crate::errors::ExError::from(err.clone()).with_slug(target.slug()),
                    duration_ms = start.elapsed().as_millis() as u64,
                    slug = target.slug()
                );
                Err(err)
            }
        }
    }
}
