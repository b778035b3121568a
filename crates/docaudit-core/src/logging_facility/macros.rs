//! Canonical logging macros
//!
//! Every audit operation logs a `start` event and then exactly one of `end`
//! or `end_error`. Field keys follow `docaudit_core_types::schema`. Document
//! values never appear in these events; only paths, slugs and ids do.
//!
//! The macros reach `tracing` and the schema constants through
//! `$crate::__private`, so callers only need `docaudit-core` as a dependency.

/// Log the start of an operation
///
/// Extra fields follow the operation name, usually the target `slug`.
///
/// # Example
///
/// ```
/// # use docaudit_core::log_op_start;
/// log_op_start!("compute_audit_diff");
/// log_op_start!("record_audit_job", slug = "posts");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Log the successful end of an operation
///
/// `duration_ms` is required; result sizes such as `changed_len` or the job's
/// `request_id` go after it.
///
/// # Example
///
/// ```
/// # use docaudit_core::log_op_end;
/// log_op_end!("compute_audit_diff", duration_ms = 3, changed_len = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Log an operation error
///
/// The error expression must convert into [`ExError`](crate::errors::ExError).
/// Besides `err_kind` and `err_code`, the event carries whatever audit
/// context the error holds: `err_path` (schema or document path),
/// `err_slug` and `err_request_id`. Unset context is left out.
///
/// # Example
///
/// ```
/// # use docaudit_core::{log_op_error, errors::{AuditError, ExError}};
/// let err = AuditError::SchemaTooDeep { path: "a.b".to_string(), max_depth: 1 };
/// log_op_error!("load_fields", err.clone(), duration_ms = 1);
/// log_op_error!(
///     "record_audit_job",
///     ExError::from(err).with_slug("posts"),
///     duration_ms = 1
/// );
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__private::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_path = ex_err.path(),
            err_slug = ex_err.slug(),
            err_request_id = ex_err.request_id().map(|id| id.as_str()),
            $($($field)*)?
        );
    }};
}

/// Log that an audit policy decided the outcome at a document path
///
/// Emitted at debug level while diffing. Records the policy name and the
/// dotted path only; the values at that path are never passed in.
///
/// # Example
///
/// ```
/// # use docaudit_core::log_policy_applied;
/// log_policy_applied!("redact", "user.email");
/// ```
#[macro_export]
macro_rules! log_policy_applied {
    ($policy:expr, $path:expr) => {
        $crate::__private::tracing::debug!(
            component = module_path!(),
            event = $crate::__private::schema::EVENT_POLICY,
            policy = $policy,
            path = %$path,
        );
    };
}
