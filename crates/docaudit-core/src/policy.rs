//! Process-wide audit policy constants.
//!
//! These key names apply at every depth of every document, independent of
//! any schema annotation. The values are part of the persisted audit format
//! and must not change.

use serde_json::{Map, Value};

/// Marker written in place of a redacted value.
pub const REDACTED: &str = "[REDACTED]";

/// Keys whose changed values are always redacted.
pub const GLOBAL_REDACT_KEYS: &[&str] = &[
    "password",
    "passwordConfirm",
    "secret",
    "token",
    "resetToken",
    "apiKey",
    "privateKey",
    "refreshToken",
    "accessToken",
    "sessionToken",
    "sessionSecret",
    "salt",
    "hash",
    "loginAttempts",
    "lockUntil",
    "sessions",
    "cvc",
];

/// Keys that never appear in an audit diff.
pub const GLOBAL_IGNORE_KEYS: &[&str] = &["loginAt", "lastLogin", "audit"];

pub fn is_globally_redacted(key: &str) -> bool {
    GLOBAL_REDACT_KEYS.contains(&key)
}

pub fn is_globally_ignored(key: &str) -> bool {
    GLOBAL_IGNORE_KEYS.contains(&key)
}

/// Copy `value`, replacing every value stored under a sensitive key.
///
/// A key is sensitive when it is in [`GLOBAL_REDACT_KEYS`] or `extra_keys`.
/// Matching is by key name at any depth, including objects inside arrays.
pub fn redact_keys(value: &Value, extra_keys: &[String]) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| redact_keys(item, extra_keys))
                .collect(),
        ),
        Value::Object(obj) => {
            let mut out = Map::with_capacity(obj.len());
            for (key, inner) in obj {
                let sensitive =
                    is_globally_redacted(key) || extra_keys.iter().any(|k| k == key);
                let replaced = if sensitive {
                    Value::String(REDACTED.to_string())
                } else {
                    redact_keys(inner, extra_keys)
                };
                out.insert(key.clone(), replaced);
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}
