//! Dotted field paths (`parent.child.grandchild`).

use crate::errors::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated dotted path used as a policy override.
///
/// Segments are non-empty and contain no whitespace; the path has no
/// leading, trailing or doubled dots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DottedPath(String);

impl DottedPath {
    /// Parse and validate a dotted path.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::InvalidPolicyPath` if the path is empty, has an
    /// empty segment, or a segment contains whitespace.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| AuditError::InvalidPolicyPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("path is empty"));
        }
        for segment in raw.split('.') {
            if segment.is_empty() {
                return Err(invalid("path contains an empty segment"));
            }
            if segment.chars().any(char::is_whitespace) {
                return Err(invalid("path segment contains whitespace"));
            }
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl FromStr for DottedPath {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DottedPath {
    type Error = AuditError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DottedPath> for String {
    fn from(path: DottedPath) -> Self {
        path.0
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append `name` to a dotted `prefix`; an empty prefix yields `name` alone.
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
