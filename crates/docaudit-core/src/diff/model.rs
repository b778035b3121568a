//! Audit diff output types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Maximum nesting depth accepted by the extractor and the diff engine.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Before/after projections of one audited change.
///
/// Each side has the shape of the input document but holds only keys that
/// changed and survived policy filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditDiff {
    pub before: Map<String, Value>,
    pub after: Map<String, Value>,
}

impl AuditDiff {
    /// True when nothing reportable changed.
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// Top-level keys present on either side.
    pub fn changed_keys(&self) -> BTreeSet<&str> {
        self.before
            .keys()
            .chain(self.after.keys())
            .map(String::as_str)
            .collect()
    }
}

/// Tuning for a diff call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Nesting depth past which the engine reports `DocumentTooDeep`.
    pub max_depth: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
