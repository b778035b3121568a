//! Tagged view over untyped document snapshots.
//!
//! Snapshots arrive as `serde_json::Value`. The diff engine never inspects
//! them with ad-hoc type checks; it classifies each position once into a
//! [`Shape`] and matches on that.

use serde_json::{Map, Value};

/// Classification of a value at one position of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    /// The key is missing on this side.
    Absent,
    /// Scalar, including explicit `null`.
    Primitive,
    /// Array; compared as an opaque leaf unless a relationship.
    Sequence,
    /// Nested object; diffed key by key.
    Structure(&'a Map<String, Value>),
}

impl<'a> Shape<'a> {
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None => Shape::Absent,
            Some(Value::Object(map)) => Shape::Structure(map),
            Some(Value::Array(_)) => Shape::Sequence,
            Some(_) => Shape::Primitive,
        }
    }
}
