//! Relationship reference normalization.
//!
//! A relationship value may arrive populated (`{ "id": "u1", "email": .. }`),
//! as a bare id, as a polymorphic reference (`{ "relationTo": "users",
//! "value": .. }`), or as an array of any of these. The audit trail stores
//! ids only.

use serde_json::{Map, Value};

const ID_KEY: &str = "id";
const RELATION_TO_KEY: &str = "relationTo";
const VALUE_KEY: &str = "value";

/// Reduce a relationship value to an id, or an array of ids for to-many.
///
/// Polymorphic references keep their `relationTo` and have `value` reduced.
/// Objects without an `id` are returned unchanged and compared as-is.
pub fn normalize_relationship(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(reference_id).collect()),
        other => reference_id(other),
    }
}

fn reference_id(value: &Value) -> Value {
    let Value::Object(obj) = value else {
        return value.clone();
    };

    if let Some(id) = obj.get(ID_KEY) {
        return id.clone();
    }

    match (obj.get(RELATION_TO_KEY), obj.get(VALUE_KEY)) {
        (Some(relation_to), Some(inner)) => {
            let mut out = Map::new();
            out.insert(RELATION_TO_KEY.to_string(), relation_to.clone());
            out.insert(VALUE_KEY.to_string(), reference_id(inner));
            Value::Object(out)
        }
        _ => value.clone(),
    }
}
