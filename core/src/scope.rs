//! Task scope selection.

use serde_json::{Map, Value};

/// Encode a task scope as the JSON object string stored in `scope_json`.
///
/// Only non-empty selections appear in the output.
#[must_use]
pub fn build_scope_json(users: &[u64], merchants: &[u64], tags: &[u64]) -> String {
    let mut parts = Map::new();
    for (key, ids) in [("users", users), ("merchants", merchants), ("tags", tags)] {
        if !ids.is_empty() {
            parts.insert(key.to_string(), Value::from(ids.to_vec()));
        }
    }
    Value::Object(parts).to_string()
}
