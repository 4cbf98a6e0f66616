//! Detection of JSON-encoded strings.
//!
//! Some fields (custom fields in particular) store structured data as JSON
//! text. The diff walks into such strings as if they were nested values.
//! Any string that parses as an object or array is treated this way, which
//! means free text that happens to look like JSON is diffed structurally too.

use serde_json::Value;

/// Parse `value` as structured data if it is a string holding a JSON object
/// or array. Scalars encoded as JSON (`"5"`, `"true"`) stay plain strings.
pub fn maybe_parse(value: &Value) -> Option<Value> {
    let Value::String(text) = value else {
        return None;
    };
    let trimmed = text.trim_start();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(parsed @ (Value::Object(_) | Value::Array(_))) => Some(parsed),
        _ => None,
    }
}
