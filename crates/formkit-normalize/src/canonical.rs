//! Canonical ordering of JSON values.

use serde_json::{Map, Value};

/// Recursively sort a value: object keys alphabetically, array elements by
/// their canonical serialization.
pub fn deep_sort(value: &Value) -> Value {
    match value {
        Value::Array(items) => {
            let mut sorted: Vec<Value> = items.iter().map(deep_sort).collect();
            sorted.sort_by_cached_key(Value::to_string);
            Value::Array(sorted)
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), deep_sort(value)))
                    .collect::<Map<String, Value>>(),
            )
        }
        other => other.clone(),
    }
}

/// Compact serialization of a value after [`deep_sort`].
pub fn canonical_string(value: &Value) -> String {
    deep_sort(value).to_string()
}

/// Whether `key` appears as an object key anywhere inside `value`.
pub fn contains_key_deep(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => {
            map.contains_key(key) || map.values().any(|nested| contains_key_deep(nested, key))
        }
        Value::Array(items) => items.iter().any(|nested| contains_key_deep(nested, key)),
        _ => false,
    }
}

/// Copy of `value` with every object key `from` renamed to `to`.
pub fn rename_key_deep(value: &Value, from: &str, to: &str) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, nested)| {
                    let key = if key == from { to.to_string() } else { key.clone() };
                    (key, rename_key_deep(nested, from, to))
                })
                .collect(),
        ),
        Value::Array(items) => items
            .iter()
            .map(|nested| rename_key_deep(nested, from, to))
            .collect(),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deep_sort_is_order_insensitive() {
        let a = json!([{"b": [3, 1], "a": 1}, "x"]);
        let b = json!(["x", {"a": 1, "b": [1, 3]}]);
        assert_eq!(canonical_string(&a), canonical_string(&b));
    }

    #[test]
    fn sorted_object_keys_serialize_in_order() {
        let value: Value = serde_json::from_str(r#"{"z":1,"a":{"y":2,"b":3}}"#).unwrap();
        assert_eq!(canonical_string(&value), r#"{"a":{"b":3,"y":2},"z":1}"#);
    }

    #[test]
    fn rename_reaches_nested_objects() {
        let value = json!([{"code": "c", "arguments": [{"name": "n", "arguments": 1}]}]);
        let renamed = rename_key_deep(&value, "arguments", "args");
        assert!(!contains_key_deep(&renamed, "arguments"));
        assert_eq!(renamed[0]["args"][0]["args"], json!(1));
    }
}
