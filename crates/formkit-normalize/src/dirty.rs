//! Unsaved-change detection.
//!
//! Compares the live form against the last persisted entity to decide
//! whether leaving the page would discard edits.

use formkit_model::FormState;
use formkit_model::json::{is_blank, json_eq};
use serde_json::{Map, Value};

use crate::canonical::{canonical_string, contains_key_deep, deep_sort, rename_key_deep};
use crate::rules::EntityNormalizer;

/// Two names used for the arguments of configurable operations.
const ARGUMENTS_KEY: &str = "arguments";
const ARGS_KEY: &str = "args";

/// Compares form state with entity snapshots through a normalizer.
#[derive(Debug, Clone, Default)]
pub struct DirtyChecker {
    normalizer: EntityNormalizer,
}

impl DirtyChecker {
    pub fn new(normalizer: EntityNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &EntityNormalizer {
        &self.normalizer
    }

    /// Whether the form differs from `entity`.
    ///
    /// With no entity (creation flow) the form is dirty as soon as any field
    /// holds something other than `null` or `""`.
    pub fn is_dirty(&self, form_state: &FormState, entity: Option<&Value>) -> bool {
        self.first_difference(form_state, entity).is_some()
    }

    /// Name of the first field that makes the form dirty.
    pub fn first_difference<'a>(
        &self,
        form_state: &'a FormState,
        entity: Option<&Value>,
    ) -> Option<&'a str> {
        let Some(entity) = entity else {
            return form_state
                .iter()
                .find(|(_, field)| !is_blank(&field.value))
                .map(|(name, _)| name.as_str());
        };

        let normalized = self.normalizer.normalize(entity);
        let empty = Map::new();
        let saved = normalized.as_object().unwrap_or(&empty);

        for (name, field) in form_state {
            let Some(saved_value) = saved.get(name) else {
                tracing::debug!(field = %name, "Field missing from entity");
                return Some(name.as_str());
            };
            if !values_match(&field.value, saved_value) {
                tracing::debug!(field = %name, "Field differs from entity");
                return Some(name.as_str());
            }
        }
        None
    }
}

/// Dirty check against the built-in normalization rules.
pub fn check_unsaved_changes(form_state: &FormState, entity: Option<&Value>) -> bool {
    DirtyChecker::default().is_dirty(form_state, entity)
}

fn values_match(current: &Value, saved: &Value) -> bool {
    match (current, saved) {
        (Value::Array(left), Value::Array(right)) => arrays_match(left, right),
        (Value::Object(_), Value::Object(_)) => json_eq(&deep_sort(current), &deep_sort(saved)),
        _ => json_eq(current, saved),
    }
}

/// Element-wise comparison of canonically sorted arrays.
///
/// When one side names operation arguments `arguments` and the other `args`,
/// both are rewritten to `args` and compared again.
fn arrays_match(left: &[Value], right: &[Value]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    if sorted_strings(left) == sorted_strings(right) {
        return true;
    }

    let has = |items: &[Value], key: &str| items.iter().any(|item| contains_key_deep(item, key));
    let mixed_naming = (has(left, ARGUMENTS_KEY) && has(right, ARGS_KEY))
        || (has(left, ARGS_KEY) && has(right, ARGUMENTS_KEY));
    if !mixed_naming {
        return false;
    }

    let rename = |items: &[Value]| -> Vec<Value> {
        items
            .iter()
            .map(|item| rename_key_deep(item, ARGUMENTS_KEY, ARGS_KEY))
            .collect()
    };
    sorted_strings(&rename(left)) == sorted_strings(&rename(right))
}

fn sorted_strings(items: &[Value]) -> Vec<String> {
    let mut strings: Vec<String> = items.iter().map(canonical_string).collect();
    strings.sort();
    strings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn creation_flow_checks_for_any_input() {
        let filled = FormState::from_values([("name", json!("A"))]);
        assert!(check_unsaved_changes(&filled, None));

        let blank = FormState::from_values([("name", json!("")), ("code", json!(null))]);
        assert!(!check_unsaved_changes(&blank, None));
    }

    #[test]
    fn missing_entity_key_is_dirty() {
        let state = FormState::from_values([("name", json!("A")), ("slug", json!("a"))]);
        let checker = DirtyChecker::default();
        let entity = json!({"name": "A"});
        assert_eq!(checker.first_difference(&state, Some(&entity)), Some("slug"));
    }

    #[test]
    fn relation_fields_compare_after_normalization() {
        let state = FormState::from_values([
            ("facetValueIds", json!(["f2", "f1"])),
            ("featuredAssetId", json!("a1")),
        ]);
        let entity = json!({
            "facetValues": [{"id": "f1"}, {"id": "f2"}],
            "featuredAsset": {"id": "a1"}
        });
        assert!(!check_unsaved_changes(&state, Some(&entity)));
    }

    #[test]
    fn array_length_mismatch_is_dirty() {
        let state = FormState::from_values([("assetIds", json!(["a1"]))]);
        let entity = json!({"assets": [{"id": "a1"}, {"id": "a2"}]});
        assert!(check_unsaved_changes(&state, Some(&entity)));
    }

    #[test]
    fn arguments_and_args_are_the_same_shape() {
        let state = FormState::from_values([(
            "conditions",
            json!([{"code": "min_amount", "arguments": [{"name": "amount", "value": "100"}]}]),
        )]);
        let entity = json!({
            "conditions": [{"code": "min_amount", "args": [{"name": "amount", "value": "100"}]}]
        });
        assert!(!check_unsaved_changes(&state, Some(&entity)));

        let changed = json!({
            "conditions": [{"code": "min_amount", "args": [{"name": "amount", "value": "200"}]}]
        });
        assert!(check_unsaved_changes(&state, Some(&changed)));
    }

    #[test]
    fn scalars_and_objects() {
        let state = FormState::from_values([
            ("price", json!(100)),
            ("customFields", json!({"b": [2, 1], "a": true})),
        ]);
        let entity = json!({"price": 100.0, "customFields": {"a": true, "b": [1, 2]}});
        assert!(!check_unsaved_changes(&state, Some(&entity)));

        let entity = json!({"price": 101, "customFields": {"a": true, "b": [1, 2]}});
        assert!(check_unsaved_changes(&state, Some(&entity)));
    }
}
