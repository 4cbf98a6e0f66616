//! Form field state.
//!
//! A [`FormField`] holds one editable value together with the outcome of its
//! most recent validation. The outcome is an explicit sum type so that a field
//! is always either valid (carrying the value that passed) or invalid
//! (carrying the messages that explain why).

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of validating a field's current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FieldOutcome<T = Value> {
    /// The value passed validation (or the field has no validator).
    #[serde(rename_all = "camelCase")]
    Valid { validated_value: T },
    /// The value failed validation.
    Invalid { errors: Vec<String> },
}

impl<T: Clone> FieldOutcome<T> {
    /// Derive the outcome for `value` from a validator's error list.
    ///
    /// An empty list means the value is valid.
    pub fn from_errors(value: &T, errors: Vec<String>) -> Self {
        if errors.is_empty() {
            Self::Valid {
                validated_value: value.clone(),
            }
        } else {
            Self::Invalid { errors }
        }
    }
}

impl<T> FieldOutcome<T> {
    /// Whether this outcome is [`FieldOutcome::Valid`].
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Error messages; empty for valid outcomes.
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Valid { .. } => &[],
            Self::Invalid { errors } => errors,
        }
    }
}

/// One editable input: its value, configured initial value and validity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField<T = Value> {
    /// Value the field was registered with, restored by a form reset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<T>,
    /// Current value.
    pub value: T,
    /// Outcome of the latest validation of `value`.
    pub outcome: FieldOutcome<T>,
}

impl<T: Clone> FormField<T> {
    /// Build a field whose outcome is derived from `errors`.
    pub fn new(value: T, errors: Vec<String>, initial_value: Option<T>) -> Self {
        let outcome = FieldOutcome::from_errors(&value, errors);
        Self {
            initial_value,
            value,
            outcome,
        }
    }

    /// Build a valid field with no initial value.
    pub fn valid(value: T) -> Self {
        Self::new(value, Vec::new(), None)
    }

    /// Replace the value and its outcome. The initial value is kept.
    pub fn transition(&mut self, value: T, errors: Vec<String>) {
        self.outcome = FieldOutcome::from_errors(&value, errors);
        self.value = value;
    }

    /// Empty the error list without touching the value.
    ///
    /// Invalid fields stay invalid so the submit gate remains closed.
    pub fn clear_errors(&mut self) {
        if let FieldOutcome::Invalid { errors } = &mut self.outcome {
            errors.clear();
        }
    }
}

impl<T> FormField<T> {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.outcome.is_valid()
    }

    pub fn errors(&self) -> &[String] {
        self.outcome.errors()
    }
}

/// All fields of one form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    fields: BTreeMap<String, FormField>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state of valid fields from plain `(name, value)` pairs.
    ///
    /// Useful when a form's values come from somewhere other than a
    /// controller, such as a saved draft or a test fixture.
    pub fn from_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        values
            .into_iter()
            .map(|(name, value)| (name.into(), FormField::valid(value)))
            .collect()
    }

    /// Insert or replace a field, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, field: FormField) -> Option<FormField> {
        self.fields.insert(name.into(), field)
    }

    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FormField> {
        self.fields.iter()
    }

    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, FormField> {
        self.fields.iter_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Current values keyed by field name.
    pub fn values(&self) -> serde_json::Map<String, Value> {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.value.clone()))
            .collect()
    }

    /// Names of fields currently holding an invalid outcome.
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, field)| !field.is_valid())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl FromIterator<(String, FormField)> for FormState {
    fn from_iter<I: IntoIterator<Item = (String, FormField)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FormState {
    type Item = (&'a String, &'a FormField);
    type IntoIter = btree_map::Iter<'a, String, FormField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_follows_error_list() {
        let field = FormField::new(json!("x"), vec![], None);
        assert_eq!(
            field.outcome,
            FieldOutcome::Valid {
                validated_value: json!("x")
            }
        );

        let field = FormField::new(json!(""), vec!["required".to_string()], None);
        assert!(!field.is_valid());
        assert_eq!(field.errors(), ["required".to_string()]);
    }

    #[test]
    fn transition_keeps_initial_value() {
        let mut field = FormField::new(json!("a"), vec![], Some(json!("a")));
        field.transition(json!("b"), vec![]);
        assert_eq!(field.initial_value, Some(json!("a")));
        assert_eq!(field.value, json!("b"));
        assert_eq!(
            field.outcome,
            FieldOutcome::Valid {
                validated_value: json!("b")
            }
        );
    }

    #[test]
    fn clear_errors_keeps_field_invalid() {
        let mut field = FormField::new(json!(""), vec!["required".to_string()], None);
        field.clear_errors();
        assert!(!field.is_valid());
        assert!(field.errors().is_empty());
        assert_eq!(field.value, json!(""));
    }

    #[test]
    fn outcome_serializes_tagged() {
        let field = FormField::new(json!(3), vec![], None);
        let value = serde_json::to_value(&field).expect("serialize field");
        assert_eq!(
            value,
            json!({"value": 3, "outcome": {"status": "valid", "validatedValue": 3}})
        );
    }

    #[test]
    fn state_from_values_is_all_valid() {
        let state = FormState::from_values([("name", json!("A")), ("code", json!(""))]);
        assert_eq!(state.len(), 2);
        assert!(state.invalid_fields().is_empty());
        assert_eq!(state.values().get("name"), Some(&json!("A")));
    }
}
