//! Form controller.
//!
//! Aggregates the fields of one form. Every mutation runs the field's
//! validator and stores the outcome on the field; nothing here throws on a
//! failed validation. Fields are validated independently of each other.

use std::collections::BTreeMap;

use formkit_model::json::type_name;
use formkit_model::{FormError, FormField, FormState, Result};
use serde_json::Value;

use crate::validator::Validator;

/// Owns the edit state of one form.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    state: FormState,
    validators: BTreeMap<String, Validator>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field, replacing any field with the same name.
    ///
    /// The field starts at `initial_value` (or `null`), validated once.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        validator: Option<Validator>,
        initial_value: Option<Value>,
    ) -> &mut Self {
        let name = name.into();
        let field = initial_field(validator.as_ref(), initial_value);
        match validator {
            Some(validator) => {
                self.validators.insert(name.clone(), validator);
            }
            None => {
                self.validators.remove(&name);
            }
        }
        self.state.insert(name, field);
        self
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        validator: Option<Validator>,
        initial_value: Option<Value>,
    ) -> Self {
        self.register(name, validator, initial_value);
        self
    }

    /// Set one field's value and re-validate it.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<&FormField> {
        let errors = run_validator(self.validators.get(name), &value);
        let field = self
            .state
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField {
                name: name.to_string(),
            })?;
        field.transition(value, errors);
        Ok(field)
    }

    /// Hydrate every registered field from an entity snapshot.
    ///
    /// Fields missing from the entity become `null`. Keys of the entity that
    /// are not registered fields are ignored.
    pub fn set_state(&mut self, entity: &Value) -> Result<()> {
        let object = entity.as_object().ok_or(FormError::EntityNotObject {
            found: type_name(entity),
        })?;
        for (name, field) in self.state.iter_mut() {
            let value = object.get(name).cloned().unwrap_or(Value::Null);
            let errors = run_validator(self.validators.get(name), &value);
            field.transition(value, errors);
        }
        tracing::debug!(
            fields = self.state.len(),
            invalid = self.state.invalid_fields().len(),
            "Hydrated form from entity"
        );
        Ok(())
    }

    /// Re-validate every field against its current value.
    ///
    /// Returns true when no field is invalid. Refreshes the error list of
    /// every field, including ones the user never touched.
    pub fn check_if_all_fields_are_valid(&mut self) -> bool {
        for (name, field) in self.state.iter_mut() {
            let errors = run_validator(self.validators.get(name), &field.value);
            let value = field.value.clone();
            field.transition(value, errors);
        }
        let invalid = self.state.invalid_fields();
        if !invalid.is_empty() {
            tracing::debug!(?invalid, "Form has invalid fields");
        }
        invalid.is_empty()
    }

    /// True when every field with a validator currently holds a valid
    /// outcome. Does not re-run validators.
    pub fn have_valid_fields(&self) -> bool {
        self.state
            .iter()
            .filter(|(name, _)| self.validators.contains_key(name.as_str()))
            .all(|(_, field)| field.is_valid())
    }

    /// Empty every field's error list without changing values.
    pub fn clear_errors(&mut self) {
        for (_, field) in self.state.iter_mut() {
            field.clear_errors();
        }
    }

    /// Discard all edits, returning each field to its initial value.
    pub fn clear_all_form(&mut self) {
        for (name, field) in self.state.iter_mut() {
            let initial = field.initial_value.clone();
            *field = initial_field(self.validators.get(name), initial);
        }
    }

    /// Read-only view of all fields.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.state.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.state.get(name).map(|field| &field.value)
    }

    /// Current error messages for a field; empty for valid or unknown fields.
    pub fn errors(&self, name: &str) -> &[String] {
        match self.state.get(name) {
            Some(field) => field.errors(),
            None => &[],
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.state.contains(name)
    }
}

fn run_validator(validator: Option<&Validator>, value: &Value) -> Vec<String> {
    validator.map_or_else(Vec::new, |validator| validator.validate(value))
}

fn initial_field(validator: Option<&Validator>, initial_value: Option<Value>) -> FormField {
    let value = initial_value.clone().unwrap_or(Value::Null);
    let errors = run_validator(validator, &value);
    FormField::new(value, errors, initial_value)
}
