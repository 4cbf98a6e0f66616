//! Field validators.
//!
//! A validator is a pure function from a candidate value to a list of error
//! messages. An empty list means the value is acceptable. Validators are
//! supplied by the page that owns the form; the constructors in this module
//! cover the common cases.

use std::fmt;
use std::sync::Arc;

use formkit_model::{FormError, Result};
use regex::Regex;
use serde_json::Value;

type CheckFn<T> = dyn Fn(&T) -> Vec<String> + Send + Sync;

/// Shared, immutable validation function.
pub struct Validator<T = Value> {
    check: Arc<CheckFn<T>>,
}

impl<T> Validator<T> {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Run the validator. Panics inside the function are not caught.
    pub fn validate(&self, value: &T) -> Vec<String> {
        (self.check)(value)
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// Rejects `null`, empty strings and empty arrays.
pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Validator::new(move |value: &Value| {
        let missing = match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        };
        if missing {
            vec![message.clone()]
        } else {
            Vec::new()
        }
    })
}

/// Rejects strings (in characters) or arrays shorter than `min`.
///
/// Other value types pass.
pub fn min_length(min: usize) -> Validator {
    Validator::new(move |value: &Value| match length_of(value) {
        Some(len) if len < min => vec![format!("Must be at least {min} characters long")],
        _ => Vec::new(),
    })
}

/// Rejects strings (in characters) or arrays longer than `max`.
pub fn max_length(max: usize) -> Validator {
    Validator::new(move |value: &Value| match length_of(value) {
        Some(len) if len > max => vec![format!("Must be at most {max} characters long")],
        _ => Vec::new(),
    })
}

/// Rejects non-empty strings that do not match `pattern`.
///
/// Empty strings and `null` pass; combine with [`required`] to forbid them.
pub fn matches(pattern: &str, message: impl Into<String>) -> Result<Validator> {
    let regex = Regex::new(pattern).map_err(|e| FormError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    let message = message.into();
    Ok(Validator::new(move |value: &Value| match value {
        Value::String(s) if !s.is_empty() && !regex.is_match(s) => vec![message.clone()],
        _ => Vec::new(),
    }))
}

/// Runs every validator and concatenates their errors in order.
pub fn all_of(validators: Vec<Validator>) -> Validator {
    Validator::new(move |value: &Value| {
        validators
            .iter()
            .flat_map(|validator| validator.validate(value))
            .collect()
    })
}

fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_rejects_blank_values() {
        let v = required("Name is required");
        assert_eq!(v.validate(&json!(null)), vec!["Name is required"]);
        assert_eq!(v.validate(&json!("  ")), vec!["Name is required"]);
        assert_eq!(v.validate(&json!([])), vec!["Name is required"]);
        assert!(v.validate(&json!("Shoes")).is_empty());
        assert!(v.validate(&json!(0)).is_empty());
    }

    #[test]
    fn length_bounds_count_characters() {
        assert!(min_length(2).validate(&json!("éé")).is_empty());
        assert_eq!(min_length(3).validate(&json!("ab")).len(), 1);
        assert_eq!(max_length(1).validate(&json!(["a", "b"])).len(), 1);
        assert!(max_length(1).validate(&json!(42)).is_empty());
    }

    #[test]
    fn pattern_validator() {
        let slug = matches("^[a-z0-9-]+$", "Invalid slug").expect("valid pattern");
        assert!(slug.validate(&json!("blue-tee")).is_empty());
        assert!(slug.validate(&json!("")).is_empty());
        assert_eq!(slug.validate(&json!("Blue Tee")), vec!["Invalid slug"]);
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = matches("(", "never").expect_err("pattern should not compile");
        assert!(matches!(err, FormError::InvalidPattern { .. }));
    }

    #[test]
    fn all_of_concatenates() {
        let v = all_of(vec![required("required"), min_length(3)]);
        assert_eq!(
            v.validate(&json!("")),
            vec![
                "required".to_string(),
                "Must be at least 3 characters long".to_string()
            ]
        );
    }
}
