//! Error types for form operations.

use thiserror::Error;

/// Errors raised by form controller operations.
///
/// Validation failures are not errors: they are stored on the field as
/// [`FieldOutcome::Invalid`](crate::FieldOutcome::Invalid).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A field name was used before being registered.
    #[error("field '{name}' is not registered")]
    UnknownField { name: String },

    /// Bulk hydration received something other than a JSON object.
    #[error("entity snapshot must be an object, found {found}")]
    EntityNotObject { found: &'static str },

    /// A pattern validator was built from an invalid regular expression.
    #[error("invalid validation pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

pub type Result<T> = std::result::Result<T, FormError>;
