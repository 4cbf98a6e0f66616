//! Shared types for the formkit crates.
//!
//! - [`FormField`] / [`FieldOutcome`] / [`FormState`]: per-field edit state
//! - [`DiffEntry`] / [`DiffOutcome`] / [`ChangeSet`]: structural differences
//! - [`FormError`]: errors from form operations

pub mod diff;
pub mod error;
pub mod field;
pub mod json;

pub use diff::{Change, ChangeSet, DiffEntry, DiffKind, DiffOutcome, LineChangeGroup};
pub use error::{FormError, Result};
pub use field::{FieldOutcome, FormField, FormState};
