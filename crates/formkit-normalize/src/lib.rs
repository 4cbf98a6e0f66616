//! Entity normalization and dirty checking.
//!
//! Loaded entities embed related records while form fields hold flat id
//! references. [`EntityNormalizer`] rewrites an entity into the form's shape
//! using an ordered table of [`NormalizationRule`]s, and
//! [`check_unsaved_changes`] compares a [`FormState`](formkit_model::FormState)
//! against the normalized entity.

pub mod canonical;
mod dirty;
mod rules;

pub use dirty::{DirtyChecker, check_unsaved_changes};
pub use rules::{EntityNormalizer, NormalizationRule, RelationShape, normalize_entity};
