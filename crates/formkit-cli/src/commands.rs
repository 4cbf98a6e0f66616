//! Command implementations.
//!
//! Each command reads its JSON inputs, runs the library operation and
//! returns a typed result; printing is left to the binary.

use std::path::Path;

use anyhow::{Context, Result, bail};
use formkit_diff::{DiffOptions, modification_info_with_options};
use formkit_model::json::type_name;
use formkit_model::{ChangeSet, FormState};
use formkit_normalize::{DirtyChecker, EntityNormalizer};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Outcome of `formkit dirty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirtyReport {
    pub dirty: bool,
    /// First field found to differ, if any.
    pub first_difference: Option<String>,
    pub field_count: usize,
    /// Whether an entity was supplied (edit flow) or not (creation flow).
    pub compared_to_entity: bool,
}

pub fn read_json(path: &Path) -> Result<Value> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse JSON in {}", path.display()))
}

/// Diff two snapshots and group the result for review.
pub fn run_diff(original: &Path, modified: &Path, options: &DiffOptions) -> Result<ChangeSet> {
    let original = read_json(original)?;
    let modified = read_json(modified)?;
    let change_set = modification_info_with_options(&original, &modified, options);
    info!(
        lines = change_set.line_changes.len(),
        changes = change_set.change_count(),
        "Diff complete"
    );
    Ok(change_set)
}

/// Compare saved form values with an entity, or check a new form for input.
pub fn run_dirty(
    form: &Path,
    entity: Option<&Path>,
    normalizer: EntityNormalizer,
) -> Result<DirtyReport> {
    let values = match read_json(form)? {
        Value::Object(values) => values,
        other => bail!(
            "form file {} must hold an object of field values, found {}",
            form.display(),
            type_name(&other)
        ),
    };
    let state = FormState::from_values(values);
    let entity = entity.map(read_json).transpose()?;

    let checker = DirtyChecker::new(normalizer);
    let first_difference = checker
        .first_difference(&state, entity.as_ref())
        .map(str::to_string);
    info!(fields = state.len(), dirty = first_difference.is_some(), "Dirty check complete");

    Ok(DirtyReport {
        dirty: first_difference.is_some(),
        first_difference,
        field_count: state.len(),
        compared_to_entity: entity.is_some(),
    })
}

/// Rewrite an entity into form-field shape.
pub fn run_normalize(entity: &Path, normalizer: &EntityNormalizer) -> Result<Value> {
    let entity = read_json(entity)?;
    Ok(normalizer.normalize(&entity))
}
