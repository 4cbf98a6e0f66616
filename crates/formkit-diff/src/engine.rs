//! Recursive structural diff.
//!
//! Objects and arrays are walked generically: an array is treated as an
//! object keyed by element index, so there is no positional alignment. A
//! pure reordering of an array is reported as one change per moved index.

use std::borrow::Cow;
use std::collections::BTreeSet;

use formkit_model::json::json_eq;
use formkit_model::{DiffEntry, DiffOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parse::maybe_parse;

/// Path prefix routed to [`DiffOutcome::lines_changes`] by default.
pub const DEFAULT_LINE_COLLECTION: &str = "lines";

/// Settings for a diff run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Keys skipped at every depth.
    pub excluded_keys: BTreeSet<String>,
    /// Entries whose path starts with this prefix are line changes.
    pub line_collection: String,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            excluded_keys: BTreeSet::new(),
            line_collection: DEFAULT_LINE_COLLECTION.to_string(),
        }
    }
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add keys to the exclusion set.
    #[must_use]
    pub fn exclude<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_line_collection(mut self, collection: impl Into<String>) -> Self {
        self.line_collection = collection.into();
        self
    }

    #[inline]
    pub fn is_excluded(&self, key: &str) -> bool {
        self.excluded_keys.contains(key)
    }

    /// Copy of `value` with excluded keys removed at every depth.
    ///
    /// Strings are copied as-is, even when they hold JSON.
    pub fn prune(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .filter(|(key, _)| !self.is_excluded(key))
                    .map(|(key, nested)| (key.clone(), self.prune(nested)))
                    .collect(),
            ),
            Value::Array(items) => Value::Array(items.iter().map(|item| self.prune(item)).collect()),
            other => other.clone(),
        }
    }

    fn is_line_path(&self, path: &str) -> bool {
        path.starts_with(self.line_collection.as_str())
    }
}

/// Diff two structures, skipping `excluded_keys` at every depth.
///
/// Paths are dotted and start with `path_prefix` when it is not empty.
/// Entries under `lines` go to `lines_changes`, the rest to `res_changes`.
pub fn give_objects_difference(
    original: &Value,
    modified: &Value,
    excluded_keys: &[&str],
    path_prefix: &str,
) -> DiffOutcome {
    let options = DiffOptions::new().exclude(excluded_keys.iter().copied());
    diff_with_options(original, modified, &options, path_prefix)
}

/// Diff two structures with explicit options.
pub fn diff_with_options(
    original: &Value,
    modified: &Value,
    options: &DiffOptions,
    path_prefix: &str,
) -> DiffOutcome {
    let mut walker = DiffWalker {
        options,
        outcome: DiffOutcome::default(),
    };
    walker.walk(original, modified, path_prefix);
    tracing::debug!(
        line_changes = walker.outcome.lines_changes.len(),
        resource_changes = walker.outcome.res_changes.len(),
        "Computed structural diff"
    );
    walker.outcome
}

struct DiffWalker<'a> {
    options: &'a DiffOptions,
    outcome: DiffOutcome,
}

impl DiffWalker<'_> {
    fn walk(&mut self, original: &Value, modified: &Value, prefix: &str) {
        for (key, before) in entries(original) {
            if self.options.is_excluded(&key) {
                continue;
            }
            let path = join_path(prefix, &key);
            match child(modified, &key) {
                Some(after) => self.compare(before, after, &path),
                None => self.emit(DiffEntry::removed(path, self.options.prune(before))),
            }
        }
        for (key, after) in entries(modified) {
            if self.options.is_excluded(&key) || child(original, &key).is_some() {
                continue;
            }
            let value = self.options.prune(after);
            self.emit(DiffEntry::added(join_path(prefix, &key), value));
        }
    }

    fn compare(&mut self, before: &Value, after: &Value, path: &str) {
        match (maybe_parse(before), maybe_parse(after)) {
            (Some(parsed_before), Some(parsed_after)) => {
                self.walk(&parsed_before, &parsed_after, path);
            }
            (Some(_), None) | (None, Some(_)) => {
                self.emit(DiffEntry::primitive_json(
                    path,
                    self.options.prune(before),
                    self.options.prune(after),
                ));
            }
            (None, None) => {
                if is_container(before) && is_container(after) {
                    self.walk(before, after, path);
                } else if !json_eq(before, after) {
                    self.emit(DiffEntry::primitive(
                        path,
                        self.options.prune(before),
                        self.options.prune(after),
                    ));
                }
            }
        }
    }

    fn emit(&mut self, entry: DiffEntry) {
        tracing::trace!(path = %entry.path, kind = %entry.kind(), "Diff entry");
        if self.options.is_line_path(&entry.path) {
            self.outcome.lines_changes.push(entry);
        } else {
            self.outcome.res_changes.push(entry);
        }
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Keys of a container in its own order; arrays use their indices.
fn entries(value: &Value) -> Vec<(Cow<'_, str>, &Value)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, nested)| (Cow::Borrowed(key.as_str()), nested))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, nested)| (Cow::Owned(index.to_string()), nested))
            .collect(),
        _ => Vec::new(),
    }
}

/// Look up a key in an object, or an index key in an array.
pub(crate) fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
