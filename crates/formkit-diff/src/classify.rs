//! Grouping of line changes for order-modification review.

use std::collections::BTreeMap;

use formkit_model::{ChangeSet, DiffEntry, DiffOutcome, LineChangeGroup};
use serde_json::Value;

use crate::engine::{DiffOptions, child, diff_with_options};

/// Diff two order snapshots and group line entries by line id.
///
/// Resource-level entries pass through unchanged. Nothing is priced here:
/// the result only describes what changed.
pub fn give_modification_info(
    original: &Value,
    modified: &Value,
    excluded_keys: &[&str],
) -> ChangeSet {
    let options = DiffOptions::new().exclude(excluded_keys.iter().copied());
    modification_info_with_options(original, modified, &options)
}

/// [`give_modification_info`] with explicit options.
pub fn modification_info_with_options(
    original: &Value,
    modified: &Value,
    options: &DiffOptions,
) -> ChangeSet {
    let outcome = diff_with_options(original, modified, options, "");
    classify(original, modified, outcome, &options.line_collection)
}

/// Restructure a raw diff of `original` against `modified`.
///
/// `line_collection` is the dotted path of the line array, as used when the
/// diff was routed.
pub fn classify(
    original: &Value,
    modified: &Value,
    outcome: DiffOutcome,
    line_collection: &str,
) -> ChangeSet {
    let DiffOutcome {
        lines_changes,
        res_changes: mut resource_changes,
    } = outcome;
    let mut line_changes: Vec<LineChangeGroup> = Vec::new();
    let mut group_index: BTreeMap<String, usize> = BTreeMap::new();

    for entry in lines_changes {
        let Some(location) = LineLocation::parse(&entry.path, line_collection) else {
            tracing::debug!(path = %entry.path, "Line change without an index");
            resource_changes.push(entry);
            continue;
        };
        let original_line = location.resolve(original);
        let Some(line) = original_line.or_else(|| location.resolve(modified)) else {
            tracing::debug!(path = %entry.path, "Line change does not resolve to a line");
            resource_changes.push(entry);
            continue;
        };
        let Some(line_id) = line.get("id").and_then(id_string) else {
            tracing::debug!(path = %entry.path, "Line has no id");
            resource_changes.push(entry);
            continue;
        };

        let relative = entry.with_path(location.rest);
        match group_index.get(&line_id) {
            Some(&index) => line_changes[index].changes.push(relative),
            None => {
                group_index.insert(line_id.clone(), line_changes.len());
                line_changes.push(LineChangeGroup {
                    line_id,
                    variant_name: variant_name(line),
                    is_new: original_line.is_none(),
                    changes: vec![relative],
                });
            }
        }
    }

    ChangeSet {
        line_changes,
        resource_changes,
    }
}

/// `<collection>.<index>.<rest…>` split of a line entry path, where the
/// collection may itself be dotted.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LineLocation<'c> {
    collection: &'c str,
    index: String,
    rest: String,
}

impl<'c> LineLocation<'c> {
    fn parse(path: &str, collection: &'c str) -> Option<Self> {
        let tail = if collection.is_empty() {
            path
        } else {
            path.strip_prefix(collection)?.strip_prefix('.')?
        };
        let (index, rest) = tail.split_once('.').unwrap_or((tail, ""));
        Some(Self {
            collection,
            index: index.to_string(),
            rest: rest.to_string(),
        })
    }

    fn resolve<'a>(&self, snapshot: &'a Value) -> Option<&'a Value> {
        let lines = self
            .collection
            .split('.')
            .filter(|key| !key.is_empty())
            .try_fold(snapshot, |value, key| child(value, key))?;
        child(lines, &self.index)
    }
}

fn id_string(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn variant_name(line: &Value) -> String {
    line.pointer("/productVariant/name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn groups_changes_of_one_line() {
        let original = json!({"lines": [
            {"id": "L1", "qty": 1, "note": "a", "productVariant": {"name": "Blue Tee"}}
        ]});
        let modified = json!({"lines": [
            {"id": "L1", "qty": 2, "note": "b", "productVariant": {"name": "Blue Tee"}}
        ]});
        let set = give_modification_info(&original, &modified, &[]);

        assert!(set.resource_changes.is_empty());
        assert_eq!(set.line_changes.len(), 1);
        let group = &set.line_changes[0];
        assert_eq!(group.line_id, "L1");
        assert_eq!(group.variant_name, "Blue Tee");
        assert!(!group.is_new);
        assert_eq!(
            group.changes,
            vec![
                DiffEntry::primitive("qty", json!(1), json!(2)),
                DiffEntry::primitive("note", json!("a"), json!("b")),
            ]
        );
    }

    #[test]
    fn added_line_is_new() {
        let line = json!({"id": 7, "qty": 1, "productVariant": {"name": "Cap"}});
        let set = give_modification_info(
            &json!({"lines": []}),
            &json!({"lines": [line.clone()]}),
            &[],
        );
        let group = &set.line_changes[0];
        assert_eq!(group.line_id, "7");
        assert!(group.is_new);
        assert_eq!(group.changes, vec![DiffEntry::added("", line)]);
    }

    #[test]
    fn unresolvable_entries_pass_through() {
        let set = give_modification_info(&json!({}), &json!({"lines": [{"id": "L1"}]}), &[]);
        assert!(set.line_changes.is_empty());
        assert_eq!(set.resource_changes.len(), 1);
        assert_eq!(set.resource_changes[0].path, "lines");
    }

    #[test]
    fn missing_variant_name_is_empty() {
        let set = give_modification_info(
            &json!({"lines": [{"id": "L1", "qty": 1}]}),
            &json!({"lines": [{"id": "L1", "qty": 3}]}),
            &[],
        );
        assert_eq!(set.line_changes[0].variant_name, "");
    }

    #[test]
    fn location_parsing() {
        assert_eq!(
            LineLocation::parse("lines.0.productVariant.price", "lines"),
            Some(LineLocation {
                collection: "lines",
                index: "0".to_string(),
                rest: "productVariant.price".to_string(),
            })
        );
        assert_eq!(
            LineLocation::parse("order.lines.2", "order.lines"),
            Some(LineLocation {
                collection: "order.lines",
                index: "2".to_string(),
                rest: String::new(),
            })
        );
        assert_eq!(LineLocation::parse("lines", "lines"), None);
        assert_eq!(LineLocation::parse("linesTotal", "lines"), None);
    }

    #[test]
    fn nested_collection_resolves_lines() {
        let snapshot = json!({"order": {"lines": [{"id": "L1"}]}});
        let location = LineLocation::parse("order.lines.0.qty", "order.lines");
        assert_eq!(
            location.and_then(|location| location.resolve(&snapshot)),
            Some(&json!({"id": "L1"}))
        );
    }
}
