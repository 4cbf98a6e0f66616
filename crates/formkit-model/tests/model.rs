//! Tests for formkit-model types.

use formkit_model::json::{is_blank, type_name};
use formkit_model::{ChangeSet, DiffEntry, DiffOutcome, FormError, FormField, FormState};
use serde_json::json;

#[test]
fn diff_outcome_entries_list_lines_first() {
    let outcome = DiffOutcome {
        lines_changes: vec![DiffEntry::primitive("lines.0.qty", json!(1), json!(2))],
        res_changes: vec![
            DiffEntry::added("code", json!("X")),
            DiffEntry::removed("note", json!("n")),
        ],
    };

    assert_eq!(outcome.len(), 3);
    let paths: Vec<&str> = outcome.entries().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["lines.0.qty", "code", "note"]);
}

#[test]
fn change_set_round_trips_through_json() {
    let json = json!({
        "lineChanges": [{
            "lineId": "L1",
            "variantName": "Blue Tee",
            "isNew": true,
            "changes": [{"path": "quantity", "kind": "Added", "value": 2}]
        }],
        "resourceChanges": [
            {"path": "customFields.note", "kind": "PrimitiveJSONChange", "removed": "x", "added": "{}"}
        ]
    });
    let set: ChangeSet = serde_json::from_value(json.clone()).expect("deserialize change set");
    assert!(set.line_changes[0].is_new);
    assert_eq!(set.change_count(), 2);
    assert_eq!(serde_json::to_value(&set).expect("serialize change set"), json);
}

#[test]
fn form_state_tracks_invalid_fields() {
    let mut state = FormState::new();
    state.insert("name", FormField::valid(json!("A")));
    state.insert(
        "code",
        FormField::new(json!(""), vec!["Code is required".to_string()], None),
    );

    assert_eq!(state.invalid_fields(), vec!["code"]);
    assert!(state.contains("name"));
    assert_eq!(state.names().collect::<Vec<_>>(), vec!["code", "name"]);
}

#[test]
fn blank_values() {
    assert!(is_blank(&json!(null)));
    assert!(is_blank(&json!("")));
    assert!(!is_blank(&json!(" ")));
    assert!(!is_blank(&json!(false)));
    assert!(!is_blank(&json!([])));
    assert_eq!(type_name(&json!({})), "object");
}

#[test]
fn error_messages() {
    let err = FormError::UnknownField {
        name: "slug".to_string(),
    };
    assert_eq!(err.to_string(), "field 'slug' is not registered");
}
