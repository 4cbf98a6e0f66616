//! Order-modification review scenarios.

use formkit_diff::{DiffOptions, give_modification_info, modification_info_with_options};
use serde_json::{Value, json};

fn original_order() -> Value {
    json!({
        "id": "o1",
        "code": "ORD-1",
        "updatedAt": "2024-01-01T00:00:00Z",
        "shippingAddress": {"city": "Berlin"},
        "lines": [
            {"id": "L1", "quantity": 1, "productVariant": {"id": "v1", "name": "Blue Tee"}},
            {"id": "L2", "quantity": 3, "productVariant": {"id": "v2", "name": "Red Cap"}}
        ],
        "customFields": {"giftNote": "{\"to\":\"Ann\"}"}
    })
}

fn modified_order() -> Value {
    json!({
        "id": "o1",
        "code": "ORD-1",
        "updatedAt": "2024-02-02T00:00:00Z",
        "shippingAddress": {"city": "Munich"},
        "lines": [
            {"id": "L1", "quantity": 2, "productVariant": {"id": "v1", "name": "Blue Tee"}},
            {"id": "L2", "quantity": 3, "productVariant": {"id": "v2", "name": "Red Cap"}},
            {"id": "L3", "quantity": 1, "productVariant": {"id": "v3", "name": "Green Sock"}}
        ],
        "customFields": {"giftNote": "{\"to\":\"Bob\"}"}
    })
}

#[test]
fn order_modification_change_set() {
    let set = give_modification_info(&original_order(), &modified_order(), &["updatedAt"]);
    insta::assert_json_snapshot!(set, @r#"
    {
      "lineChanges": [
        {
          "lineId": "L1",
          "variantName": "Blue Tee",
          "changes": [
            {
              "path": "quantity",
              "kind": "PrimitiveChange",
              "removed": 1,
              "added": 2
            }
          ]
        },
        {
          "lineId": "L3",
          "variantName": "Green Sock",
          "isNew": true,
          "changes": [
            {
              "path": "",
              "kind": "Added",
              "value": {
                "id": "L3",
                "quantity": 1,
                "productVariant": {
                  "id": "v3",
                  "name": "Green Sock"
                }
              }
            }
          ]
        }
      ],
      "resourceChanges": [
        {
          "path": "shippingAddress.city",
          "kind": "PrimitiveChange",
          "removed": "Berlin",
          "added": "Munich"
        },
        {
          "path": "customFields.giftNote.to",
          "kind": "PrimitiveChange",
          "removed": "Ann",
          "added": "Bob"
        }
      ]
    }
    "#);
}

#[test]
fn unchanged_order_has_empty_change_set() {
    let set = give_modification_info(&original_order(), &original_order(), &[]);
    assert!(set.is_empty());
}

#[test]
fn removed_line_keeps_original_details() {
    let mut modified = original_order();
    modified["lines"]
        .as_array_mut()
        .expect("lines array")
        .truncate(1);
    let set = give_modification_info(&original_order(), &modified, &["updatedAt"]);

    assert_eq!(set.line_changes.len(), 1);
    let group = &set.line_changes[0];
    assert_eq!(group.line_id, "L2");
    assert_eq!(group.variant_name, "Red Cap");
    assert!(!group.is_new);
    assert_eq!(group.changes[0].path, "");
}

#[test]
fn nested_line_changes_share_one_group() {
    let mut modified = original_order();
    modified["lines"][0]["quantity"] = json!(5);
    modified["lines"][0]["productVariant"]["name"] = json!("Navy Tee");
    let set = give_modification_info(&original_order(), &modified, &[]);

    assert_eq!(set.line_changes.len(), 1);
    let paths: Vec<&str> = set.line_changes[0]
        .changes
        .iter()
        .map(|entry| entry.path.as_str())
        .collect();
    assert_eq!(paths, vec!["quantity", "productVariant.name"]);
    assert_eq!(set.line_changes[0].variant_name, "Blue Tee");
}

#[test]
fn options_change_the_line_collection() {
    let original = json!({"items": [{"id": "i1", "qty": 1}]});
    let modified = json!({"items": [{"id": "i1", "qty": 4}]});
    let options = DiffOptions::new().with_line_collection("items");
    let set = modification_info_with_options(&original, &modified, &options);

    assert_eq!(set.line_changes[0].line_id, "i1");
    assert!(set.resource_changes.is_empty());
}

#[test]
fn nested_line_collection_is_grouped() {
    let original = json!({"order": {"lines": [{"id": "L1", "qty": 1}], "note": "a"}});
    let modified = json!({"order": {"lines": [{"id": "L1", "qty": 2}], "note": "b"}});
    let options = DiffOptions::new().with_line_collection("order.lines");
    let set = modification_info_with_options(&original, &modified, &options);

    assert_eq!(set.line_changes.len(), 1);
    let group = &set.line_changes[0];
    assert_eq!(group.line_id, "L1");
    assert_eq!(group.changes[0].path, "qty");
    assert_eq!(set.resource_changes.len(), 1);
    assert_eq!(set.resource_changes[0].path, "order.note");
}
