//! Relation rewrite rules.
//!
//! Server entities embed related records (`featuredAsset: { id, ... }`)
//! while form fields hold flat references (`featuredAssetId`). Each rule in
//! the table rewrites one relation key into its reference form. Rules run in
//! table order and only fire when their source key is present.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a relation value is reduced to a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationShape {
    /// Array of related objects to an array of their `id`s.
    IdList,
    /// One related object to its `id`.
    SingleId,
    /// One related object to its `code`.
    SingleCode,
    /// `user.roles` to role ids; only for administrator-shaped entities.
    UserRoles,
}

/// One `(source_key, target_key, shape)` row of the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationRule {
    pub source_key: String,
    pub target_key: String,
    pub shape: RelationShape,
}

/// Keys that must sit next to `user` for the role rule to fire.
const ADMINISTRATOR_KEYS: [&str; 3] = ["emailAddress", "firstName", "lastName"];

const BUILTIN_RULES: &[(&str, &str, RelationShape)] = &[
    ("assets", "assetIds", RelationShape::IdList),
    ("facetValues", "facetValueIds", RelationShape::IdList),
    ("featuredAsset", "featuredAssetId", RelationShape::SingleId),
    ("members", "memberIds", RelationShape::IdList),
    ("category", "categoryId", RelationShape::SingleId),
    ("customerGroup", "customerGroupId", RelationShape::SingleId),
    ("zone", "zoneId", RelationShape::SingleId),
    ("defaultShippingZone", "defaultShippingZoneId", RelationShape::SingleId),
    ("defaultTaxZone", "defaultTaxZoneId", RelationShape::SingleId),
    ("seller", "sellerId", RelationShape::SingleId),
    ("channels", "channelIds", RelationShape::IdList),
    ("user", "roleIds", RelationShape::UserRoles),
    ("fulfillmentHandler", "fulfillmentHandlerCode", RelationShape::SingleCode),
];

impl NormalizationRule {
    pub fn new(
        source_key: impl Into<String>,
        target_key: impl Into<String>,
        shape: RelationShape,
    ) -> Self {
        Self {
            source_key: source_key.into(),
            target_key: target_key.into(),
            shape,
        }
    }

    /// The built-in table, in application order.
    pub fn builtin() -> Vec<Self> {
        BUILTIN_RULES
            .iter()
            .map(|&(source, target, shape)| Self::new(source, target, shape))
            .collect()
    }

    /// Apply the rule in place. Returns whether it fired.
    pub fn apply(&self, entity: &mut Map<String, Value>) -> bool {
        match self.shape {
            RelationShape::UserRoles => self.apply_user_roles(entity),
            shape => {
                let Some(source) = entity.shift_remove(&self.source_key) else {
                    return false;
                };
                let target = match shape {
                    RelationShape::IdList => id_list(&source),
                    RelationShape::SingleCode => property(&source, "code"),
                    _ => property(&source, "id"),
                };
                entity.insert(self.target_key.clone(), target);
                true
            }
        }
    }

    fn apply_user_roles(&self, entity: &mut Map<String, Value>) -> bool {
        let has_roles = entity
            .get(&self.source_key)
            .and_then(|user| user.get("roles"))
            .is_some();
        if !has_roles || !ADMINISTRATOR_KEYS.iter().all(|key| entity.contains_key(*key)) {
            return false;
        }
        let roles = entity
            .shift_remove(&self.source_key)
            .and_then(|mut user| user.get_mut("roles").map(Value::take))
            .unwrap_or(Value::Null);
        entity.insert(self.target_key.clone(), id_list(&roles));
        entity.insert("password".to_string(), Value::String(String::new()));
        true
    }
}

fn property(value: &Value, key: &str) -> Value {
    value.get(key).cloned().unwrap_or(Value::Null)
}

fn id_list(value: &Value) -> Value {
    match value {
        Value::Array(items) => items.iter().map(|item| property(item, "id")).collect(),
        _ => Value::Null,
    }
}

/// Applies an ordered rule table to entity snapshots.
#[derive(Debug, Clone)]
pub struct EntityNormalizer {
    rules: Vec<NormalizationRule>,
    disabled: BTreeSet<String>,
}

impl Default for EntityNormalizer {
    fn default() -> Self {
        Self::new(NormalizationRule::builtin())
    }
}

impl EntityNormalizer {
    pub fn new(rules: Vec<NormalizationRule>) -> Self {
        Self {
            rules,
            disabled: BTreeSet::new(),
        }
    }

    /// Append a rule after the existing ones.
    #[must_use]
    pub fn with_rule(mut self, rule: NormalizationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Disable every rule reading `source_key`.
    pub fn disable_rule(&mut self, source_key: &str) {
        self.disabled.insert(source_key.to_string());
    }

    /// Enable a previously disabled source key.
    pub fn enable_rule(&mut self, source_key: &str) {
        self.disabled.remove(source_key);
    }

    pub fn is_rule_disabled(&self, source_key: &str) -> bool {
        self.disabled.contains(source_key)
    }

    pub fn rules(&self) -> &[NormalizationRule] {
        &self.rules
    }

    /// Return a normalized copy of `entity`.
    ///
    /// Non-object values are returned unchanged.
    pub fn normalize(&self, entity: &Value) -> Value {
        let Some(object) = entity.as_object() else {
            return entity.clone();
        };
        let mut normalized = object.clone();
        for rule in &self.rules {
            if self.is_rule_disabled(&rule.source_key) {
                continue;
            }
            if rule.apply(&mut normalized) {
                tracing::trace!(
                    source = %rule.source_key,
                    target = %rule.target_key,
                    "Applied normalization rule"
                );
            }
        }
        Value::Object(normalized)
    }
}

/// Normalize with the built-in rule table.
pub fn normalize_entity(entity: &Value) -> Value {
    EntityNormalizer::default().normalize(entity)
}
