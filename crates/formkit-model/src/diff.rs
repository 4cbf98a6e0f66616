//! Structural difference types.
//!
//! These types describe what changed between two entity snapshots. They are
//! purely descriptive: a review panel renders them, nothing recomputes
//! values from them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a single detected difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffKind {
    Added,
    Removed,
    PrimitiveChange,
    #[serde(rename = "PrimitiveJSONChange")]
    PrimitiveJsonChange,
}

impl DiffKind {
    /// Label used in serialized output and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Removed => "Removed",
            Self::PrimitiveChange => "PrimitiveChange",
            Self::PrimitiveJsonChange => "PrimitiveJSONChange",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payload of a difference, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Change {
    /// Key present only in the modified structure.
    Added { value: Value },
    /// Key present only in the original structure.
    Removed { value: Value },
    /// Scalar value replaced by another.
    PrimitiveChange { removed: Value, added: Value },
    /// Only one side holds a string that parses as structured data.
    #[serde(rename = "PrimitiveJSONChange")]
    PrimitiveJsonChange { removed: Value, added: Value },
}

impl Change {
    pub fn kind(&self) -> DiffKind {
        match self {
            Self::Added { .. } => DiffKind::Added,
            Self::Removed { .. } => DiffKind::Removed,
            Self::PrimitiveChange { .. } => DiffKind::PrimitiveChange,
            Self::PrimitiveJsonChange { .. } => DiffKind::PrimitiveJsonChange,
        }
    }

    /// Value on the original side, if any.
    pub fn before(&self) -> Option<&Value> {
        match self {
            Self::Added { .. } => None,
            Self::Removed { value } => Some(value),
            Self::PrimitiveChange { removed, .. } | Self::PrimitiveJsonChange { removed, .. } => {
                Some(removed)
            }
        }
    }

    /// Value on the modified side, if any.
    pub fn after(&self) -> Option<&Value> {
        match self {
            Self::Added { value } => Some(value),
            Self::Removed { .. } => None,
            Self::PrimitiveChange { added, .. } | Self::PrimitiveJsonChange { added, .. } => {
                Some(added)
            }
        }
    }
}

/// One atomic difference, located by a dotted path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    /// Dotted path from the diff root, e.g. `lines.0.quantity`.
    pub path: String,
    #[serde(flatten)]
    pub change: Change,
}

impl DiffEntry {
    pub fn new(path: impl Into<String>, change: Change) -> Self {
        Self {
            path: path.into(),
            change,
        }
    }

    pub fn added(path: impl Into<String>, value: Value) -> Self {
        Self::new(path, Change::Added { value })
    }

    pub fn removed(path: impl Into<String>, value: Value) -> Self {
        Self::new(path, Change::Removed { value })
    }

    pub fn primitive(path: impl Into<String>, removed: Value, added: Value) -> Self {
        Self::new(path, Change::PrimitiveChange { removed, added })
    }

    pub fn primitive_json(path: impl Into<String>, removed: Value, added: Value) -> Self {
        Self::new(path, Change::PrimitiveJsonChange { removed, added })
    }

    #[inline]
    pub fn kind(&self) -> DiffKind {
        self.change.kind()
    }

    /// Same change, relocated to another path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

/// Raw diff output, split by routing prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffOutcome {
    /// Entries under the order-line collection.
    pub lines_changes: Vec<DiffEntry>,
    /// Every other entry.
    pub res_changes: Vec<DiffEntry>,
}

impl DiffOutcome {
    pub fn is_empty(&self) -> bool {
        self.lines_changes.is_empty() && self.res_changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines_changes.len() + self.res_changes.len()
    }

    /// All entries, line entries first.
    pub fn entries(&self) -> impl Iterator<Item = &DiffEntry> {
        self.lines_changes.iter().chain(self.res_changes.iter())
    }
}

/// Changes to a single order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChangeGroup {
    pub line_id: String,
    /// Display name of the line's product variant.
    pub variant_name: String,
    /// Set when the line does not exist in the original snapshot.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_new: bool,
    /// Entries with paths relative to the line.
    pub changes: Vec<DiffEntry>,
}

/// Grouped diff presented to a reviewer before committing a modification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub line_changes: Vec<LineChangeGroup>,
    pub resource_changes: Vec<DiffEntry>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.line_changes.is_empty() && self.resource_changes.is_empty()
    }

    /// Number of individual entries across all groups.
    pub fn change_count(&self) -> usize {
        self.line_changes
            .iter()
            .map(|group| group.changes.len())
            .sum::<usize>()
            + self.resource_changes.len()
    }
}
