//! Structural diff of entity snapshots.
//!
//! [`give_objects_difference`] walks two JSON structures and reports every
//! added, removed and changed leaf as a [`DiffEntry`](formkit_model::DiffEntry).
//! Strings holding JSON objects or arrays are parsed and walked as nested
//! values (see [`maybe_parse`]). [`give_modification_info`] regroups the
//! entries of an order diff by order line for a review panel.
//!
//! # Example
//!
//! ```
//! use formkit_diff::give_objects_difference;
//! use serde_json::json;
//!
//! let outcome = give_objects_difference(
//!     &json!({"lines": [{"id": "L1", "qty": 1}]}),
//!     &json!({"lines": [{"id": "L1", "qty": 2}]}),
//!     &[],
//!     "",
//! );
//! assert_eq!(outcome.lines_changes[0].path, "lines.0.qty");
//! assert!(outcome.res_changes.is_empty());
//! ```

mod classify;
mod engine;
mod parse;

pub use classify::{classify, give_modification_info, modification_info_with_options};
pub use engine::{DEFAULT_LINE_COLLECTION, DiffOptions, diff_with_options, give_objects_difference};
pub use parse::maybe_parse;
