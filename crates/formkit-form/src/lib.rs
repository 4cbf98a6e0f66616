//! Form field lifecycle container.
//!
//! A [`FormController`] owns the fields of one form. Fields are registered
//! with an optional [`Validator`] and initial value, then updated one at a
//! time with [`FormController::set_field`] or hydrated in bulk from an entity
//! snapshot with [`FormController::set_state`].
//!
//! # Example
//!
//! ```
//! use formkit_form::{FormController, validator};
//! use serde_json::json;
//!
//! let mut form = FormController::new()
//!     .with_field("name", Some(validator::required("Name is required")), None)
//!     .with_field("enabled", None, Some(json!(true)));
//!
//! assert!(!form.check_if_all_fields_are_valid());
//! form.set_field("name", json!("Blue Tee")).unwrap();
//! assert!(form.check_if_all_fields_are_valid());
//! ```

mod controller;
pub mod validator;

pub use controller::FormController;
pub use validator::Validator;
