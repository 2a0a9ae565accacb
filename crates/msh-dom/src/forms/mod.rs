//! Form Elements Module
//!
//! Engine views for `<form>` and `<textarea>` plus the live collection of
//! a form's listed controls.

mod form;
mod textarea;
mod controls;

pub use form::{FormMethod, FormEnctype};
pub use controls::FormControls;
pub use textarea::{DEFAULT_ROWS, DEFAULT_COLS};

/// Elements that appear in a form's `elements` collection
pub const LISTED_ELEMENTS: &[&str] = &[
    "button", "fieldset", "input", "object", "output", "select", "textarea",
];

/// Check whether a local name is a listed form control
pub fn is_listed(local_name: &str) -> bool {
    LISTED_ELEMENTS.contains(&local_name)
}
