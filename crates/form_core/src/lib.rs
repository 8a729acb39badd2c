//! Candidate form view model: state, reducer, and validation.

pub mod errors;
pub mod reducer;
pub mod state;
pub mod validation;

pub use errors::{document_row_key, ErrorMap, DOCUMENTS_KEY};
pub use reducer::{reduce, DocumentChange, FieldValue, FormAction};
pub use state::FormState;
pub use validation::{age_in_years, is_valid_email, validate_form};

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod reducer_tests;

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod validation_tests;
