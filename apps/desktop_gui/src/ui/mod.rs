//! UI layer for the candidate form: app shell and form page.

pub mod app;
pub mod form;

pub use app::CandidateFormApp;
