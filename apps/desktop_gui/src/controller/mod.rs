//! Controller layer: UI events and command orchestration. State transitions live in `form_core`.

pub mod events;
pub mod orchestration;
