//! Bridge between the egui thread and the async submission worker.

pub mod commands;
pub mod runtime;
