// LabelDesk - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, serde, serde_json, tracing.
// Must NOT depend on: ui, platform, app, or any I/O crate directly.

pub mod console;
pub mod format;
pub mod model;
pub mod notice;
pub mod queue;
