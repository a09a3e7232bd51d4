// LabelDesk - ui/panels/mod.rs

pub mod confirm;
pub mod console;
pub mod notice;
pub mod queue;
pub mod stats;
pub mod status;
pub mod toolbar;
