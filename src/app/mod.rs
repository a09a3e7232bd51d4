// LabelDesk - app/mod.rs
//
// Application layer: review workflow state, background request dispatch,
// log console polling.
// Dependencies: core layer, platform (ReviewApi trait, thumbnail decoding).
// Must NOT depend on: ui.

pub mod log_poll;
pub mod requests;
pub mod state;
