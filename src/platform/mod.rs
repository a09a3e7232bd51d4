// LabelDesk - platform/mod.rs
//
// Platform abstraction layer: configuration files, the HTTP client for the
// classifier API, and image decoding.
// Dependencies: util, core, reqwest, directories, toml, image.
// Must NOT depend on: app, ui.

pub mod api;
pub mod config;
pub mod thumbnail;
