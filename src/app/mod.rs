// src/app/mod.rs
//
// Application wiring shared by the desktop shell and the CLI

pub mod bootstrap;

pub use bootstrap::{build_app_state, build_app_state_with_storage, init_logging, open_storage};
