// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept DTOs, return DTOs
// - Commands handle error conversion for the UI
// - Commands NEVER contain business logic
//
// Handlers take `&AppState` so every surface can call them; the Tauri
// bindings live in `application::desktop`.

pub mod account_commands;
pub mod settings_commands;
pub mod wallpaper_commands;

pub use account_commands::*;
pub use settings_commands::*;
pub use wallpaper_commands::*;
