//! Wallpaper records: the only entity persisted in the gallery.

pub mod entity;
pub mod id;
pub mod image_data;
pub mod invariants;

pub use entity::{format_timestamp, WallpaperRecord};
pub use id::RecordIdGenerator;
pub use invariants::{validate_prompt, validate_wallpaper};
