// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod export_service;
pub mod generation_service;
pub mod settings_service;
pub mod wallpaper_store;

pub use export_service::ExportService;

pub use generation_service::{
    combine_edit_prompt,
    Generation,
    GenerationError,
    GenerationService,
    GenerationSettings,
    GenerationStage,
    EDIT_PROMPT_SEPARATOR,
};

pub use settings_service::{SettingsService, SETTINGS_STORAGE_KEY};

pub use wallpaper_store::{WallpaperStore, WALLPAPERS_STORAGE_KEY};
