// src/application/state.rs

use std::path::PathBuf;
use std::sync::Arc;

use crate::events::EventBus;
use crate::integrations::EntitlementProvider;
use crate::services::{ExportService, GenerationService, SettingsService, WallpaperStore};

/// Application state shared by every command surface (Tauri, CLI).
/// All fields are Arc-wrapped for thread-safe sharing across commands.
/// Services are wired in `app::bootstrap` and passed here.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub wallpaper_store: Arc<WallpaperStore>,
    pub generation_service: Arc<GenerationService>,
    pub settings_service: Arc<SettingsService>,
    pub export_service: Arc<ExportService>,
    pub entitlement: Arc<dyn EntitlementProvider>,
    /// Default export target
    pub export_dir: PathBuf,
}
