// src/lib.rs
// Pragmatic - AI wallpaper generator with a local gallery
//
// Architecture:
// - Domain-centric: records, settings and model policy live in `domain`
// - Event-driven: services announce changes on the event bus
// - Explicit: settings and entitlement are passed in, never read implicitly
// - Local-first: the gallery is stored on the device
// - Application Layer: UI boundary (Tauri shell, CLI)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod app;
pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    select_model,
    validate_prompt,
    validate_wallpaper,
    AppSettings,
    ColorTheme,
    ImageModel,
    ModelParams,
    RecordIdGenerator,
    SettingsUpdate,
    WallpaperRecord,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EntitlementChanged,
    EventBus,
    EventLogEntry,
    GenerationFailed,
    SettingsChanged,
    WallpaperDeleted,
    WallpaperSaved,
};

// ============================================================================
// PUBLIC API - Storage
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

pub use repositories::{KeyValueStorage, MemoryKeyValueStorage, SqliteKeyValueStorage};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    ExportService,
    Generation,
    GenerationError,
    GenerationService,
    GenerationSettings,
    GenerationStage,
    SettingsService,
    WallpaperStore,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;
pub use config::AppConfig;

pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{EntitlementProvider, HuggingFaceClient, ImageGenerator, StoredEntitlement};
