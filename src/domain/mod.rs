// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod model_selection;
pub mod settings;
pub mod wallpaper;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Wallpaper Domain
pub use wallpaper::{
    format_timestamp, validate_prompt, validate_wallpaper, RecordIdGenerator, WallpaperRecord,
};

// Settings Domain
pub use settings::{AppSettings, ColorTheme, ImageModel, SettingsUpdate};

// Model policy
pub use model_selection::{select_model, ModelParams, FALLBACK_MODEL, QUALITY_PROMPT_SUFFIX};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Duplicate wallpaper id: {0}")]
    DuplicateId(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
