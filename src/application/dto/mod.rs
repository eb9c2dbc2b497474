// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::{AppSettings, ImageModel, ModelParams, WallpaperRecord};

// ============================================================================
// WALLPAPER DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallpaperDto {
    pub id: String,
    pub prompt: String,
    pub image_url: String,
    pub created_at: String,
}

impl From<WallpaperRecord> for WallpaperDto {
    fn from(record: WallpaperRecord) -> Self {
        Self {
            id: record.id().to_string(),
            prompt: record.prompt().to_string(),
            image_url: record.image_data().to_string(),
            created_at: record.created_at().to_string(),
        }
    }
}

/// Outcome of a generate or edit request.
///
/// `saved == false` means the image was produced but could not be stored;
/// the UI may still show or export it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResultDto {
    pub wallpaper: WallpaperDto,
    pub saved: bool,
    /// Model that actually produced the image
    pub model: String,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResultDto {
    pub path: String,
}

// ============================================================================
// SETTINGS DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    pub image_model: String,
    pub color_theme: String,
    pub is_pro: bool,
}

impl From<AppSettings> for SettingsDto {
    fn from(settings: AppSettings) -> Self {
        Self {
            image_model: settings.image_model.key().to_string(),
            color_theme: settings.color_theme.key().to_string(),
            is_pro: settings.is_pro,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsDto {
    pub image_model: Option<String>,
    pub color_theme: Option<String>,
}

// ============================================================================
// MODEL & ACCOUNT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOptionDto {
    pub key: String,
    pub label: String,
    pub description: String,
    pub hosted_model_id: String,
    pub width: u32,
    pub height: u32,
    pub premium: bool,
    /// False when the model needs Pro and the user does not have it
    pub available: bool,
}

impl ModelOptionDto {
    pub fn new(model: ImageModel, is_pro: bool) -> Self {
        let params = ModelParams::for_model(model);
        Self {
            key: model.key().to_string(),
            label: model.label().to_string(),
            description: model.description().to_string(),
            hosted_model_id: params.model_id.to_string(),
            width: params.width,
            height: params.height,
            premium: model.is_premium(),
            available: is_pro || !model.is_premium(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementDto {
    pub is_pro: bool,
}
