// src/application/commands/wallpaper_commands.rs
//
// Wallpaper Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs
// - Never contain business logic

use std::path::PathBuf;

use crate::application::{
    commands::account_commands::effective_pro,
    dto::{ExportResultDto, GenerationResultDto, WallpaperDto},
    error_handling::ErrorResponse,
    state::AppState,
};
use crate::domain::select_model;
use crate::services::{Generation, GenerationError, GenerationSettings, GenerationStage};

/// List the gallery, newest first
pub async fn list_wallpapers(state: &AppState) -> Result<Vec<WallpaperDto>, ErrorResponse> {
    let records = state.wallpaper_store.list().await;
    Ok(records.into_iter().map(WallpaperDto::from).collect())
}

/// Get a single wallpaper by ID
pub async fn get_wallpaper(
    wallpaper_id: String,
    state: &AppState,
) -> Result<Option<WallpaperDto>, ErrorResponse> {
    let record = state.wallpaper_store.get(&wallpaper_id).await;
    Ok(record.map(WallpaperDto::from))
}

/// Generate a new wallpaper from a prompt
pub async fn generate_wallpaper(
    prompt: String,
    state: &AppState,
) -> Result<GenerationResultDto, ErrorResponse> {
    let settings = generation_settings(state).await?;
    let outcome = state.generation_service.generate(&prompt, settings).await;
    into_result_dto(outcome, settings)
}

/// Derive a new wallpaper from an existing one
pub async fn edit_wallpaper(
    wallpaper_id: String,
    instructions: String,
    state: &AppState,
) -> Result<GenerationResultDto, ErrorResponse> {
    let settings = generation_settings(state).await?;
    let outcome = state
        .generation_service
        .edit_by_id(&wallpaper_id, &instructions, settings)
        .await;
    into_result_dto(outcome, settings)
}

/// Delete a wallpaper; returns whether anything was removed
pub async fn delete_wallpaper(
    wallpaper_id: String,
    state: &AppState,
) -> Result<bool, ErrorResponse> {
    Ok(state.wallpaper_store.delete(&wallpaper_id).await?)
}

/// Write a wallpaper's image to disk (default export directory when `directory` is None)
pub async fn export_wallpaper(
    wallpaper_id: String,
    directory: Option<String>,
    state: &AppState,
) -> Result<ExportResultDto, ErrorResponse> {
    let record = state
        .wallpaper_store
        .get(&wallpaper_id)
        .await
        .ok_or_else(|| ErrorResponse::not_found("Wallpaper"))?;

    let directory = directory
        .map(PathBuf::from)
        .unwrap_or_else(|| state.export_dir.clone());

    let path = state.export_service.export(&record, &directory).await?;
    Ok(ExportResultDto {
        path: path.display().to_string(),
    })
}

async fn generation_settings(state: &AppState) -> Result<GenerationSettings, ErrorResponse> {
    Ok(GenerationSettings {
        model: state.settings_service.get().await.image_model,
        is_pro: effective_pro(state).await?,
    })
}

fn into_result_dto(
    outcome: Result<Generation, GenerationError>,
    settings: GenerationSettings,
) -> Result<GenerationResultDto, ErrorResponse> {
    match outcome {
        Ok(Generation { record, model }) => Ok(GenerationResultDto {
            wallpaper: record.into(),
            saved: true,
            model: model.key().to_string(),
            warning: None,
        }),
        Err(GenerationError {
            stage: GenerationStage::Committing,
            source,
            unsaved: Some(record),
        }) => Ok(GenerationResultDto {
            wallpaper: record.into(),
            saved: false,
            model: select_model(settings.model, settings.is_pro).0.key().to_string(),
            warning: Some(format!("Wallpaper generated but could not be saved: {}", source)),
        }),
        Err(error) => Err(error.into()),
    }
}
