// src/application/commands/settings_commands.rs
//
// Settings Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs
// - Never contain business logic

use crate::application::{
    commands::account_commands::effective_pro,
    dto::{ModelOptionDto, SettingsDto, UpdateSettingsDto},
    error_handling::ErrorResponse,
    state::AppState,
};
use crate::domain::{ColorTheme, ImageModel, SettingsUpdate};

/// Current settings
pub async fn get_settings(state: &AppState) -> Result<SettingsDto, ErrorResponse> {
    Ok(state.settings_service.get().await.into())
}

/// Change the preferred model and/or theme
pub async fn update_settings(
    dto: UpdateSettingsDto,
    state: &AppState,
) -> Result<SettingsDto, ErrorResponse> {
    let image_model = dto
        .image_model
        .map(|key| key.parse::<ImageModel>())
        .transpose()
        .map_err(ErrorResponse::validation)?;

    let color_theme = dto
        .color_theme
        .map(|key| key.parse::<ColorTheme>())
        .transpose()
        .map_err(ErrorResponse::validation)?;

    let update = SettingsUpdate {
        image_model,
        color_theme,
        is_pro: None,
    };

    let settings = state.settings_service.update(update).await?;
    Ok(settings.into())
}

/// Restore default settings
pub async fn reset_settings(state: &AppState) -> Result<SettingsDto, ErrorResponse> {
    Ok(state.settings_service.reset().await?.into())
}

/// Models offered in the settings screen, marked with availability
pub async fn list_models(state: &AppState) -> Result<Vec<ModelOptionDto>, ErrorResponse> {
    let is_pro = effective_pro(state).await?;
    Ok(ImageModel::ALL
        .into_iter()
        .map(|model| ModelOptionDto::new(model, is_pro))
        .collect())
}
