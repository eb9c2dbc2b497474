// src/application/desktop.rs
//
// Tauri bindings for the command handlers (desktop/mobile shell only)
//
// Each binding unwraps Tauri's managed state and delegates; argument names
// are what the webview passes (camelCase on the JS side).

use tauri::State;

use crate::application::{commands, dto::*, error_handling::ErrorResponse, state::AppState};

type CommandResult<T> = Result<T, ErrorResponse>;

#[tauri::command]
pub async fn list_wallpapers(state: State<'_, AppState>) -> CommandResult<Vec<WallpaperDto>> {
    commands::list_wallpapers(&state).await
}

#[tauri::command]
pub async fn get_wallpaper(
    wallpaper_id: String,
    state: State<'_, AppState>,
) -> CommandResult<Option<WallpaperDto>> {
    commands::get_wallpaper(wallpaper_id, &state).await
}

#[tauri::command]
pub async fn generate_wallpaper(
    prompt: String,
    state: State<'_, AppState>,
) -> CommandResult<GenerationResultDto> {
    commands::generate_wallpaper(prompt, &state).await
}

#[tauri::command]
pub async fn edit_wallpaper(
    wallpaper_id: String,
    instructions: String,
    state: State<'_, AppState>,
) -> CommandResult<GenerationResultDto> {
    commands::edit_wallpaper(wallpaper_id, instructions, &state).await
}

#[tauri::command]
pub async fn delete_wallpaper(
    wallpaper_id: String,
    state: State<'_, AppState>,
) -> CommandResult<bool> {
    commands::delete_wallpaper(wallpaper_id, &state).await
}

#[tauri::command]
pub async fn export_wallpaper(
    wallpaper_id: String,
    directory: Option<String>,
    state: State<'_, AppState>,
) -> CommandResult<ExportResultDto> {
    commands::export_wallpaper(wallpaper_id, directory, &state).await
}

#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> CommandResult<SettingsDto> {
    commands::get_settings(&state).await
}

#[tauri::command]
pub async fn update_settings(
    dto: UpdateSettingsDto,
    state: State<'_, AppState>,
) -> CommandResult<SettingsDto> {
    commands::update_settings(dto, &state).await
}

#[tauri::command]
pub async fn reset_settings(state: State<'_, AppState>) -> CommandResult<SettingsDto> {
    commands::reset_settings(&state).await
}

#[tauri::command]
pub async fn list_models(state: State<'_, AppState>) -> CommandResult<Vec<ModelOptionDto>> {
    commands::list_models(&state).await
}

#[tauri::command]
pub async fn get_entitlement(state: State<'_, AppState>) -> CommandResult<EntitlementDto> {
    commands::get_entitlement(&state).await
}

#[tauri::command]
pub async fn upgrade_to_pro(state: State<'_, AppState>) -> CommandResult<EntitlementDto> {
    commands::upgrade_to_pro(&state).await
}

#[tauri::command]
pub async fn downgrade_from_pro(state: State<'_, AppState>) -> CommandResult<EntitlementDto> {
    commands::downgrade_from_pro(&state).await
}
