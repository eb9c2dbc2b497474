// src/main.rs
//
// Desktop/mobile shell (built with `--features desktop`)

#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use pragmatic::app::{build_app_state, init_logging};
use pragmatic::application::desktop::*;
use pragmatic::config::AppConfig;
use pragmatic::events::{SettingsChanged, WallpaperDeleted, WallpaperSaved};
use pragmatic::AppState;
use tauri::{Emitter, Manager};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. LOGGING & CONFIGURATION
    init_logging();
    let config = AppConfig::from_env()?;

    // 2. APPLICATION STATE
    let runtime = tokio::runtime::Runtime::new()?;
    let app_state = runtime.block_on(build_app_state(&config))?;
    tauri::async_runtime::set(runtime.handle().clone());

    // 3. TAURI BOOTSTRAP
    tauri::Builder::default()
        .manage(app_state)
        .setup(|app| {
            // 4. EVENT FORWARDING (bus → webview)
            let bus = app.state::<AppState>().event_bus.clone();

            let handle = app.handle().clone();
            bus.subscribe(move |event: &WallpaperSaved| {
                if let Err(e) = handle.emit("wallpaper-saved", event) {
                    log::warn!("Failed to forward WallpaperSaved: {}", e);
                }
            });

            let handle = app.handle().clone();
            bus.subscribe(move |event: &WallpaperDeleted| {
                if let Err(e) = handle.emit("wallpaper-deleted", event) {
                    log::warn!("Failed to forward WallpaperDeleted: {}", e);
                }
            });

            let handle = app.handle().clone();
            bus.subscribe(move |event: &SettingsChanged| {
                if let Err(e) = handle.emit("settings-changed", event) {
                    log::warn!("Failed to forward SettingsChanged: {}", e);
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            list_wallpapers,
            get_wallpaper,
            generate_wallpaper,
            edit_wallpaper,
            delete_wallpaper,
            export_wallpaper,
            get_settings,
            update_settings,
            reset_settings,
            list_models,
            get_entitlement,
            upgrade_to_pro,
            downgrade_from_pro,
        ])
        .run(tauri::generate_context!())?;

    Ok(())
}
