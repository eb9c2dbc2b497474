// src/app/bootstrap.rs
//
// Wiring - builds the object graph behind `AppState`
//
// Order:
// 1. INFRASTRUCTURE (storage, event bus, HTTP clients)
// 2. SERVICES
// 3. STARTUP LOADS (gallery, settings) - failures are logged, never fatal

use std::sync::Arc;

use crate::application::AppState;
use crate::config::AppConfig;
use crate::db::{
    create_connection_pool, get_connection, get_database_path, initialize_database,
    verify_database_integrity,
};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::integrations::{EntitlementProvider, HuggingFaceClient, ImageGenerator, StoredEntitlement};
use crate::repositories::{KeyValueStorage, SqliteKeyValueStorage};
use crate::services::{ExportService, GenerationService, SettingsService, WallpaperStore};

/// Install the global log subscriber (`RUST_LOG` filter, default `info`).
///
/// `log` records from the library are bridged into the subscriber.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pragmatic=info,warn".into());

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Open the SQLite-backed key-value storage under the configured data dir.
pub fn open_storage(config: &AppConfig) -> AppResult<Arc<dyn KeyValueStorage>> {
    let db_path = get_database_path(&config.data_dir)?;
    log::info!("Using database at {}", db_path.display());

    let pool = Arc::new(create_connection_pool(&db_path)?);
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
    }

    Ok(Arc::new(SqliteKeyValueStorage::new(pool)))
}

/// Build the full application state on the on-disk database.
pub async fn build_app_state(config: &AppConfig) -> AppResult<AppState> {
    let storage = open_storage(config)?;
    build_app_state_with_storage(config, storage).await
}

/// Build the application state over an already opened storage.
pub async fn build_app_state_with_storage(
    config: &AppConfig,
    storage: Arc<dyn KeyValueStorage>,
) -> AppResult<AppState> {
    // 1. INFRASTRUCTURE
    let event_bus = Arc::new(EventBus::new());
    let generator: Arc<dyn ImageGenerator> = Arc::new(HuggingFaceClient::new(
        config.huggingface_api_key.clone(),
        config.huggingface_base_url.clone(),
        config.http_timeout,
    )?);
    if config.huggingface_api_key.is_none() {
        log::warn!("HUGGINGFACE_API_KEY is not set; generation requests will fail");
    }

    // 2. SERVICES
    let wallpaper_store = Arc::new(WallpaperStore::new(storage.clone(), event_bus.clone()));
    let generation_service = Arc::new(GenerationService::new(
        generator,
        wallpaper_store.clone(),
        event_bus.clone(),
    ));
    let settings_service = Arc::new(SettingsService::new(storage.clone(), event_bus.clone()));
    let export_service = Arc::new(ExportService::new(config.http_timeout)?);
    let entitlement: Arc<dyn EntitlementProvider> =
        Arc::new(StoredEntitlement::new(storage, event_bus.clone()));

    // 3. STARTUP LOADS
    if let Err(e) = wallpaper_store.load().await {
        log::error!("Gallery unavailable, starting empty: {}", e);
    }
    if let Err(e) = settings_service.load().await {
        log::error!("Settings unavailable, using defaults: {}", e);
    }

    Ok(AppState {
        event_bus,
        wallpaper_store,
        generation_service,
        settings_service,
        export_service,
        entitlement,
        export_dir: config.export_dir.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ImageModel, WallpaperRecord};
    use crate::repositories::MemoryKeyValueStorage;
    use crate::services::{SETTINGS_STORAGE_KEY, WALLPAPERS_STORAGE_KEY};
    use std::time::Duration;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> AppConfig {
        AppConfig {
            huggingface_api_key: None,
            huggingface_base_url: "http://127.0.0.1:9".to_string(),
            data_dir: dir.path().join("data"),
            export_dir: dir.path().join("exports"),
            http_timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);

        {
            let state = build_app_state(&config).await.unwrap();
            let record = WallpaperRecord::create(
                state.wallpaper_store.next_id(),
                "sunset".to_string(),
                "data:image/jpeg;base64,/9j/AAAA".to_string(),
            );
            state.wallpaper_store.save(record).await.unwrap();
        }

        let reopened = build_app_state(&config).await.unwrap();
        let records = reopened.wallpaper_store.list().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prompt(), "sunset");
    }

    #[tokio::test]
    async fn test_startup_loads_settings_and_gallery() {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(MemoryKeyValueStorage::new());
        storage
            .set(SETTINGS_STORAGE_KEY, r#"{"imageModel":"sd-v1-5"}"#)
            .await
            .unwrap();
        storage
            .set(
                WALLPAPERS_STORAGE_KEY,
                r#"[{"id":"1","prompt":"lake","imageUrl":"https://cdn.example.com/1.jpg","createdAt":"2024-05-01T10:00:00.000Z"}]"#,
            )
            .await
            .unwrap();

        let state = build_app_state_with_storage(&config(&dir), storage).await.unwrap();
        assert_eq!(state.settings_service.get().await.image_model, ImageModel::SdV15);
        assert_eq!(state.wallpaper_store.len().await, 1);
    }

    #[tokio::test]
    async fn test_corrupt_gallery_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(MemoryKeyValueStorage::new());
        storage.set(WALLPAPERS_STORAGE_KEY, "{not json").await.unwrap();

        let state = build_app_state_with_storage(&config(&dir), storage).await.unwrap();
        assert!(state.wallpaper_store.is_empty().await);
    }
}
