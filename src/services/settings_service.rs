// src/services/settings_service.rs
//
// Settings Service - user preferences persisted as one JSON document

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{AppSettings, SettingsUpdate};
use crate::error::AppResult;
use crate::events::{EventBus, SettingsChanged};
use crate::repositories::KeyValueStorage;

/// Storage key holding the serialized settings
pub const SETTINGS_STORAGE_KEY: &str = "pragmatic_app_settings";

pub struct SettingsService {
    storage: Arc<dyn KeyValueStorage>,
    current: RwLock<AppSettings>,
    event_bus: Arc<EventBus>,
}

impl SettingsService {
    pub fn new(storage: Arc<dyn KeyValueStorage>, event_bus: Arc<EventBus>) -> Self {
        Self {
            storage,
            current: RwLock::new(AppSettings::default()),
            event_bus,
        }
    }

    /// Read persisted settings; missing or unreadable data means defaults.
    ///
    /// A single unreadable field only resets that field.
    pub async fn load(&self) -> AppResult<AppSettings> {
        let stored = self.storage.get(SETTINGS_STORAGE_KEY).await?;
        let settings = match stored {
            Some(raw) => decode_settings(&raw),
            None => AppSettings::default(),
        };

        *self.current.write().await = settings;
        Ok(settings)
    }

    pub async fn get(&self) -> AppSettings {
        *self.current.read().await
    }

    /// Merge `update` into the current settings and persist the result.
    pub async fn update(&self, update: SettingsUpdate) -> AppResult<AppSettings> {
        let mut current = self.current.write().await;
        let updated = current.merged(update);
        self.persist(&updated).await?;
        *current = updated;
        drop(current);

        self.event_bus.emit(SettingsChanged::new(updated));
        Ok(updated)
    }

    /// Persist and adopt the default settings.
    pub async fn reset(&self) -> AppResult<AppSettings> {
        let mut current = self.current.write().await;
        let defaults = AppSettings::default();
        self.persist(&defaults).await?;
        *current = defaults;
        drop(current);

        self.event_bus.emit(SettingsChanged::new(defaults));
        Ok(defaults)
    }

    async fn persist(&self, settings: &AppSettings) -> AppResult<()> {
        let encoded = serde_json::to_string(settings)?;
        self.storage.set(SETTINGS_STORAGE_KEY, &encoded).await
    }
}

fn decode_settings(raw: &str) -> AppSettings {
    let document = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(document)) => document,
        Ok(_) => {
            log::warn!("Error loading settings, using defaults: not a JSON object");
            return AppSettings::default();
        }
        Err(e) => {
            log::warn!("Error loading settings, using defaults: {}", e);
            return AppSettings::default();
        }
    };

    let defaults = AppSettings::default();
    AppSettings {
        image_model: field(&document, "imageModel", defaults.image_model),
        color_theme: field(&document, "colorTheme", defaults.color_theme),
        is_pro: field(&document, "isPro", defaults.is_pro),
    }
}

fn field<T: DeserializeOwned>(document: &Map<String, Value>, name: &str, default: T) -> T {
    let Some(value) = document.get(name) else {
        return default;
    };
    serde_json::from_value(value.clone()).unwrap_or_else(|e| {
        log::warn!("Ignoring stored setting {}: {}", name, e);
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColorTheme, ImageModel};
    use crate::error::AppError;
    use crate::repositories::{MemoryKeyValueStorage, MockKeyValueStorage};

    fn service() -> (SettingsService, Arc<MemoryKeyValueStorage>) {
        let storage = Arc::new(MemoryKeyValueStorage::new());
        (
            SettingsService::new(storage.clone(), Arc::new(EventBus::new())),
            storage,
        )
    }

    #[tokio::test]
    async fn test_load_defaults_when_absent() {
        let (service, _) = service();
        assert_eq!(service.load().await.unwrap(), AppSettings::default());
    }

    #[tokio::test]
    async fn test_load_defaults_when_unreadable() {
        let (service, storage) = service();
        storage.set(SETTINGS_STORAGE_KEY, "][").await.unwrap();
        assert_eq!(service.load().await.unwrap(), AppSettings::default());
    }

    #[tokio::test]
    async fn test_unknown_model_keeps_other_settings() {
        let (service, storage) = service();
        storage
            .set(
                SETTINGS_STORAGE_KEY,
                r#"{"imageModel":"dall-e","colorTheme":"dark","isPro":true}"#,
            )
            .await
            .unwrap();

        let settings = service.load().await.unwrap();
        assert_eq!(settings.image_model, ImageModel::SdXlBase);
        assert_eq!(settings.color_theme, ColorTheme::Dark);
        assert!(settings.is_pro);
    }

    #[tokio::test]
    async fn test_wrongly_typed_fields_fall_back_individually() {
        let (service, storage) = service();
        storage
            .set(
                SETTINGS_STORAGE_KEY,
                r#"{"imageModel":"sd-v1-5","colorTheme":"neon","isPro":"yes"}"#,
            )
            .await
            .unwrap();

        let settings = service.load().await.unwrap();
        assert_eq!(settings.image_model, ImageModel::SdV15);
        assert_eq!(settings.color_theme, ColorTheme::System);
        assert!(!settings.is_pro);
    }

    #[tokio::test]
    async fn test_non_object_document_means_defaults() {
        let (service, storage) = service();
        storage.set(SETTINGS_STORAGE_KEY, "[1,2]").await.unwrap();
        assert_eq!(service.load().await.unwrap(), AppSettings::default());
    }

    #[tokio::test]
    async fn test_update_persists_and_reloads() {
        let (service, storage) = service();
        service
            .update(SettingsUpdate {
                image_model: Some(ImageModel::SdV15),
                color_theme: Some(ColorTheme::Dark),
                ..Default::default()
            })
            .await
            .unwrap();

        let reopened = SettingsService::new(storage, Arc::new(EventBus::new()));
        let loaded = reopened.load().await.unwrap();
        assert_eq!(loaded.image_model, ImageModel::SdV15);
        assert_eq!(loaded.color_theme, ColorTheme::Dark);
        assert!(!loaded.is_pro);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_settings() {
        let mut storage = MockKeyValueStorage::new();
        storage
            .expect_set()
            .returning(|_, _| Err(AppError::Storage("locked".to_string())));
        let service = SettingsService::new(Arc::new(storage), Arc::new(EventBus::new()));

        let result = service
            .update(SettingsUpdate {
                is_pro: Some(true),
                ..Default::default()
            })
            .await;
        assert!(result.is_err());
        assert!(!service.get().await.is_pro);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let (service, storage) = service();
        service
            .update(SettingsUpdate {
                image_model: Some(ImageModel::Flux1Dev),
                is_pro: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(service.reset().await.unwrap(), AppSettings::default());
        let raw = storage.get(SETTINGS_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(raw, serde_json::to_string(&AppSettings::default()).unwrap());
    }
}
