// src/services/generation_service.rs
//
// Generation Service - prompt → hosted model → new gallery record
//
// Per invocation: Idle → Requesting → {Committing → Done} | Failed
//
// RULES:
// - Input is validated before any network call
// - A failed request never creates a record
// - A failed commit still hands the generated record back (unsaved)
// - Edits always produce a NEW record; the source is never touched
// - Model choice and entitlement arrive as explicit arguments

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::{select_model, validate_prompt, ImageModel, WallpaperRecord};
use crate::error::AppError;
use crate::events::{EventBus, GenerationFailed};
use crate::integrations::ImageGenerator;
use crate::services::wallpaper_store::WallpaperStore;

/// Joins a source prompt and edit instructions
pub const EDIT_PROMPT_SEPARATOR: &str = ", ";

/// Where a generation attempt stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStage {
    Validating,
    Requesting,
    Committing,
}

impl std::fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GenerationStage::Validating => "validating",
            GenerationStage::Requesting => "requesting",
            GenerationStage::Committing => "committing",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("Generation failed while {stage}: {source}")]
pub struct GenerationError {
    pub stage: GenerationStage,
    pub source: AppError,
    /// Generated but not durably saved; only set for `Committing`
    pub unsaved: Option<WallpaperRecord>,
}

impl GenerationError {
    fn new(stage: GenerationStage, source: AppError) -> Self {
        Self {
            stage,
            source,
            unsaved: None,
        }
    }
}

/// Settings snapshot the caller passes in for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationSettings {
    pub model: ImageModel,
    pub is_pro: bool,
}

/// A saved generation and the model that really produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub record: WallpaperRecord,
    pub model: ImageModel,
}

/// Prompt used for an edit of `original`.
pub fn combine_edit_prompt(original: &str, instructions: &str) -> String {
    format!("{}{}{}", original, EDIT_PROMPT_SEPARATOR, instructions.trim())
}

pub struct GenerationService {
    generator: Arc<dyn ImageGenerator>,
    store: Arc<WallpaperStore>,
    event_bus: Arc<EventBus>,
}

impl GenerationService {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        store: Arc<WallpaperStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            generator,
            store,
            event_bus,
        }
    }

    /// Generate a wallpaper for `prompt` and add it to the gallery.
    pub async fn generate(
        &self,
        prompt: &str,
        settings: GenerationSettings,
    ) -> Result<Generation, GenerationError> {
        if let Err(e) = validate_prompt(prompt) {
            return Err(self.failed(GenerationError::new(GenerationStage::Validating, e.into())));
        }
        self.request_and_commit(prompt.trim().to_string(), settings).await
    }

    /// Derive a new wallpaper from `source` plus free-text `instructions`.
    pub async fn edit(
        &self,
        source: &WallpaperRecord,
        instructions: &str,
        settings: GenerationSettings,
    ) -> Result<Generation, GenerationError> {
        if instructions.trim().is_empty() {
            return Err(self.failed(GenerationError::new(
                GenerationStage::Validating,
                AppError::InvalidInput("Edit instructions cannot be empty".to_string()),
            )));
        }
        let prompt = combine_edit_prompt(source.prompt(), instructions);
        self.request_and_commit(prompt, settings).await
    }

    /// `edit` for a record looked up in the gallery.
    pub async fn edit_by_id(
        &self,
        source_id: &str,
        instructions: &str,
        settings: GenerationSettings,
    ) -> Result<Generation, GenerationError> {
        let Some(source) = self.store.get(source_id).await else {
            return Err(self.failed(GenerationError::new(
                GenerationStage::Validating,
                AppError::NotFound,
            )));
        };
        self.edit(&source, instructions, settings).await
    }

    async fn request_and_commit(
        &self,
        prompt: String,
        settings: GenerationSettings,
    ) -> Result<Generation, GenerationError> {
        let (model, params) = select_model(settings.model, settings.is_pro);
        if model != settings.model {
            log::info!(
                "Model {} requires Pro; using {} instead",
                settings.model,
                model
            );
        }

        log::info!("Requesting wallpaper from {}", params.model_id);
        let image_data = self
            .generator
            .generate_image(&params.augment_prompt(&prompt), &params)
            .await
            .map_err(|e| self.failed(GenerationError::new(GenerationStage::Requesting, e)))?;

        let record = WallpaperRecord::create(self.store.next_id(), prompt, image_data);
        if let Err(e) = self.store.save(record.clone()).await {
            return Err(self.failed(GenerationError {
                stage: GenerationStage::Committing,
                source: e,
                unsaved: Some(record),
            }));
        }

        log::info!("Wallpaper {} saved", record.id());
        Ok(Generation { record, model })
    }

    fn failed(&self, error: GenerationError) -> GenerationError {
        if error.source.is_storage() {
            log::error!("{}", error);
        } else {
            log::warn!("{}", error);
        }
        self.event_bus.emit(GenerationFailed::new(
            error.stage.to_string(),
            error.source.to_string(),
        ));
        error
    }
}
