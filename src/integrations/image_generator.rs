// src/integrations/image_generator.rs
//
// Seam between the generation orchestrator and whatever hosted model
// produces the pixels.

use async_trait::async_trait;

use crate::domain::ModelParams;
use crate::error::AppResult;

#[cfg(test)]
use mockall::automock;

/// One-shot text-to-image call. No retries, streaming or progress.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns the image as an opaque string: a remote URL or a
    /// `data:<mime>;base64,<payload>` URL.
    async fn generate_image(&self, prompt: &str, params: &ModelParams) -> AppResult<String>;
}
