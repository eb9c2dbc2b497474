//! Pro-gated model policy.
//!
//! Premium models silently fall back to Stable Diffusion XL when the user
//! has no Pro entitlement. The function is pure so the policy can be tested
//! without settings storage or the network.

use serde::Serialize;

use crate::domain::settings::ImageModel;

/// Suffix appended to every prompt sent to the generator
pub const QUALITY_PROMPT_SUFFIX: &str = ", high quality, detailed, vibrant, 4k";

/// Model used when a premium model is requested without entitlement
pub const FALLBACK_MODEL: ImageModel = ImageModel::SdXlBase;

/// Request parameters for one hosted model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelParams {
    /// Hosted model id, e.g. `stabilityai/stable-diffusion-xl-base-1.0`
    pub model_id: &'static str,
    pub width: u32,
    pub height: u32,
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
    pub prompt_suffix: &'static str,
}

impl ModelParams {
    pub fn for_model(model: ImageModel) -> Self {
        match model {
            ImageModel::SdXlBase => Self {
                model_id: "stabilityai/stable-diffusion-xl-base-1.0",
                width: 768,
                height: 1280,
                num_inference_steps: 30,
                guidance_scale: 7.5,
                prompt_suffix: QUALITY_PROMPT_SUFFIX,
            },
            ImageModel::SdV15 => Self {
                model_id: "runwayml/stable-diffusion-v1-5",
                width: 512,
                height: 896,
                num_inference_steps: 30,
                guidance_scale: 7.5,
                prompt_suffix: QUALITY_PROMPT_SUFFIX,
            },
            ImageModel::Sd35Large => Self {
                model_id: "stabilityai/stable-diffusion-3.5-large",
                width: 768,
                height: 1280,
                num_inference_steps: 28,
                guidance_scale: 4.5,
                prompt_suffix: QUALITY_PROMPT_SUFFIX,
            },
            ImageModel::Flux1Dev => Self {
                model_id: "black-forest-labs/FLUX.1-dev",
                width: 768,
                height: 1280,
                num_inference_steps: 28,
                guidance_scale: 3.5,
                prompt_suffix: QUALITY_PROMPT_SUFFIX,
            },
        }
    }

    /// Prompt actually sent to the generator.
    pub fn augment_prompt(&self, prompt: &str) -> String {
        format!("{}{}", prompt.trim(), self.prompt_suffix)
    }
}

/// Resolve the model that will really be used for a request.
pub fn select_model(requested: ImageModel, is_pro: bool) -> (ImageModel, ModelParams) {
    let effective = if requested.is_premium() && !is_pro {
        FALLBACK_MODEL
    } else {
        requested
    };
    (effective, ModelParams::for_model(effective))
}
