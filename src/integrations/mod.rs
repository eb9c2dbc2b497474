// src/integrations/mod.rs
//
// External Integrations Module
//
// Everything that talks to a third party lives here behind a trait, so the
// services can be exercised against mocks.

pub mod entitlement;
pub mod huggingface;
pub mod image_generator;

pub use entitlement::{EntitlementProvider, StoredEntitlement, PRO_STATUS_STORAGE_KEY};
pub use huggingface::{HuggingFaceClient, DEFAULT_BASE_URL};
pub use image_generator::ImageGenerator;

#[cfg(test)]
pub use entitlement::MockEntitlementProvider;
#[cfg(test)]
pub use image_generator::MockImageGenerator;
