// src/integrations/huggingface/mod.rs

pub mod client;

pub use client::{HuggingFaceClient, DEFAULT_BASE_URL};
