// src/config.rs
//
// Runtime configuration, read from the environment (and `.env` when present)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::integrations::DEFAULT_BASE_URL;

const APP_DIR_NAME: &str = "pragmatic";
const EXPORT_DIR_NAME: &str = "Pragmatic";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Hugging Face access token; generation fails without it
    pub huggingface_api_key: Option<String>,
    pub huggingface_base_url: String,
    /// Holds the SQLite database
    pub data_dir: PathBuf,
    /// Default target for exported images
    pub export_dir: PathBuf,
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let huggingface_api_key = var("HUGGINGFACE_API_KEY");
        let huggingface_base_url =
            var("PRAGMATIC_HF_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let data_dir = match var("PRAGMATIC_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or_else(|| {
                    AppError::Configuration(
                        "No data directory available; set PRAGMATIC_DATA_DIR".to_string(),
                    )
                })?,
        };

        let export_dir = var("PRAGMATIC_EXPORT_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::picture_dir().map(|dir| dir.join(EXPORT_DIR_NAME)))
            .unwrap_or_else(|| data_dir.join("exports"));

        let http_timeout_secs = match var("PRAGMATIC_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Configuration(format!(
                    "PRAGMATIC_HTTP_TIMEOUT_SECS must be a whole number of seconds, got {}",
                    raw
                ))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            huggingface_api_key,
            huggingface_base_url,
            data_dir,
            export_dir,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}
