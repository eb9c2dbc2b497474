// src/services/export_service.rs
//
// Export Service - copies a wallpaper image out of the gallery to disk
//
// RULES:
// - Embedded images are decoded locally, remote ones downloaded
// - The target directory is created on demand
// - Never touches the gallery itself

use chrono::Utc;
use reqwest::{header, Client};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::domain::wallpaper::image_data::{decode_data_url, extension_for_mime};
use crate::domain::WallpaperRecord;
use crate::error::{AppError, AppResult};

pub struct ExportService {
    http_client: Client,
}

impl ExportService {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_http_client(http_client))
    }

    pub fn with_http_client(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Write the image of `record` into `directory`; returns the new file.
    pub async fn export(&self, record: &WallpaperRecord, directory: &Path) -> AppResult<PathBuf> {
        let image = record.image_data();

        let (extension, bytes) = if record.is_embedded() {
            let (mime, bytes) = decode_data_url(image).ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Wallpaper {} has an unsupported data URL",
                    record.id()
                ))
            })??;
            (extension_for_mime(&mime), bytes)
        } else if image.starts_with("http://") || image.starts_with("https://") {
            self.download(image).await?
        } else {
            return Err(AppError::InvalidInput(format!(
                "Wallpaper {} has no exportable image",
                record.id()
            )));
        };

        tokio::fs::create_dir_all(directory).await?;
        let (path, mut file) = create_unique(directory, extension).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        log::info!("Exported wallpaper {} to {}", record.id(), path.display());
        Ok(path)
    }

    async fn download(&self, url: &str) -> AppResult<(&'static str, Vec<u8>)> {
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Network(format!(
                "Image download failed with status {}",
                status
            )));
        }

        let extension = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| extension_for_mime(value.split(';').next().unwrap_or(value).trim()))
            .unwrap_or("jpg");

        let bytes = response.bytes().await?;
        Ok((extension, bytes.to_vec()))
    }
}

/// Open a fresh `wallpaper_<millis>[_<n>].<ext>` file; existing files are never reused.
async fn create_unique(directory: &Path, extension: &str) -> AppResult<(PathBuf, File)> {
    let stamp = Utc::now().timestamp_millis();
    let mut attempt = 0u32;
    loop {
        let name = match attempt {
            0 => format!("wallpaper_{}.{}", stamp, extension),
            n => format!("wallpaper_{}_{}.{}", stamp, n, extension),
        };
        let path = directory.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}
