use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A generated wallpaper kept in the local gallery.
///
/// Records are immutable once built: there are no setters, and "editing"
/// an image produces a brand-new record with its own id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallpaperRecord {
    /// Identity and sole lookup key (decimal epoch milliseconds)
    id: String,

    /// Text description the image was generated from
    prompt: String,

    /// Remote URL or `data:` URL; opaque to the store
    #[serde(rename = "imageUrl", alias = "imageData")]
    image_data: String,

    /// ISO-8601 creation timestamp, set once
    created_at: String,
}

impl WallpaperRecord {
    /// Build a record stamped with the current time.
    pub fn create(id: String, prompt: String, image_data: String) -> Self {
        Self::from_parts(id, prompt, image_data, format_timestamp(Utc::now()))
    }

    /// Rebuild a record from already-known parts.
    pub fn from_parts(id: String, prompt: String, image_data: String, created_at: String) -> Self {
        Self {
            id,
            prompt,
            image_data,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn image_data(&self) -> &str {
        &self.image_data
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// True when the payload is embedded rather than a remote URL.
    pub fn is_embedded(&self) -> bool {
        self.image_data.starts_with("data:")
    }
}

impl std::fmt::Display for WallpaperRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.prompt, self.id)
    }
}

/// Millisecond-precision UTC timestamp, e.g. `2024-05-01T10:00:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
