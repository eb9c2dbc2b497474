use super::entity::WallpaperRecord;
use crate::domain::{DomainError, DomainResult};
use chrono::DateTime;

/// Validates all WallpaperRecord invariants
pub fn validate_wallpaper(record: &WallpaperRecord) -> DomainResult<()> {
    if record.id().trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Wallpaper id cannot be empty".to_string(),
        ));
    }
    validate_prompt(record.prompt())?;
    if record.image_data().trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Wallpaper image data cannot be empty".to_string(),
        ));
    }
    validate_created_at(record.created_at())?;
    Ok(())
}

/// Prompt cannot be empty or whitespace only
pub fn validate_prompt(prompt: &str) -> DomainResult<()> {
    if prompt.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Prompt cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_created_at(created_at: &str) -> DomainResult<()> {
    DateTime::parse_from_rfc3339(created_at).map_err(|e| {
        DomainError::InvariantViolation(format!(
            "createdAt '{}' is not an ISO-8601 timestamp: {}",
            created_at, e
        ))
    })?;
    Ok(())
}

/// Invariants that must hold true for the Wallpaper domain:
///
/// 1. Ids are unique within the collection
/// 2. Records are never mutated after creation
/// 3. Editing creates a new record with a new id
/// 4. Prompt and image data are never empty
/// 5. createdAt is an ISO-8601 timestamp and never changes
