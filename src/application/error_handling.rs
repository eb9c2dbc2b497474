// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::{GenerationError, GenerationStage};

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input/validation error (400)
    Validation,

    /// Local persistence error (500)
    Storage,

    /// Image service error (502)
    ExternalService,

    /// Missing API key or bad environment (500)
    Configuration,

    /// File system error (500)
    FileSystem,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found", None),

            AppError::InvalidInput(message) => Self::new(ErrorType::Validation, message, None),

            AppError::Network(message) => {
                log::warn!("Image service error: {}", message);
                Self::new(
                    ErrorType::ExternalService,
                    "Image service request failed",
                    Some(message),
                )
            }

            AppError::Configuration(message) => {
                log::error!("Configuration error: {}", message);
                Self::new(ErrorType::Configuration, message, None)
            }

            AppError::CorruptStorage { key, reason } => {
                log::error!("Corrupt data under {}: {}", key, reason);
                Self::new(
                    ErrorType::Storage,
                    "Saved data could not be read",
                    Some(format!("{}: {}", key, reason)),
                )
            }

            error @ (AppError::Storage(_) | AppError::Database(_) | AppError::Pool(_)) => {
                // Log full error for debugging
                log::error!("Storage error: {:?}", error);
                Self::new(
                    ErrorType::Storage,
                    "Saving data failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create error response from a failed generation or edit.
    ///
    /// The category follows the underlying cause; the message says which
    /// step of the request went wrong.
    pub fn from_generation_error(error: GenerationError) -> Self {
        let stage = error.stage;
        let mut response = Self::from_app_error(error.source);
        let prefix = match stage {
            GenerationStage::Validating => None,
            GenerationStage::Requesting => Some("Failed to generate wallpaper"),
            GenerationStage::Committing => Some("Failed to save wallpaper"),
        };
        if let Some(prefix) = prefix {
            response.message = format!("{}: {}", prefix, response.message);
        }
        response
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

impl From<GenerationError> for ErrorResponse {
    fn from(error: GenerationError) -> Self {
        Self::from_generation_error(error)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{} ({})", self.message, details),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ErrorResponse {}
