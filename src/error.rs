//! Error types and handling
//!
//! Common error types used across the application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Capture unavailable: {0}")]
    CaptureUnavailable(String),

    #[error("Failed to create hosting session: {0}")]
    Credential(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Unauthenticated")]
    Authentication,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unknown error: {0}")]
    Unknown(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn capture_unavailable(msg: impl Into<String>) -> Self {
        Self::CaptureUnavailable(msg.into())
    }

    pub fn credential(msg: impl Into<String>) -> Self {
        Self::Credential(msg.into())
    }

    pub fn upload_failed(msg: impl Into<String>) -> Self {
        Self::UploadFailed(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Error response for the frontend
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        let code = match &error {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::CaptureUnavailable(_) => "CAPTURE_UNAVAILABLE",
            AppError::Credential(_) => "CREDENTIAL_ERROR",
            AppError::UploadFailed(_) => "UPLOAD_FAILED",
            AppError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            AppError::Authentication => "AUTHENTICATION_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Unknown(_) => "UNKNOWN_ERROR",
        };

        ErrorResponse {
            code: code.to_string(),
            message: error.to_string(),
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
