use thiserror::Error;

use super::outcome::ErrorCode;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unprocessable content: {message}")]
    UnprocessableContent { message: String },

    #[error("Blob storage error: {message}")]
    BlobStorage { message: String },

    #[error("Conversion error: {message}")]
    Conversion { message: String },

    #[error("Post conversion error: {message}")]
    PostConversion { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::UnprocessableContent {
            message: message.into(),
        }
    }

    pub fn blob_storage(message: impl Into<String>) -> Self {
        Self::BlobStorage {
            message: message.into(),
        }
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Self::Conversion {
            message: message.into(),
        }
    }

    pub fn post_conversion(message: impl Into<String>) -> Self {
        Self::PostConversion {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The outcome code this error is reported under
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Validation { .. } => ErrorCode::ValidationError,
            Self::UnprocessableContent { .. } => ErrorCode::UnprocessableContent,
            Self::BlobStorage { .. } => ErrorCode::BlobStorageOperation,
            Self::Conversion { .. } => ErrorCode::ConversionException,
            Self::PostConversion { .. } => ErrorCode::PostConversionException,
            Self::Configuration { .. }
            | Self::Storage { .. }
            | Self::Conflict { .. }
            | Self::Internal { .. } => ErrorCode::UnknownError,
        }
    }

    /// The bare message, without the kind prefix used by `Display`
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message }
            | Self::Validation { message }
            | Self::UnprocessableContent { message }
            | Self::BlobStorage { message }
            | Self::Conversion { message }
            | Self::PostConversion { message }
            | Self::Configuration { message }
            | Self::Storage { message }
            | Self::Conflict { message }
            | Self::Internal { message } => message,
        }
    }
}
