//! Error types for storage and share-link operations

use thiserror::Error;

/// Errors returned by an [`AssetStore`](crate::AssetStore).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No record with this id (or not visible to the caller)
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The backend answered but refused the request
    #[error("Backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Network or protocol failure before a response was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected record shape
    #[error("Malformed record: {0}")]
    Malformed(String),

    /// Missing or invalid client configuration
    #[error("Invalid backend configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::Malformed(e.to_string())
        } else {
            StoreError::Transport(e.to_string())
        }
    }
}

impl From<url::ParseError> for StoreError {
    fn from(e: url::ParseError) -> Self {
        StoreError::Config(e.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors while building a share link or its scannable code.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Invalid share origin: {0}")]
    InvalidOrigin(String),

    #[error("Failed to encode scannable code: {0}")]
    Encode(String),

    #[error("Failed to write code image: {0}")]
    Image(#[from] image::ImageError),
}
