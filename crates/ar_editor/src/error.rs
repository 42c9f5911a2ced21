//! Error types for the editor.

use thiserror::Error;

use ar_backend::{ShareError, StoreError};
use ar_math::Axis;

use crate::viewport::gizmos::{GizmoMode, GizmoPart};

/// Errors from editor session operations.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No asset selected")]
    NoAsset,

    #[error("A gizmo drag is already in progress")]
    DragInProgress,

    #[error("No gizmo drag in progress")]
    NoDrag,

    #[error("{axis} axis is disabled for {mode}")]
    AxisDisabled { mode: GizmoMode, axis: Axis },

    #[error("{part:?} does not belong to the {mode} gizmo")]
    PartMismatch { part: GizmoPart, mode: GizmoMode },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Errors while publishing an asset.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Another publish for this bridge has not finished yet
    #[error("Publish already in progress")]
    InFlight,

    #[error("Failed to update visibility: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to build share link: {0}")]
    Share(#[from] ShareError),
}

/// Errors while fetching or decoding an asset's resource.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource request failed ({status}): {url}")]
    Http { status: u16, url: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode resource: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for AssetError {
    fn from(e: reqwest::Error) -> Self {
        AssetError::Transport(e.to_string())
    }
}

/// Errors while loading or saving preferences.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Preferences I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid preferences file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for session operations
pub type EditorResult<T> = std::result::Result<T, EditorError>;
