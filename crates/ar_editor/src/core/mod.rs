//! Core editor types and state management.
//!
//! This module contains the central `EditorSession` and supporting types
//! that form the foundation of the editor.

pub mod session;
mod transform;
mod history;
mod scene_settings;
mod preferences;

pub use session::{EditorMessage, EditorSession, TransformView};
pub use transform::{Transform, TransformChannel};
pub use history::{HistoryEntry, TransformHistory};
pub use scene_settings::{Color, SceneSettings};
pub use preferences::EditorPreferences;
