//! AR Scene Transform Editor
//!
//! Places a single AR asset (an image target or a 3D model) in a scene
//! by editing its position, rotation and scale.
//!
//! ## Features
//!
//! - **Transform Gizmos**: Translate, rotate and scale handles with snapping and per-axis locks
//! - **Numeric Fields and Sliders**: Exact entry, with rotation shown in degrees
//! - **Keyboard Shortcuts**: T/R/S modes, G grid, Ctrl/Cmd+Z undo and redo
//! - **Undo/Redo**: Snapshot history per selected asset
//! - **Viewport Frames**: Render descriptions with placeholder geometry while loading
//! - **Save and Publish**: Transform persistence, share links and scannable codes
//!
//! ## Architecture
//!
//! Every surface edits through the session:
//!
//! ```text
//! Gizmo / Field / Slider / Key → TransformCommand → EditorSession → TransformView
//!                                                        ↓
//!                                              PersistenceBridge → AssetStore
//! ```

pub mod core;
pub mod commands;
pub mod input;
pub mod viewport;
pub mod assets;
pub mod persistence;
pub mod error;

// Re-export commonly used types
pub use core::{
    Color,
    EditorMessage,
    EditorPreferences,
    EditorSession,
    SceneSettings,
    Transform,
    TransformChannel,
    TransformHistory,
    TransformView,
};

pub use commands::TransformCommand;

pub use input::{KeyInput, Modifiers, NumericField, Shortcut, SliderTarget};

pub use viewport::{
    gizmos::{GizmoMode, GizmoPart},
    Camera,
    DragCommit,
    SnapSettings,
    ViewportFrame,
};

pub use assets::{AssetLoader, AssetStatus, HttpAssetLoader, LoadTicket, LoadedAsset};

pub use persistence::{PersistenceBridge, PublishOutcome};

pub use error::{AssetError, EditorError, EditorResult, PublishError};

/// Editor version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Editor name
pub const NAME: &str = "AR Scene Editor";
