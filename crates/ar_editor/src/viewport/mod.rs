//! Viewport: gizmos, camera and the per-frame render description.

pub mod gizmos;
mod gizmo_state;
mod camera;
mod render;

pub use gizmo_state::{AxisConstraints, DragCommit, GizmoState, SnapSettings};
pub use camera::Camera;
pub use render::{
    Geometry, GizmoHandle, GizmoOverlay, Grid, Lighting, Material, RenderObject, ViewportFrame,
};
