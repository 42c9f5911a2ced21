//! Transform gizmos for visual manipulation.
//!
//! Provides translate, rotate, and scale gizmos driven by pointer rays.

mod gizmo;
mod translate;
mod rotate;
mod scale;

pub use gizmo::{
    Gizmo, GizmoPart, GizmoMode, InteractionState, TransformDelta,
    snap_value, drag_plane_normal,
};
pub use translate::TranslateGizmo;
pub use rotate::RotateGizmo;
pub use scale::ScaleGizmo;

/// Gizmo axis colors.
pub mod colors {
    use ar_math::Axis;
    use crate::core::Color;

    pub const X_AXIS: Color = Color::rgb(255, 100, 100);
    pub const Y_AXIS: Color = Color::rgb(100, 255, 100);
    pub const Z_AXIS: Color = Color::rgb(100, 100, 255);
    pub const HIGHLIGHT: Color = Color::rgb(255, 255, 100);
    pub const CENTER: Color = Color::rgb(255, 255, 255);
    pub const DISABLED: Color = Color::rgb(90, 90, 90);

    pub fn axis(axis: Axis) -> Color {
        match axis {
            Axis::X => X_AXIS,
            Axis::Y => Y_AXIS,
            Axis::Z => Z_AXIS,
        }
    }
}
