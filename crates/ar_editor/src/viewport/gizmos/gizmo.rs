//! Gizmo trait and common types.

use ar_math::{snap, Axis, Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::Transform;

/// Part of a gizmo that can be grabbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GizmoPart {
    /// Translate arrow along an axis
    Axis(Axis),
    /// Translate square; the axis is the plane normal
    Plane(Axis),
    /// Rotation ring around an axis
    Ring(Axis),
    /// Scale handle at the end of an axis
    Handle(Axis),
    /// Uniform scale center
    Center,
}

impl GizmoPart {
    /// The gizmo mode this part belongs to.
    pub fn mode(&self) -> GizmoMode {
        match self {
            GizmoPart::Axis(_) | GizmoPart::Plane(_) => GizmoMode::Translate,
            GizmoPart::Ring(_) => GizmoMode::Rotate,
            GizmoPart::Handle(_) | GizmoPart::Center => GizmoMode::Scale,
        }
    }

    /// Axes this part changes when dragged.
    pub fn axes(&self) -> Vec<Axis> {
        match *self {
            GizmoPart::Axis(axis) | GizmoPart::Ring(axis) | GizmoPart::Handle(axis) => vec![axis],
            GizmoPart::Plane(normal) => Axis::ALL.into_iter().filter(|a| *a != normal).collect(),
            GizmoPart::Center => Axis::ALL.to_vec(),
        }
    }
}

/// Current gizmo operation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GizmoMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl GizmoMode {
    pub const ALL: [GizmoMode; 3] = [GizmoMode::Translate, GizmoMode::Rotate, GizmoMode::Scale];

    pub fn name(&self) -> &'static str {
        match self {
            GizmoMode::Translate => "translate",
            GizmoMode::Rotate => "rotate",
            GizmoMode::Scale => "scale",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "translate" | "move" | "t" => Some(GizmoMode::Translate),
            "rotate" | "r" => Some(GizmoMode::Rotate),
            "scale" | "s" => Some(GizmoMode::Scale),
            _ => None,
        }
    }
}

impl std::fmt::Display for GizmoMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// State during gizmo interaction.
#[derive(Clone, Copy, Debug)]
pub struct InteractionState {
    pub active_part: GizmoPart,
    pub start_transform: Transform,
    /// Normal of the plane the pointer is projected onto
    pub plane_normal: Vec3,
    /// Where the starting ray met that plane
    pub start_hit: Option<Vec3>,
    /// Ring angle at the start of a rotation
    pub start_angle: f32,
    /// Last delta produced by `update_interaction`
    pub current_delta: TransformDelta,
}

impl InteractionState {
    pub fn new(part: GizmoPart, transform: &Transform, plane_normal: Vec3, ray: &Ray) -> Self {
        Self {
            active_part: part,
            start_transform: *transform,
            plane_normal,
            start_hit: ray.intersect_plane(transform.position, plane_normal),
            start_angle: 0.0,
            current_delta: TransformDelta::default(),
        }
    }

    /// Start transform with the current delta applied.
    pub fn preview(&self) -> Transform {
        self.current_delta.apply(&self.start_transform)
    }
}

/// Transform delta resulting from gizmo manipulation.
///
/// Position and rotation are additive; scale is a per-axis factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformDelta {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for TransformDelta {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl TransformDelta {
    pub fn apply(&self, start: &Transform) -> Transform {
        Transform {
            position: start.position + self.position,
            rotation: start.rotation + self.rotation,
            scale: start.scale.mul_elem(self.scale),
        }
    }
}

/// Trait for transform gizmos.
///
/// Gizmos are stateless; everything a drag needs lives in
/// [`InteractionState`].
pub trait Gizmo: Send + Sync {
    fn mode(&self) -> GizmoMode;

    /// Hit test against `ray`; returns the part and distance along the ray.
    /// `size` is the world-space length of the gizmo arms.
    fn hit_test(&self, transform: &Transform, ray: &Ray, size: f32) -> Option<(GizmoPart, f32)>;

    fn begin_interaction(&self, part: GizmoPart, transform: &Transform, ray: &Ray) -> InteractionState;

    /// Compute the delta for the current pointer ray.
    fn update_interaction(
        &self,
        state: &mut InteractionState,
        ray: &Ray,
        snap_value: Option<f32>,
    ) -> TransformDelta;
}

/// Apply snapping to a value.
pub fn snap_value(value: f32, step: f32) -> f32 {
    snap(value, step)
}

/// Plane containing `axis` that faces the viewer the most.
///
/// Dragging along an axis projects the pointer onto this plane, which
/// keeps the projection stable for any camera angle.
pub fn drag_plane_normal(axis: Axis, ray: &Ray) -> Vec3 {
    Axis::ALL
        .into_iter()
        .filter(|a| *a != axis)
        .map(Axis::unit)
        .fold(None::<Vec3>, |best, candidate| match best {
            Some(b) if b.dot(ray.direction).abs() >= candidate.dot(ray.direction).abs() => Some(b),
            _ => Some(candidate),
        })
        .unwrap_or(Vec3::Z)
}
