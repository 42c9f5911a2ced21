//! Scale gizmo implementation.

use ar_math::{Axis, Ray, Vec3};

use super::{drag_plane_normal, snap_value, Gizmo, GizmoMode, GizmoPart, InteractionState, TransformDelta};
use crate::core::Transform;

/// Scale gizmo with axis handles and a center for uniform scale.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScaleGizmo;

impl ScaleGizmo {
    /// Handle sphere radius, relative to gizmo size
    const HANDLE_RADIUS: f32 = 0.15;
    /// Center sphere radius, relative to gizmo size
    const CENTER_RADIUS: f32 = 0.2;
    /// Smallest factor a drag can produce
    const MIN_FACTOR: f32 = 0.01;

    pub fn new() -> Self {
        Self
    }
}

/// Nearest intersection of `ray` with a sphere, if in front of the origin.
fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - ray.origin;
    let along = to_center.dot(ray.direction);
    let dist_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if dist_sq > radius_sq {
        return None;
    }
    let t = along - (radius_sq - dist_sq).sqrt();
    (t > 0.0).then_some(t)
}

impl Gizmo for ScaleGizmo {
    fn mode(&self) -> GizmoMode {
        GizmoMode::Scale
    }

    fn hit_test(&self, transform: &Transform, ray: &Ray, size: f32) -> Option<(GizmoPart, f32)> {
        let pos = transform.position;

        if let Some(t) = ray_sphere(ray, pos, size * Self::CENTER_RADIUS) {
            return Some((GizmoPart::Center, t));
        }

        let mut closest: Option<(GizmoPart, f32)> = None;
        for axis in Axis::ALL {
            let handle = pos + axis.unit() * size;
            if let Some(t) = ray_sphere(ray, handle, size * Self::HANDLE_RADIUS) {
                if closest.map_or(true, |(_, best)| t < best) {
                    closest = Some((GizmoPart::Handle(axis), t));
                }
            }
        }

        closest
    }

    fn begin_interaction(&self, part: GizmoPart, transform: &Transform, ray: &Ray) -> InteractionState {
        let normal = match part {
            GizmoPart::Handle(axis) => drag_plane_normal(axis, ray),
            // Center drags happen in the view plane
            _ => -ray.direction,
        };
        InteractionState::new(part, transform, normal, ray)
    }

    fn update_interaction(
        &self,
        state: &mut InteractionState,
        ray: &Ray,
        snap: Option<f32>,
    ) -> TransformDelta {
        let mut delta = TransformDelta::default();

        let center = state.start_transform.position;
        let (Some(start), Some(current)) = (state.start_hit, ray.intersect_plane(center, state.plane_normal)) else {
            state.current_delta = delta;
            return delta;
        };

        let factor = match state.active_part {
            GizmoPart::Handle(axis) => {
                // Ratio of the handle's distance from the center along its axis
                let from = (start - center)[axis];
                let to = (current - center)[axis];
                if from.abs() > 1e-4 {
                    to / from
                } else {
                    1.0 + (to - from)
                }
            }
            GizmoPart::Center => {
                let offset = current - start;
                1.0 + offset.x + offset.y + offset.z
            }
            _ => 1.0,
        };

        let factor = factor.max(Self::MIN_FACTOR);
        let factor = match snap {
            Some(step) => snap_value(factor, step).max(Self::MIN_FACTOR),
            None => factor,
        };

        delta.scale = match state.active_part {
            GizmoPart::Handle(axis) => Vec3::ONE.with(axis, factor),
            GizmoPart::Center => Vec3::splat(factor),
            _ => Vec3::ONE,
        };

        state.current_delta = delta;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_ray_to(target: Vec3) -> Ray {
        Ray::from_points(Vec3::new(0.0, 0.0, 5.0), target)
    }

    #[test]
    fn test_hit_parts() {
        let gizmo = ScaleGizmo::new();
        let t = Transform::new();

        let center = gizmo.hit_test(&t, &camera_ray_to(Vec3::ZERO), 1.0);
        assert_eq!(center.map(|(p, _)| p), Some(GizmoPart::Center));

        let handle = gizmo.hit_test(&t, &camera_ray_to(Vec3::new(0.0, 1.0, 0.0)), 1.0);
        assert_eq!(handle.map(|(p, _)| p), Some(GizmoPart::Handle(Axis::Y)));
    }

    #[test]
    fn test_handle_drag_doubles() {
        let gizmo = ScaleGizmo::new();
        let t = Transform::new().with_uniform_scale(1.5);
        let part = GizmoPart::Handle(Axis::X);

        let mut state = gizmo.begin_interaction(part, &t, &camera_ray_to(Vec3::new(1.0, 0.0, 0.0)));
        let delta = gizmo.update_interaction(&mut state, &camera_ray_to(Vec3::new(2.0, 0.3, 0.0)), Some(0.1));

        assert!(delta.scale.abs_diff_eq(Vec3::new(2.0, 1.0, 1.0), 1e-4));
        assert!(state.preview().scale.abs_diff_eq(Vec3::new(3.0, 1.5, 1.5), 1e-4));
    }

    #[test]
    fn test_factor_never_collapses() {
        let gizmo = ScaleGizmo::new();
        let part = GizmoPart::Handle(Axis::X);

        let mut state = gizmo.begin_interaction(part, &Transform::new(), &camera_ray_to(Vec3::new(1.0, 0.0, 0.0)));
        let delta = gizmo.update_interaction(&mut state, &camera_ray_to(Vec3::new(-1.0, 0.0, 0.0)), None);

        assert_eq!(delta.scale.x, ScaleGizmo::MIN_FACTOR);
    }
}
