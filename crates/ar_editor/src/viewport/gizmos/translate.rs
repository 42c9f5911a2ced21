//! Translate gizmo implementation.

use ar_math::{Axis, Ray, Vec3};

use super::{drag_plane_normal, snap_value, Gizmo, GizmoMode, GizmoPart, InteractionState, TransformDelta};
use crate::core::Transform;

/// Translate gizmo with axis arrows and plane handles.
#[derive(Clone, Copy, Debug, Default)]
pub struct TranslateGizmo;

impl TranslateGizmo {
    /// Arrow pick radius, relative to gizmo size
    const HIT_RADIUS: f32 = 0.1;
    /// Plane square extent along both in-plane axes, relative to gizmo size
    const PLANE_MIN: f32 = 0.15;
    const PLANE_MAX: f32 = 0.45;

    pub fn new() -> Self {
        Self
    }
}

impl Gizmo for TranslateGizmo {
    fn mode(&self) -> GizmoMode {
        GizmoMode::Translate
    }

    fn hit_test(&self, transform: &Transform, ray: &Ray, size: f32) -> Option<(GizmoPart, f32)> {
        let pos = transform.position;
        let hit_radius = size * Self::HIT_RADIUS;

        // Arrows win over plane squares
        let mut closest: Option<(GizmoPart, f32)> = None;
        for axis in Axis::ALL {
            let end = pos + axis.unit() * size;
            if ray.distance_to_segment(pos, end) < hit_radius {
                let t = (ray.closest_point((pos + end) * 0.5) - ray.origin).length();
                if closest.map_or(true, |(_, best)| t < best) {
                    closest = Some((GizmoPart::Axis(axis), t));
                }
            }
        }
        if closest.is_some() {
            return closest;
        }

        for normal in Axis::ALL {
            let Some(hit) = ray.intersect_plane(pos, normal.unit()) else {
                continue;
            };
            let local = hit - pos;
            let in_bounds = Axis::ALL
                .into_iter()
                .filter(|a| *a != normal)
                .all(|a| (size * Self::PLANE_MIN..=size * Self::PLANE_MAX).contains(&local[a]));

            if in_bounds {
                let t = (hit - ray.origin).length();
                if closest.map_or(true, |(_, best)| t < best) {
                    closest = Some((GizmoPart::Plane(normal), t));
                }
            }
        }

        closest
    }

    fn begin_interaction(&self, part: GizmoPart, transform: &Transform, ray: &Ray) -> InteractionState {
        let normal = match part {
            GizmoPart::Axis(axis) => drag_plane_normal(axis, ray),
            GizmoPart::Plane(normal) => normal.unit(),
            _ => Vec3::Z,
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

        let current = ray.intersect_plane(state.start_transform.position, state.plane_normal);
        if let (Some(start), Some(current)) = (state.start_hit, current) {
            let raw = current - start;

            // Constrain to the grabbed axis or plane
            let constrained = match state.active_part {
                GizmoPart::Axis(axis) => axis.unit() * raw[axis],
                GizmoPart::Plane(normal) => raw.with(normal, 0.0),
                _ => Vec3::ZERO,
            };

            delta.position = match snap {
                Some(step) => Vec3::new(
                    snap_value(constrained.x, step),
                    snap_value(constrained.y, step),
                    snap_value(constrained.z, step),
                ),
                None => constrained,
            };
        }

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
    fn test_hit_axis() {
        let gizmo = TranslateGizmo::new();
        let t = Transform::new();

        let hit = gizmo.hit_test(&t, &camera_ray_to(Vec3::new(0.6, 0.0, 0.0)), 1.0);
        assert_eq!(hit.map(|(p, _)| p), Some(GizmoPart::Axis(Axis::X)));

        let hit = gizmo.hit_test(&t, &camera_ray_to(Vec3::new(0.0, 0.6, 0.0)), 1.0);
        assert_eq!(hit.map(|(p, _)| p), Some(GizmoPart::Axis(Axis::Y)));
    }

    #[test]
    fn test_hit_plane() {
        let gizmo = TranslateGizmo::new();
        let hit = gizmo.hit_test(&Transform::new(), &camera_ray_to(Vec3::new(0.3, 0.3, 0.0)), 1.0);
        assert_eq!(hit.map(|(p, _)| p), Some(GizmoPart::Plane(Axis::Z)));
    }

    #[test]
    fn test_miss() {
        let gizmo = TranslateGizmo::new();
        let hit = gizmo.hit_test(&Transform::new(), &camera_ray_to(Vec3::new(-2.0, -2.0, 0.0)), 1.0);
        assert!(hit.is_none());
    }

    #[test]
    fn test_axis_drag_is_constrained() {
        let gizmo = TranslateGizmo::new();
        let t = Transform::new();
        let part = GizmoPart::Axis(Axis::X);

        let mut state = gizmo.begin_interaction(part, &t, &camera_ray_to(Vec3::new(0.5, 0.0, 0.0)));
        let delta = gizmo.update_interaction(&mut state, &camera_ray_to(Vec3::new(1.5, 0.7, 0.0)), None);

        assert!(delta.position.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-4));
        assert!(state.preview().position.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn test_drag_snaps() {
        let gizmo = TranslateGizmo::new();
        let t = Transform::new();
        let part = GizmoPart::Plane(Axis::Z);

        let mut state = gizmo.begin_interaction(part, &t, &camera_ray_to(Vec3::new(0.3, 0.3, 0.0)));
        let delta = gizmo.update_interaction(&mut state, &camera_ray_to(Vec3::new(0.63, 0.12, 0.0)), Some(0.1));

        assert!(delta.position.abs_diff_eq(Vec3::new(0.3, -0.2, 0.0), 1e-4));
    }
}
