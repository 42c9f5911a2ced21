//! Rotate gizmo implementation.

use ar_math::{consts, radians, Axis, Ray, Vec3};

use super::{snap_value, Gizmo, GizmoMode, GizmoPart, InteractionState, TransformDelta};
use crate::core::Transform;

/// Rotate gizmo with one ring per axis.
#[derive(Clone, Copy, Debug, Default)]
pub struct RotateGizmo;

impl RotateGizmo {
    /// Ring pick tolerance, relative to gizmo size
    const RING_THICKNESS: f32 = 0.1;

    pub fn new() -> Self {
        Self
    }
}

/// Angle of `offset` around `axis`, measured so that positive rotation
/// about the axis increases it.
fn ring_angle(axis: Axis, offset: Vec3) -> f32 {
    match axis {
        Axis::X => offset.z.atan2(offset.y),
        Axis::Y => offset.x.atan2(offset.z),
        Axis::Z => offset.y.atan2(offset.x),
    }
}

/// Wrap an angle difference into (-PI, PI].
fn wrap_angle(mut angle: f32) -> f32 {
    while angle > consts::PI {
        angle -= consts::TAU;
    }
    while angle <= -consts::PI {
        angle += consts::TAU;
    }
    angle
}

impl Gizmo for RotateGizmo {
    fn mode(&self) -> GizmoMode {
        GizmoMode::Rotate
    }

    fn hit_test(&self, transform: &Transform, ray: &Ray, size: f32) -> Option<(GizmoPart, f32)> {
        let pos = transform.position;
        let thickness = size * Self::RING_THICKNESS;

        let mut closest: Option<(GizmoPart, f32)> = None;
        for axis in Axis::ALL {
            let Some(hit) = ray.intersect_plane(pos, axis.unit()) else {
                continue;
            };

            // Distance from the ring center within the ring's plane
            let radial = (hit - pos).with(axis, 0.0).length();
            if (radial - size).abs() < thickness {
                let t = (hit - ray.origin).length();
                if closest.map_or(true, |(_, best)| t < best) {
                    closest = Some((GizmoPart::Ring(axis), t));
                }
            }
        }

        closest
    }

    fn begin_interaction(&self, part: GizmoPart, transform: &Transform, ray: &Ray) -> InteractionState {
        let axis = match part {
            GizmoPart::Ring(axis) => axis,
            _ => Axis::Y,
        };

        let mut state = InteractionState::new(part, transform, axis.unit(), ray);
        if let Some(hit) = state.start_hit {
            state.start_angle = ring_angle(axis, hit - transform.position);
        }
        state
    }

    fn update_interaction(
        &self,
        state: &mut InteractionState,
        ray: &Ray,
        snap: Option<f32>,
    ) -> TransformDelta {
        let mut delta = TransformDelta::default();

        let GizmoPart::Ring(axis) = state.active_part else {
            return delta;
        };
        if state.start_hit.is_none() {
            return delta;
        }

        let center = state.start_transform.position;
        if let Some(hit) = ray.intersect_plane(center, state.plane_normal) {
            let mut angle = wrap_angle(ring_angle(axis, hit - center) - state.start_angle);

            // Snap is given in degrees
            if let Some(step) = snap {
                angle = snap_value(angle, radians(step));
            }

            delta.rotation[axis] = angle;
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
    fn test_hit_ring_facing_camera() {
        let gizmo = RotateGizmo::new();
        let hit = gizmo.hit_test(&Transform::new(), &camera_ray_to(Vec3::new(1.0, 0.0, 0.0)), 1.0);
        assert_eq!(hit.map(|(p, _)| p), Some(GizmoPart::Ring(Axis::Z)));

        let miss = gizmo.hit_test(&Transform::new(), &camera_ray_to(Vec3::new(0.5, 0.0, 0.0)), 1.0);
        assert!(miss.is_none());
    }

    #[test]
    fn test_quarter_turn() {
        let gizmo = RotateGizmo::new();
        let t = Transform::new();
        let part = GizmoPart::Ring(Axis::Z);

        let mut state = gizmo.begin_interaction(part, &t, &camera_ray_to(Vec3::new(1.0, 0.0, 0.0)));
        let delta = gizmo.update_interaction(&mut state, &camera_ray_to(Vec3::new(0.0, 1.0, 0.0)), Some(5.0));

        assert!((delta.rotation.z - consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(delta.rotation.x, 0.0);
    }

    #[test]
    fn test_wrap_across_pi() {
        let gizmo = RotateGizmo::new();
        let part = GizmoPart::Ring(Axis::Z);

        let mut state = gizmo.begin_interaction(part, &Transform::new(), &camera_ray_to(Vec3::new(-1.0, 0.1, 0.0)));
        let delta = gizmo.update_interaction(&mut state, &camera_ray_to(Vec3::new(-1.0, -0.1, 0.0)), None);

        // A small step across the seam stays small
        assert!(delta.rotation.z.abs() < 0.3);
    }
}
