//! Preview camera.

use ar_math::{Mat4, Ray, Vec3};

/// Perspective camera that frames the edited object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::framing(Vec3::ZERO)
    }
}

impl Camera {
    /// Distance from the target along +Z
    pub const DISTANCE: f32 = 5.0;
    pub const FOV_DEGREES: f32 = 60.0;
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;

    /// Camera placed in front of `target`, looking at it.
    pub fn framing(target: Vec3) -> Self {
        Self {
            eye: target + Vec3::new(0.0, 0.0, Self::DISTANCE),
            target,
            up: Vec3::Y,
            fov_degrees: Self::FOV_DEGREES,
            near: Self::NEAR,
            far: Self::FAR,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.eye, self.target, self.up)
    }

    pub fn distance(&self) -> f32 {
        (self.eye - self.target).length()
    }

    /// Ray from the eye through `point`.
    pub fn ray_through(&self, point: Vec3) -> Ray {
        Ray::from_points(self.eye, point)
    }

    /// Ray through a viewport position given in normalized device
    /// coordinates (`-1..1`, +Y up).
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32, aspect_ratio: f32) -> Ray {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward);

        let half_height = (self.fov_degrees.to_radians() * 0.5).tan();
        let half_width = half_height * aspect_ratio;

        let direction = forward + right * (ndc_x * half_width) + up * (ndc_y * half_height);
        Ray::new(self.eye, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing() {
        let camera = Camera::framing(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.eye, Vec3::new(1.0, 2.0, 8.0));
        assert_eq!(camera.distance(), 5.0);
        assert_eq!(camera.fov_degrees, 60.0);
    }

    #[test]
    fn test_view_matrix_moves_target_in_front() {
        let camera = Camera::default();
        let target_in_view = camera.view_matrix().transform_point(camera.target);
        assert!(target_in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), 1e-5));
    }

    #[test]
    fn test_center_ray_hits_target() {
        let camera = Camera::default();
        let ray = camera.ray_from_ndc(0.0, 0.0, 16.0 / 9.0);
        assert!(ray.distance_to_point(camera.target) < 1e-5);

        let right = camera.ray_from_ndc(1.0, 0.0, 1.0);
        assert!(right.direction.x > 0.0);
    }
}
