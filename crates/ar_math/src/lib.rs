//! # ar_math - scene math for the AR editor
//!
//! Small, dependency-free math primitives used by the transform editor:
//! vectors for positions/rotations/scales, a column-major 4x4 matrix for
//! model poses, and rays for gizmo picking.

pub mod vector;
pub mod matrix;
pub mod ray;

pub use vector::*;
pub use matrix::*;
pub use ray::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const FRAC_PI_2: f32 = PI / 2.0;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

/// Clamp value between min and max
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min { min }
    else if value > max { max }
    else { value }
}

/// Round `value` to the nearest multiple of `step`. Non-positive steps pass through.
#[inline]
pub fn snap(value: f32, step: f32) -> f32 {
    if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    }
}

/// Approximate equality within `epsilon`.
#[inline]
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

pub mod prelude {
    pub use crate::vector::{Vec3, Vec4};
    pub use crate::matrix::Mat4;
    pub use crate::ray::Ray;
    pub use crate::{radians, degrees, clamp, snap, approx_eq};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_radian_round_trip() {
        let r = radians(90.0);
        assert!(approx_eq(r, consts::FRAC_PI_2, 1e-6));
        assert!(approx_eq(degrees(r), 90.0, 1e-4));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(7.0, -5.0, 5.0), 5.0);
        assert_eq!(clamp(-7.0, -5.0, 5.0), -5.0);
        assert_eq!(clamp(1.5, -5.0, 5.0), 1.5);
    }

    #[test]
    fn test_snap() {
        assert!(approx_eq(snap(0.26, 0.1), 0.3, 1e-6));
        assert_eq!(snap(0.26, 0.0), 0.26);
    }
}
