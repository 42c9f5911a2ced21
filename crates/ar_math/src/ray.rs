//! 3D Ray for picking
//!
//! Rays come from the host's pointer unprojection and drive gizmo hit
//! testing and drag math.

use crate::vector::Vec3;

/// 3D ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin point
    pub origin: Vec3,
    /// Ray direction (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with normalized direction
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray from two points
    #[inline]
    pub fn from_points(start: Vec3, end: Vec3) -> Self {
        Self::new(start, end - start)
    }

    /// Get a point at distance t along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Get the closest point on the ray to a given point
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let t = (point - self.origin).dot(self.direction);
        if t <= 0.0 {
            self.origin
        } else {
            self.at(t)
        }
    }

    /// Get the distance from a point to the ray
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        (point - self.closest_point(point)).length()
    }

    /// Intersect with the plane through `point` with `normal`.
    ///
    /// Returns the hit point, or `None` when the ray is parallel to the
    /// plane or the plane lies behind the origin.
    pub fn intersect_plane(&self, point: Vec3, normal: Vec3) -> Option<Vec3> {
        let denom = normal.dot(self.direction);
        if denom.abs() < 1e-4 {
            return None;
        }

        let t = (point - self.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }

        Some(self.at(t))
    }

    /// Shortest distance between this ray and the segment `start..end`.
    pub fn distance_to_segment(&self, start: Vec3, end: Vec3) -> f32 {
        let seg = end - start;
        let w0 = self.origin - start;
        let a = self.direction.dot(self.direction);
        let b = self.direction.dot(seg);
        let c = seg.dot(seg);
        let d = self.direction.dot(w0);
        let e = seg.dot(w0);
        let denom = a * c - b * b;

        let (mut s, mut t) = if denom.abs() < 1e-8 {
            (0.0, if c > 0.0 { e / c } else { 0.0 })
        } else {
            ((b * e - c * d) / denom, (a * e - b * d) / denom)
        };

        if t < 0.0 {
            t = 0.0;
            s = -d / a;
        } else if t > 1.0 {
            t = 1.0;
            s = (b - d) / a;
        }
        let s = s.max(0.0);

        let on_ray = self.at(s);
        let on_seg = start + seg * t;
        (on_ray - on_seg).length()
    }

    /// Check if the ray direction is valid (non-zero length)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.direction.length_squared() > 1e-10
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self { origin: Vec3::ZERO, direction: Vec3::Z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_direction_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));
        assert!((ray.direction.length() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_distance_to_point() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(ray.distance_to_point(Vec3::new(0.0, 0.0, 5.0)) < 0.001);
        assert!((ray.distance_to_point(Vec3::new(1.0, 0.0, 5.0)) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_plane_hit() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = ray.intersect_plane(Vec3::ZERO, Vec3::Y).unwrap();
        assert!(hit.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn test_ray_plane_parallel_or_behind() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X);
        assert!(ray.intersect_plane(Vec3::ZERO, Vec3::Y).is_none());

        let away = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(away.intersect_plane(Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn test_ray_segment_distance() {
        // Ray along -Z passing one unit above the X axis segment
        let ray = Ray::new(Vec3::new(0.5, 1.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let d = ray.distance_to_segment(Vec3::ZERO, Vec3::X);
        assert!((d - 1.0).abs() < 1e-4);
    }
}
