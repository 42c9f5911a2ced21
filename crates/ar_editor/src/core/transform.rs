//! The edited object's placement.

use ar_backend::{AssetRecord, TransformPayload};
use ar_math::{Axis, Mat4, Vec3};

/// Position, Euler XYZ rotation (radians) and per-axis scale.
///
/// Scale is not clamped and rotation is never wrapped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new() -> Self {
        Self::IDENTITY
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn channel(&self, channel: TransformChannel) -> Vec3 {
        match channel {
            TransformChannel::Position => self.position,
            TransformChannel::Rotation => self.rotation,
            TransformChannel::Scale => self.scale,
        }
    }

    pub fn channel_mut(&mut self, channel: TransformChannel) -> &mut Vec3 {
        match channel {
            TransformChannel::Position => &mut self.position,
            TransformChannel::Rotation => &mut self.rotation,
            TransformChannel::Scale => &mut self.scale,
        }
    }

    pub fn component(&self, channel: TransformChannel, axis: Axis) -> f32 {
        self.channel(channel)[axis]
    }

    /// Model matrix `T * Rx * Ry * Rz * S`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_euler_translation(self.scale, self.rotation, self.position)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }

    /// Replace unusable components.
    ///
    /// Non-finite position components fall back to `fallback`, non-finite
    /// rotation components become 0, and non-finite or zero scale
    /// components become 1.
    pub fn sanitized(mut self, fallback: &Transform) -> Self {
        for axis in Axis::ALL {
            if !self.position[axis].is_finite() {
                self.position[axis] = fallback.position[axis];
            }
            if !self.rotation[axis].is_finite() {
                self.rotation[axis] = 0.0;
            }
            let scale = self.scale[axis];
            if !scale.is_finite() || scale == 0.0 {
                self.scale[axis] = 1.0;
            }
        }
        self
    }

    pub fn from_record(record: &AssetRecord) -> Self {
        Self {
            position: record.position,
            rotation: record.rotation,
            scale: record.scale,
        }
        .sanitized(&Self::IDENTITY)
    }

    pub fn to_payload(&self) -> TransformPayload {
        TransformPayload {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }
}

/// One of the three vector channels of a [`Transform`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformChannel {
    Position,
    Rotation,
    Scale,
}

impl TransformChannel {
    pub const ALL: [TransformChannel; 3] = [
        TransformChannel::Position,
        TransformChannel::Rotation,
        TransformChannel::Scale,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransformChannel::Position => "Position",
            TransformChannel::Rotation => "Rotation",
            TransformChannel::Scale => "Scale",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "position" | "pos" | "p" => Some(TransformChannel::Position),
            "rotation" | "rot" | "r" => Some(TransformChannel::Rotation),
            "scale" | "s" => Some(TransformChannel::Scale),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransformChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_backend::AssetKind;

    #[test]
    fn test_defaults() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_sanitized() {
        let previous = Transform::new().with_position(Vec3::new(1.0, 2.0, 3.0));
        let broken = Transform {
            position: Vec3::new(f32::NAN, 5.0, f32::INFINITY),
            rotation: Vec3::new(0.5, f32::NAN, 0.0),
            scale: Vec3::new(0.0, f32::NAN, 2.0),
        };

        let fixed = broken.sanitized(&previous);
        assert_eq!(fixed.position, Vec3::new(1.0, 5.0, 3.0));
        assert_eq!(fixed.rotation, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(fixed.scale, Vec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_matrix_places_origin_at_position() {
        let t = Transform::new()
            .with_position(Vec3::new(1.0, -2.0, 0.5))
            .with_uniform_scale(3.0);
        let origin = t.matrix().transform_point(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(1.0, -2.0, 0.5), 1e-6));
        let x = t.matrix().transform_vector(Vec3::X);
        assert!(x.abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_from_record_and_payload() {
        let mut record = AssetRecord::new("a", "https://cdn.example/a.glb", AssetKind::ObjectPlacement);
        record.scale = Vec3::new(2.0, 0.0, 2.0);
        let t = Transform::from_record(&record);
        assert_eq!(t.scale, Vec3::new(2.0, 1.0, 2.0));
        assert_eq!(t.to_payload().scale, t.scale);
    }

    #[test]
    fn test_channel_parse() {
        assert_eq!(TransformChannel::parse("ROT"), Some(TransformChannel::Rotation));
        assert_eq!(TransformChannel::parse("size"), None);
    }
}
