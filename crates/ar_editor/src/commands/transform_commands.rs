//! Transform edit commands.
//!
//! Every input surface (gizmo, numeric fields, sliders, shortcuts) turns a
//! user action into one of these and hands it to the session, which
//! computes the new transform and records it.

use ar_math::{Axis, Vec3};

use crate::core::{Transform, TransformChannel};

/// A single edit of the selected asset's transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformCommand {
    /// Replace the whole transform (gizmo commits, history restores)
    Set(Transform),
    /// Replace one channel
    SetChannel { channel: TransformChannel, value: Vec3 },
    /// Replace one component of one channel
    SetComponent { channel: TransformChannel, axis: Axis, value: f32 },
    /// Set all three scale axes to the same value
    SetUniformScale(f32),
    /// Move by a delta
    Translate(Vec3),
    /// Rotate by Euler deltas (radians)
    Rotate(Vec3),
    /// Multiply scale per axis
    ScaleBy(Vec3),
    /// Back to the default transform
    Reset,
}

impl TransformCommand {
    /// Human-readable description for status messages.
    pub fn description(&self) -> &'static str {
        match self {
            TransformCommand::Set(_) => "Set Transform",
            TransformCommand::SetChannel { channel, .. } | TransformCommand::SetComponent { channel, .. } => {
                match channel {
                    TransformChannel::Position => "Set Position",
                    TransformChannel::Rotation => "Set Rotation",
                    TransformChannel::Scale => "Set Scale",
                }
            }
            TransformCommand::SetUniformScale(_) => "Set Uniform Scale",
            TransformCommand::Translate(_) => "Move",
            TransformCommand::Rotate(_) => "Rotate",
            TransformCommand::ScaleBy(_) => "Scale",
            TransformCommand::Reset => "Reset Transform",
        }
    }

    /// The transform that results from applying this command to `current`.
    pub fn apply(&self, current: &Transform) -> Transform {
        let mut next = *current;
        match *self {
            TransformCommand::Set(transform) => next = transform,
            TransformCommand::SetChannel { channel, value } => *next.channel_mut(channel) = value,
            TransformCommand::SetComponent { channel, axis, value } => next.channel_mut(channel)[axis] = value,
            TransformCommand::SetUniformScale(value) => next.scale = Vec3::splat(value),
            TransformCommand::Translate(delta) => next.position += delta,
            TransformCommand::Rotate(delta) => next.rotation += delta,
            TransformCommand::ScaleBy(factor) => next.scale = next.scale.mul_elem(factor),
            TransformCommand::Reset => next = Transform::IDENTITY,
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_component() {
        let t = Transform::new();
        let cmd = TransformCommand::SetComponent {
            channel: TransformChannel::Position,
            axis: Axis::Y,
            value: 2.5,
        };
        assert_eq!(cmd.apply(&t).position, Vec3::new(0.0, 2.5, 0.0));
        assert_eq!(cmd.description(), "Set Position");
    }

    #[test]
    fn test_relative_commands() {
        let t = Transform::new().with_position(Vec3::X).with_uniform_scale(2.0);

        assert_eq!(TransformCommand::Translate(Vec3::Y).apply(&t).position, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(
            TransformCommand::ScaleBy(Vec3::new(0.5, 1.0, 2.0)).apply(&t).scale,
            Vec3::new(1.0, 2.0, 4.0)
        );
        assert_eq!(TransformCommand::Rotate(Vec3::Z).apply(&t).rotation, Vec3::Z);
    }

    #[test]
    fn test_reset_and_uniform() {
        let t = Transform::new().with_position(Vec3::splat(3.0));
        assert_eq!(TransformCommand::Reset.apply(&t), Transform::IDENTITY);
        assert_eq!(TransformCommand::SetUniformScale(4.0).apply(&t).scale, Vec3::splat(4.0));
    }
}
