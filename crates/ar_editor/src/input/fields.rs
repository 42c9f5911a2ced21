//! Numeric entry fields.
//!
//! One field per channel and axis. Rotation fields show and accept
//! degrees; everything else is stored as entered.

use ar_math::{degrees, radians, Axis};

use crate::commands::TransformCommand;
use crate::core::{Transform, TransformChannel};

/// A numeric field bound to one transform component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NumericField {
    pub channel: TransformChannel,
    pub axis: Axis,
}

impl NumericField {
    pub const fn new(channel: TransformChannel, axis: Axis) -> Self {
        Self { channel, axis }
    }

    /// Every field in panel order.
    pub fn all() -> impl Iterator<Item = NumericField> {
        TransformChannel::ALL
            .into_iter()
            .flat_map(|channel| Axis::ALL.into_iter().map(move |axis| NumericField::new(channel, axis)))
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.channel, self.axis.name().to_ascii_uppercase())
    }

    /// Value shown in the field.
    pub fn display_value(&self, transform: &Transform) -> f32 {
        let stored = transform.component(self.channel, self.axis);
        match self.channel {
            TransformChannel::Rotation => degrees(stored),
            _ => stored,
        }
    }

    /// Stored value for an entered display value, with malformed input
    /// coerced: position keeps its current value, rotation becomes 0 and
    /// scale becomes 1 (also for an entered 0).
    pub fn resolve(&self, input: Option<f32>, current: &Transform) -> f32 {
        let input = input.filter(|v| v.is_finite());
        match self.channel {
            TransformChannel::Position => input.unwrap_or_else(|| current.position[self.axis]),
            TransformChannel::Rotation => input.map(radians).unwrap_or(0.0),
            TransformChannel::Scale => input.filter(|v| *v != 0.0).unwrap_or(1.0),
        }
    }

    /// Parse and resolve raw field text.
    pub fn resolve_text(&self, text: &str, current: &Transform) -> f32 {
        self.resolve(parse_number(text), current)
    }

    /// Command writing `stored` into this field's component.
    ///
    /// With uniform scale on, a scale field writes all three axes.
    pub fn command(&self, stored: f32, uniform_scale: bool) -> TransformCommand {
        if uniform_scale && self.channel == TransformChannel::Scale {
            TransformCommand::SetUniformScale(stored)
        } else {
            TransformCommand::SetComponent {
                channel: self.channel,
                axis: self.axis,
                value: stored,
            }
        }
    }
}

/// Parse field text. Empty, non-numeric and non-finite input yield `None`.
pub fn parse_number(text: &str) -> Option<f32> {
    text.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_math::{consts, Vec3};

    #[test]
    fn test_rotation_degrees_round_trip() {
        let field = NumericField::new(TransformChannel::Rotation, Axis::Y);
        let t = Transform::new();

        let stored = field.resolve_text("90", &t);
        assert!((stored - consts::FRAC_PI_2).abs() < 1e-6);

        let shown = field.display_value(&t.with_rotation(Vec3::new(0.0, stored, 0.0)));
        assert!((shown - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_coercion() {
        let t = Transform::new().with_position(Vec3::new(1.5, 0.0, 0.0));
        let pos = NumericField::new(TransformChannel::Position, Axis::X);
        let rot = NumericField::new(TransformChannel::Rotation, Axis::X);
        let scale = NumericField::new(TransformChannel::Scale, Axis::X);

        assert_eq!(pos.resolve_text("abc", &t), 1.5);
        assert_eq!(pos.resolve_text("", &t), 1.5);
        assert_eq!(pos.resolve(Some(f32::NAN), &t), 1.5);
        assert_eq!(rot.resolve_text("NaN", &t), 0.0);
        assert_eq!(scale.resolve_text("", &t), 1.0);
        assert_eq!(scale.resolve_text("0", &t), 1.0);
        assert_eq!(scale.resolve_text("inf", &t), 1.0);
        assert_eq!(scale.resolve_text(" 2.5 ", &t), 2.5);
    }

    #[test]
    fn test_uniform_scale_command() {
        let field = NumericField::new(TransformChannel::Scale, Axis::Z);
        assert_eq!(field.command(2.0, true), TransformCommand::SetUniformScale(2.0));
        assert_eq!(
            field.command(2.0, false),
            TransformCommand::SetComponent { channel: TransformChannel::Scale, axis: Axis::Z, value: 2.0 }
        );

        // Uniform mode only affects scale
        let pos = NumericField::new(TransformChannel::Position, Axis::Z);
        assert!(matches!(pos.command(2.0, true), TransformCommand::SetComponent { .. }));
    }

    #[test]
    fn test_all_fields() {
        let labels: Vec<String> = NumericField::all().map(|f| f.label()).collect();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[0], "Position X");
        assert_eq!(labels[8], "Scale Z");
    }
}
