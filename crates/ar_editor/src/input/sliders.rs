//! Range sliders for the transform and the scene lighting.

use ar_math::{clamp, consts, Axis};

use crate::core::{SceneSettings, Transform, TransformChannel};

/// Inclusive slider range with its UI step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        clamp(value, self.min, self.max)
    }
}

/// What a slider controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SliderTarget {
    /// One transform component, in stored units (radians for rotation)
    Transform { channel: TransformChannel, axis: Axis },
    AmbientIntensity,
    LightPosition(Axis),
}

impl SliderTarget {
    pub const POSITION: SliderRange = SliderRange::new(-5.0, 5.0, 0.1);
    pub const ROTATION: SliderRange = SliderRange::new(-consts::PI, consts::PI, 0.01);
    pub const SCALE: SliderRange = SliderRange::new(0.1, 5.0, 0.1);
    pub const AMBIENT: SliderRange = SliderRange::new(0.0, 1.0, 0.01);
    pub const LIGHT: SliderRange = SliderRange::new(-10.0, 10.0, 0.1);

    pub fn transform(channel: TransformChannel, axis: Axis) -> Self {
        SliderTarget::Transform { channel, axis }
    }

    pub fn range(&self) -> SliderRange {
        match self {
            SliderTarget::Transform { channel, .. } => match channel {
                TransformChannel::Position => Self::POSITION,
                TransformChannel::Rotation => Self::ROTATION,
                TransformChannel::Scale => Self::SCALE,
            },
            SliderTarget::AmbientIntensity => Self::AMBIENT,
            SliderTarget::LightPosition(_) => Self::LIGHT,
        }
    }

    /// Whether moving this slider edits the asset's transform.
    pub fn is_transform(&self) -> bool {
        matches!(self, SliderTarget::Transform { .. })
    }

    /// Current value, clamped into the slider's range for display.
    pub fn value(&self, transform: &Transform, settings: &SceneSettings) -> f32 {
        let raw = match *self {
            SliderTarget::Transform { channel, axis } => transform.component(channel, axis),
            SliderTarget::AmbientIntensity => settings.ambient_intensity,
            SliderTarget::LightPosition(axis) => settings.light_position[axis],
        };
        self.range().clamp(raw)
    }

    /// Clamp a new slider value. Non-finite input falls back to `current`.
    pub fn resolve(&self, value: f32, current: f32) -> f32 {
        let value = if value.is_finite() { value } else { current };
        self.range().clamp(value)
    }

    pub fn label(&self) -> String {
        match self {
            SliderTarget::Transform { channel, axis } => {
                format!("{} {}", channel, axis.name().to_ascii_uppercase())
            }
            SliderTarget::AmbientIntensity => "Ambient Intensity".to_string(),
            SliderTarget::LightPosition(axis) => {
                format!("Directional Light {}", axis.name().to_ascii_uppercase())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_clamp() {
        let rot = SliderTarget::transform(TransformChannel::Rotation, Axis::X);
        assert_eq!(rot.resolve(10.0, 0.0), consts::PI);
        assert_eq!(rot.resolve(-10.0, 0.0), -consts::PI);

        let scale = SliderTarget::transform(TransformChannel::Scale, Axis::X);
        assert_eq!(scale.resolve(0.0, 1.0), 0.1);
        assert_eq!(scale.resolve(9.0, 1.0), 5.0);

        let pos = SliderTarget::transform(TransformChannel::Position, Axis::Y);
        assert_eq!(pos.resolve(f32::NAN, 2.0), 2.0);

        assert_eq!(SliderTarget::AmbientIntensity.resolve(1.5, 0.5), 1.0);
        assert_eq!(SliderTarget::LightPosition(Axis::Z).resolve(-20.0, 5.0), -10.0);
    }

    #[test]
    fn test_value_reads_settings() {
        let settings = SceneSettings::default();
        let t = Transform::new();
        assert_eq!(SliderTarget::AmbientIntensity.value(&t, &settings), 0.5);
        assert_eq!(SliderTarget::LightPosition(Axis::Y).value(&t, &settings), 5.0);
        assert!(!SliderTarget::AmbientIntensity.is_transform());
    }
}
