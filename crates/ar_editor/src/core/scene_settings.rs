//! Lighting, material and grid settings of the preview scene.
//!
//! These are not part of the asset's transform and are never recorded in
//! history.

use ar_math::Vec3;
use serde::{Deserialize, Serialize};

/// 8-bit RGB color. Serializes as `"#rrggbb"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Placeholder geometry color when the asset cannot be shown
    pub const FALLBACK: Color = Color::rgb(0xcc, 0xcc, 0xcc);
    pub const GRID: Color = Color::rgb(0x4a, 0x4a, 0x4a);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear 0..1 components.
    pub fn to_f32(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s).ok_or_else(|| format!("invalid color '{}'", s))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Preview scene settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub ambient_intensity: f32,
    pub light_position: Vec3,
    pub light_intensity: f32,
    pub material_color: Color,
    pub show_grid: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.5,
            light_position: Vec3::splat(5.0),
            light_intensity: 1.0,
            material_color: Color::WHITE,
            show_grid: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#cccccc"), Some(Color::FALLBACK));
        assert_eq!(Color::from_hex("4A4A4A"), Some(Color::GRID));
        assert_eq!(Color::from_hex("#ccc"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
        assert_eq!(Color::from_hex("#+f+f+f"), None);
        assert_eq!(Color::from_hex("+fffff"), None);
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
    }

    #[test]
    fn test_settings_toml() {
        let settings: SceneSettings = toml::from_str(
            r##"
            ambient_intensity = 0.25
            material_color = "#ff0000"
            "##,
        )
        .unwrap();

        assert_eq!(settings.ambient_intensity, 0.25);
        assert_eq!(settings.material_color, Color::rgb(255, 0, 0));
        assert_eq!(settings.light_position, Vec3::splat(5.0));
        assert!(settings.show_grid);
    }
}
