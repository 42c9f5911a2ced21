//! Asset records as stored by the hosted backend.

use ar_math::Vec3;
use serde::{Deserialize, Serialize};

/// Content type of an AR asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetKind {
    /// Flat image anchored to recognition of a reference picture
    ImageTarget,
    /// 3D model anchored to a tracked physical object
    ObjectTracking,
    /// 3D model placed freely in the scene
    ObjectPlacement,
}

impl AssetKind {
    pub fn wire_name(&self) -> &'static str {
        match self {
            AssetKind::ImageTarget => "image_target",
            AssetKind::ObjectTracking => "object_tracking",
            AssetKind::ObjectPlacement => "object_placement",
        }
    }

    /// Image targets render as a textured plane; every other kind is a model.
    pub fn is_image(&self) -> bool {
        matches!(self, AssetKind::ImageTarget)
    }
}

impl From<String> for AssetKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "image_target" => AssetKind::ImageTarget,
            "object_tracking" => AssetKind::ObjectTracking,
            "object_placement" => AssetKind::ObjectPlacement,
            other => {
                log::warn!("Unknown asset kind '{}', treating as object placement", other);
                AssetKind::ObjectPlacement
            }
        }
    }
}

impl From<AssetKind> for String {
    fn from(kind: AssetKind) -> Self {
        kind.wire_name().to_string()
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Read-only handle the editor keeps for the selected asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetReference {
    pub id: String,
    pub resource_url: String,
    pub kind: AssetKind,
}

/// Full asset record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub resource_url: String,
    pub kind: AssetKind,
    #[serde(default)]
    pub published: bool,
    #[serde(default = "default_position")]
    pub position: Vec3,
    #[serde(default = "default_rotation")]
    pub rotation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
}

fn default_position() -> Vec3 {
    Vec3::ZERO
}

fn default_rotation() -> Vec3 {
    Vec3::ZERO
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

impl AssetRecord {
    /// Record with default transform fields.
    pub fn new(id: impl Into<String>, resource_url: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            resource_url: resource_url.into(),
            kind,
            published: false,
            position: default_position(),
            rotation: default_rotation(),
            scale: default_scale(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn reference(&self) -> AssetReference {
        AssetReference {
            id: self.id.clone(),
            resource_url: self.resource_url.clone(),
            kind: self.kind,
        }
    }

    pub fn transform_payload(&self) -> TransformPayload {
        TransformPayload {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    pub fn apply_payload(&mut self, payload: &TransformPayload) {
        self.position = payload.position;
        self.rotation = payload.rotation;
        self.scale = payload.scale;
    }
}

/// Transform fields written on save:
/// `{ position: {x,y,z}, rotation: {x,y,z}, scale: {x,y,z} }`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformPayload {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names() {
        let kind: AssetKind = serde_json::from_str("\"image_target\"").unwrap();
        assert_eq!(kind, AssetKind::ImageTarget);
        assert_eq!(serde_json::to_string(&AssetKind::ObjectTracking).unwrap(), "\"object_tracking\"");

        let unknown: AssetKind = serde_json::from_str("\"hologram\"").unwrap();
        assert_eq!(unknown, AssetKind::ObjectPlacement);
    }

    #[test]
    fn test_record_missing_transform_uses_defaults() {
        let record: AssetRecord = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "resource_url": "https://cdn.example/a1.png",
            "kind": "image_target",
        }))
        .unwrap();

        assert_eq!(record.position, Vec3::ZERO);
        assert_eq!(record.rotation, Vec3::ZERO);
        assert_eq!(record.scale, Vec3::ONE);
        assert!(!record.published);
    }

    #[test]
    fn test_payload_shape() {
        let payload = TransformPayload {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        };
        let json = serde_json::to_value(payload).unwrap();
        assert_eq!(json["position"], serde_json::json!({ "x": 1.0, "y": 2.0, "z": 3.0 }));
        assert_eq!(json["scale"], serde_json::json!({ "x": 1.0, "y": 1.0, "z": 1.0 }));
    }
}
