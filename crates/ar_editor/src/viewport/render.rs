//! Per-frame render description.
//!
//! The host owns the GPU and the window; each frame it asks the session
//! for a [`ViewportFrame`] and draws what it describes. Building a frame
//! never fails: an asset that is still loading or could not be loaded is
//! drawn as placeholder geometry in [`Color::FALLBACK`].

use ar_backend::AssetKind;
use ar_math::{Axis, Mat4, Vec3};

use super::gizmos::{colors, GizmoMode, GizmoPart};
use super::Camera;
use crate::assets::{AssetStatus, LoadedAsset};
use crate::core::{Color, EditorSession, Transform};

/// Shape to draw for the asset.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Plane { width: f32, height: f32 },
    Cube { size: f32 },
    /// glTF/GLB model at a URL
    Model { url: String },
}

impl Geometry {
    /// Image targets are shown on a 2x2 plane.
    pub const IMAGE_PLANE: Geometry = Geometry::Plane { width: 2.0, height: 2.0 };
    pub const PLACEHOLDER_CUBE: Geometry = Geometry::Cube { size: 1.0 };

    fn placeholder(kind: AssetKind) -> Self {
        if kind.is_image() {
            Self::IMAGE_PLANE
        } else {
            Self::PLACEHOLDER_CUBE
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Texture URL for image planes
    pub texture: Option<String>,
    pub color: Color,
}

/// The edited asset as it should be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderObject {
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
    /// Extra uniform scale that fits models into view; not part of the transform
    pub fit_scale: f32,
    /// `transform.matrix() * scale(fit_scale)`
    pub model_matrix: Mat4,
    /// Drawn in place of the real resource
    pub placeholder: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub ambient_intensity: f32,
    pub directional_position: Vec3,
    pub directional_intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub size: f32,
    pub divisions: u32,
    pub color: Color,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            size: 20.0,
            divisions: 20,
            color: Color::GRID,
        }
    }
}

/// One drawable gizmo part.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GizmoHandle {
    pub part: GizmoPart,
    pub color: Color,
    pub enabled: bool,
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GizmoOverlay {
    pub mode: GizmoMode,
    pub position: Vec3,
    /// World-space arm length
    pub size: f32,
    pub enabled_axes: [bool; 3],
    /// Snap step of the current mode (degrees for rotation)
    pub snap: Option<f32>,
    pub active: Option<GizmoPart>,
    pub handles: Vec<GizmoHandle>,
}

fn mode_parts(mode: GizmoMode) -> Vec<GizmoPart> {
    match mode {
        GizmoMode::Translate => Axis::ALL
            .into_iter()
            .map(GizmoPart::Axis)
            .chain(Axis::ALL.into_iter().map(GizmoPart::Plane))
            .collect(),
        GizmoMode::Rotate => Axis::ALL.into_iter().map(GizmoPart::Ring).collect(),
        GizmoMode::Scale => Axis::ALL
            .into_iter()
            .map(GizmoPart::Handle)
            .chain(std::iter::once(GizmoPart::Center))
            .collect(),
    }
}

fn part_color(part: GizmoPart) -> Color {
    match part {
        GizmoPart::Axis(axis) | GizmoPart::Plane(axis) | GizmoPart::Ring(axis) | GizmoPart::Handle(axis) => {
            colors::axis(axis)
        }
        GizmoPart::Center => colors::CENTER,
    }
}

/// Everything needed to draw one frame of the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportFrame {
    pub object: Option<RenderObject>,
    pub lighting: Lighting,
    pub grid: Option<Grid>,
    pub gizmo: Option<GizmoOverlay>,
    pub camera: Camera,
    /// Non-fatal inline warning
    pub warning: Option<String>,
    pub loading: bool,
}

impl ViewportFrame {
    pub fn build(session: &EditorSession) -> Self {
        let settings = session.settings();
        let transform = *session.transform();

        let lighting = Lighting {
            ambient_intensity: settings.ambient_intensity,
            directional_position: settings.light_position,
            directional_intensity: settings.light_intensity,
        };
        let grid = settings.show_grid.then(Grid::default);

        let Some(asset) = session.asset() else {
            return Self {
                object: None,
                lighting,
                grid,
                gizmo: None,
                camera: Camera::default(),
                warning: None,
                loading: false,
            };
        };

        let status = session.status();
        let (geometry, texture, fit_scale, placeholder) = match status {
            AssetStatus::Ready(LoadedAsset::Image { .. }) => {
                (Geometry::IMAGE_PLANE, Some(asset.resource_url.clone()), 1.0, false)
            }
            AssetStatus::Ready(loaded @ LoadedAsset::Model { .. }) => (
                Geometry::Model { url: asset.resource_url.clone() },
                None,
                loaded.fit_scale().unwrap_or(1.0),
                false,
            ),
            AssetStatus::Idle | AssetStatus::Loading | AssetStatus::Failed(_) => {
                (Geometry::placeholder(asset.kind), None, 1.0, true)
            }
        };

        let color = if placeholder {
            Color::FALLBACK
        } else {
            settings.material_color
        };

        let object = RenderObject {
            geometry,
            material: Material { texture, color },
            transform,
            fit_scale,
            model_matrix: transform.matrix() * Mat4::from_scale(Vec3::splat(fit_scale)),
            placeholder,
        };

        let gizmo_state = session.gizmo();
        let mode = gizmo_state.mode;
        let active = gizmo_state.active_part();
        let handles = mode_parts(mode)
            .into_iter()
            .map(|part| {
                let enabled = gizmo_state.constraints.allows(part);
                let highlighted = active == Some(part) || gizmo_state.hovered_part == Some(part);
                GizmoHandle {
                    part,
                    color: if !enabled {
                        colors::DISABLED
                    } else if highlighted {
                        colors::HIGHLIGHT
                    } else {
                        part_color(part)
                    },
                    enabled,
                    highlighted,
                }
            })
            .collect();

        let gizmo = GizmoOverlay {
            mode,
            position: transform.position,
            size: gizmo_state.gizmo_scale,
            enabled_axes: gizmo_state.constraints.enabled_axes(mode),
            snap: gizmo_state.snap.for_mode(mode),
            active,
            handles,
        };

        Self {
            object: Some(object),
            lighting,
            grid,
            gizmo: Some(gizmo),
            camera: session.camera(),
            warning: status.warning().map(str::to_string),
            loading: matches!(status, AssetStatus::Loading),
        }
    }
}
