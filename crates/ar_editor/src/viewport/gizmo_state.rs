//! Gizmo state management.
//!
//! Tracks current gizmo mode, per-axis constraints, snapping and the
//! active drag.

use std::time::Duration;

use ar_math::{Axis, Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::Transform;
use crate::error::{EditorError, EditorResult};
use crate::viewport::gizmos::{
    Gizmo, GizmoMode, GizmoPart, InteractionState, RotateGizmo, ScaleGizmo, TranslateGizmo,
};

/// Snap settings for gizmo operations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Enable snap
    pub enabled: bool,
    /// Translation snap value (units)
    pub translate: f32,
    /// Rotation snap value (degrees)
    pub rotate: f32,
    /// Scale snap value (multiplier)
    pub scale: f32,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            translate: 0.1,
            rotate: 5.0,
            scale: 0.1,
        }
    }
}

impl SnapSettings {
    /// Snap step for `mode`, if snapping is on.
    pub fn for_mode(&self, mode: GizmoMode) -> Option<f32> {
        if !self.enabled {
            return None;
        }
        Some(match mode {
            GizmoMode::Translate => self.translate,
            GizmoMode::Rotate => self.rotate,
            GizmoMode::Scale => self.scale,
        })
    }
}

/// When a gizmo drag is written to history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DragCommit {
    /// One history entry when the pointer is released
    OnRelease,
    /// Also commit while dragging, at most once per interval
    Continuous { min_interval_ms: u64 },
}

impl Default for DragCommit {
    fn default() -> Self {
        DragCommit::OnRelease
    }
}

impl DragCommit {
    pub fn continuous(min_interval: Duration) -> Self {
        DragCommit::Continuous {
            min_interval_ms: min_interval.as_millis() as u64,
        }
    }

    pub fn min_interval(&self) -> Option<Duration> {
        match self {
            DragCommit::OnRelease => None,
            DragCommit::Continuous { min_interval_ms } => Some(Duration::from_millis(*min_interval_ms)),
        }
    }
}

/// Per-mode, per-axis enable flags. All axes start enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisConstraints {
    translate: [bool; 3],
    rotate: [bool; 3],
    scale: [bool; 3],
}

impl Default for AxisConstraints {
    fn default() -> Self {
        Self {
            translate: [true; 3],
            rotate: [true; 3],
            scale: [true; 3],
        }
    }
}

impl AxisConstraints {
    fn flags(&self, mode: GizmoMode) -> &[bool; 3] {
        match mode {
            GizmoMode::Translate => &self.translate,
            GizmoMode::Rotate => &self.rotate,
            GizmoMode::Scale => &self.scale,
        }
    }

    fn flags_mut(&mut self, mode: GizmoMode) -> &mut [bool; 3] {
        match mode {
            GizmoMode::Translate => &mut self.translate,
            GizmoMode::Rotate => &mut self.rotate,
            GizmoMode::Scale => &mut self.scale,
        }
    }

    pub fn is_enabled(&self, mode: GizmoMode, axis: Axis) -> bool {
        self.flags(mode)[axis.index()]
    }

    pub fn set(&mut self, mode: GizmoMode, axis: Axis, enabled: bool) {
        self.flags_mut(mode)[axis.index()] = enabled;
    }

    /// Flip one axis; returns the new state.
    pub fn toggle(&mut self, mode: GizmoMode, axis: Axis) -> bool {
        let flag = &mut self.flags_mut(mode)[axis.index()];
        *flag = !*flag;
        *flag
    }

    pub fn enabled_axes(&self, mode: GizmoMode) -> [bool; 3] {
        *self.flags(mode)
    }

    /// A part is usable when every axis it moves is enabled.
    pub fn allows(&self, part: GizmoPart) -> bool {
        let mode = part.mode();
        part.axes().into_iter().all(|axis| self.is_enabled(mode, axis))
    }
}

/// State for gizmo system.
#[derive(Debug)]
pub struct GizmoState {
    /// Current gizmo mode
    pub mode: GizmoMode,
    /// Snap settings
    pub snap: SnapSettings,
    /// Axis enable flags
    pub constraints: AxisConstraints,
    /// Currently hovered gizmo part
    pub hovered_part: Option<GizmoPart>,
    /// Active interaction state (if interacting)
    pub interaction: Option<InteractionState>,
    /// Gizmo size (based on camera distance)
    pub gizmo_scale: f32,

    translate_gizmo: TranslateGizmo,
    rotate_gizmo: RotateGizmo,
    scale_gizmo: ScaleGizmo,
}

impl Default for GizmoState {
    fn default() -> Self {
        Self::new()
    }
}

impl GizmoState {
    pub fn new() -> Self {
        Self {
            mode: GizmoMode::Translate,
            snap: SnapSettings::default(),
            constraints: AxisConstraints::default(),
            hovered_part: None,
            interaction: None,
            gizmo_scale: 1.0,
            translate_gizmo: TranslateGizmo::new(),
            rotate_gizmo: RotateGizmo::new(),
            scale_gizmo: ScaleGizmo::new(),
        }
    }

    pub fn with_snap(mut self, snap: SnapSettings) -> Self {
        self.snap = snap;
        self
    }

    /// Set the gizmo mode. Ignored while dragging.
    pub fn set_mode(&mut self, mode: GizmoMode) -> bool {
        if self.interaction.is_some() {
            return false;
        }
        self.mode = mode;
        self.hovered_part = None;
        true
    }

    /// Toggle snap on/off.
    pub fn toggle_snap(&mut self) {
        self.snap.enabled = !self.snap.enabled;
    }

    pub fn is_interacting(&self) -> bool {
        self.interaction.is_some()
    }

    pub fn active_part(&self) -> Option<GizmoPart> {
        self.interaction.as_ref().map(|s| s.active_part)
    }

    fn gizmo(&self, mode: GizmoMode) -> &dyn Gizmo {
        match mode {
            GizmoMode::Translate => &self.translate_gizmo,
            GizmoMode::Rotate => &self.rotate_gizmo,
            GizmoMode::Scale => &self.scale_gizmo,
        }
    }

    /// Hit test the current gizmo. Disabled parts are not pickable.
    pub fn hit_test(&mut self, transform: &Transform, ray: &Ray) -> Option<GizmoPart> {
        let part = self
            .gizmo(self.mode)
            .hit_test(transform, ray, self.gizmo_scale)
            .map(|(part, _)| part)
            .filter(|part| self.constraints.allows(*part));
        self.hovered_part = part;
        part
    }

    /// Begin dragging `part`.
    pub fn begin_interaction(&mut self, part: GizmoPart, transform: &Transform, ray: &Ray) -> EditorResult<()> {
        if self.interaction.is_some() {
            return Err(EditorError::DragInProgress);
        }
        if part.mode() != self.mode {
            return Err(EditorError::PartMismatch { part, mode: self.mode });
        }
        if let Some(axis) = part
            .axes()
            .into_iter()
            .find(|axis| !self.constraints.is_enabled(self.mode, *axis))
        {
            return Err(EditorError::AxisDisabled { mode: self.mode, axis });
        }

        let state = self.gizmo(self.mode).begin_interaction(part, transform, ray);
        self.interaction = Some(state);
        Ok(())
    }

    /// Update the current interaction and return the preview transform.
    pub fn update_interaction(&mut self, ray: &Ray) -> Option<Transform> {
        // Take state out to avoid borrow conflict
        let mut state = self.interaction.take()?;

        let snap = self.snap.for_mode(self.mode);
        self.gizmo(self.mode).update_interaction(&mut state, ray, snap);
        let preview = state.preview();

        self.interaction = Some(state);
        Some(preview)
    }

    /// End the current interaction.
    pub fn end_interaction(&mut self) -> Option<InteractionState> {
        self.interaction.take()
    }

    /// Update gizmo size based on camera distance.
    pub fn update_scale(&mut self, camera_pos: Vec3, target_pos: Vec3) {
        let distance = (camera_pos - target_pos).length();

        // Constant screen size
        self.gizmo_scale = (distance * 0.15).clamp(0.1, 10.0);
    }

    /// Forget the drag and hover state and re-enable every axis.
    pub fn reset(&mut self) {
        self.interaction = None;
        self.hovered_part = None;
        self.constraints = AxisConstraints::default();
    }
}
