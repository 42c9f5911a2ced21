//! Editor session.
//!
//! One [`EditorSession`] owns the selected asset, its transform and its
//! history. The gizmo, the numeric fields, the sliders and the keyboard
//! all edit through it, and every surface reads the same
//! [`TransformView`], so they never disagree about the current value.

use std::fmt;
use std::sync::Arc;

use ar_backend::{AssetKind, AssetRecord, AssetReference, AssetStore, StoreError, TransformPayload};
use ar_math::{degrees, Axis, Ray, Vec3};
use tokio::time::Instant;

use super::{Color, EditorPreferences, SceneSettings, Transform, TransformChannel, TransformHistory};
use crate::assets::{AssetLoader, AssetStatus, LoadTicket, LoadedAsset};
use crate::commands::TransformCommand;
use crate::error::{AssetError, EditorError, EditorResult, PublishError};
use crate::input::{KeyInput, NumericField, Shortcut, SliderTarget};
use crate::persistence::{PersistenceBridge, PublishOutcome};
use crate::viewport::gizmos::{GizmoMode, GizmoPart};
use crate::viewport::{Camera, DragCommit, GizmoState, ViewportFrame};

/// Status line message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorMessage {
    Info(String),
    Warning(String),
    Error(String),
}

impl EditorMessage {
    pub fn text(&self) -> &str {
        match self {
            EditorMessage::Info(text) | EditorMessage::Warning(text) | EditorMessage::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EditorMessage::Error(_))
    }
}

impl fmt::Display for EditorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorMessage::Info(text) => write!(f, "{}", text),
            EditorMessage::Warning(text) => write!(f, "warning: {}", text),
            EditorMessage::Error(text) => write!(f, "error: {}", text),
        }
    }
}

/// Read-only projection shared by every input surface.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformView {
    pub asset_id: Option<String>,
    pub asset_name: String,
    pub kind: Option<AssetKind>,
    pub transform: Transform,
    /// Rotation as shown in the numeric fields
    pub rotation_degrees: Vec3,
    pub mode: GizmoMode,
    pub enabled_axes: [bool; 3],
    pub uniform_scale: bool,
    pub show_grid: bool,
    pub dragging: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Unsaved changes since the last load or save
    pub dirty: bool,
    pub published: bool,
    pub history_index: usize,
    pub history_len: usize,
    pub loading: bool,
    pub warning: Option<String>,
    pub message: Option<EditorMessage>,
}

/// The editing session for one selected asset at a time.
pub struct EditorSession {
    bridge: PersistenceBridge,
    asset: Option<AssetReference>,
    asset_name: String,
    published: bool,
    transform: Transform,
    history: TransformHistory,
    gizmo: GizmoState,
    settings: SceneSettings,
    default_settings: SceneSettings,
    uniform_scale: bool,
    status: AssetStatus,
    generation: u64,
    message: Option<EditorMessage>,
    drag_commit: DragCommit,
    last_drag_commit: Option<Instant>,
}

impl EditorSession {
    pub fn new(bridge: PersistenceBridge, prefs: &EditorPreferences) -> Self {
        Self {
            bridge,
            asset: None,
            asset_name: String::new(),
            published: false,
            transform: Transform::IDENTITY,
            history: TransformHistory::with_capacity(prefs.history_capacity),
            gizmo: GizmoState::new().with_snap(prefs.snap),
            settings: prefs.scene,
            default_settings: prefs.scene,
            uniform_scale: prefs.uniform_scale,
            status: AssetStatus::Idle,
            generation: 0,
            message: None,
            drag_commit: prefs.drag_commit,
            last_drag_commit: None,
        }
    }

    /// Session over `store` using the preferences' share origin.
    pub fn with_store(store: Arc<dyn AssetStore>, prefs: &EditorPreferences) -> Self {
        Self::new(PersistenceBridge::new(store, prefs.share_origin.clone()), prefs)
    }

    // Accessors

    pub fn asset(&self) -> Option<&AssetReference> {
        self.asset.as_ref()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn history(&self) -> &TransformHistory {
        &self.history
    }

    pub fn gizmo(&self) -> &GizmoState {
        &self.gizmo
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn status(&self) -> &AssetStatus {
        &self.status
    }

    pub fn message(&self) -> Option<&EditorMessage> {
        self.message.as_ref()
    }

    pub fn bridge(&self) -> &PersistenceBridge {
        &self.bridge
    }

    pub fn uniform_scale(&self) -> bool {
        self.uniform_scale
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    pub fn is_dragging(&self) -> bool {
        self.gizmo.is_interacting()
    }

    pub fn drag_commit(&self) -> DragCommit {
        self.drag_commit
    }

    pub fn set_drag_commit(&mut self, policy: DragCommit) {
        self.drag_commit = policy;
    }

    /// Ticket of the load the session is waiting for, if any.
    pub fn pending_load(&self) -> Option<LoadTicket> {
        match (&self.asset, &self.status) {
            (Some(asset), AssetStatus::Loading) => Some(LoadTicket {
                asset_id: asset.id.clone(),
                generation: self.generation,
            }),
            _ => None,
        }
    }

    /// Camera framing the asset.
    pub fn camera(&self) -> Camera {
        Camera::framing(self.transform.position)
    }

    fn notify(&mut self, message: EditorMessage) {
        match &message {
            EditorMessage::Info(text) => log::info!("{}", text),
            EditorMessage::Warning(text) => log::warn!("{}", text),
            EditorMessage::Error(text) => log::error!("{}", text),
        }
        self.message = Some(message);
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    // Selection and loading

    /// Make `record` the edited asset.
    ///
    /// The history is reset to the record's transform and any drag is
    /// dropped. The returned ticket must accompany the load result.
    pub fn select_asset(&mut self, record: AssetRecord) -> LoadTicket {
        let base = Transform::from_record(&record);

        self.generation += 1;
        self.transform = base;
        self.history.reset(base);
        self.gizmo.reset();
        self.last_drag_commit = None;
        self.published = record.published;
        self.asset_name = record.name.clone();
        self.status = AssetStatus::Loading;
        self.message = None;

        let reference = record.reference();
        log::info!("Selected {} ({})", reference.id, reference.kind);
        let ticket = LoadTicket {
            asset_id: reference.id.clone(),
            generation: self.generation,
        };
        self.asset = Some(reference);
        ticket
    }

    /// Apply a load result. Results for a superseded ticket are discarded.
    pub fn complete_load(&mut self, ticket: &LoadTicket, result: Result<LoadedAsset, AssetError>) -> bool {
        let current = matches!(&self.asset, Some(asset) if asset.id == ticket.asset_id)
            && ticket.generation == self.generation;
        if !current {
            log::debug!(
                "Discarding stale load of {} (generation {}, current {})",
                ticket.asset_id,
                ticket.generation,
                self.generation
            );
            return false;
        }

        match result {
            Ok(loaded) => {
                log::debug!("Loaded {}: {:?}", ticket.asset_id, loaded);
                self.status = AssetStatus::Ready(loaded);
            }
            Err(e) => {
                let warning = format!("Could not load asset resource: {}", e);
                self.status = AssetStatus::Failed(warning.clone());
                self.notify(EditorMessage::Warning(warning));
            }
        }
        true
    }

    /// Load the selected asset's resource with `loader`.
    pub async fn load_selected(&mut self, loader: &dyn AssetLoader) -> bool {
        let (Some(ticket), Some(asset)) = (self.pending_load(), self.asset.clone()) else {
            return false;
        };
        let result = loader.load(&asset).await;
        self.complete_load(&ticket, result)
    }

    /// Fetch `asset_id` from the store and select it.
    pub async fn open_asset(&mut self, asset_id: &str) -> EditorResult<LoadTicket> {
        match self.bridge.fetch(asset_id).await {
            Ok(record) => Ok(self.select_asset(record)),
            Err(e) => {
                let text = match &e {
                    StoreError::NotFound(_) => format!("Asset {} not found", asset_id),
                    other => format!("Could not open {}: {}", asset_id, other),
                };
                self.notify(EditorMessage::Error(text));
                Err(e.into())
            }
        }
    }

    // Editing

    /// Apply a transform edit and record it.
    ///
    /// Returns `false` when the command was rejected or changed nothing.
    pub fn apply(&mut self, command: TransformCommand) -> bool {
        if self.asset.is_none() {
            self.notify(EditorMessage::Warning("No asset selected".into()));
            return false;
        }
        if self.is_dragging() {
            log::debug!("Ignoring {} during a drag", command.description());
            return false;
        }

        let next = command.apply(&self.transform).sanitized(&self.transform);
        if next == self.transform {
            return false;
        }

        log::debug!("{}: {:?}", command.description(), next);
        self.transform = next;
        self.history.record(next);
        true
    }

    pub fn undo(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        match self.history.undo() {
            Some(transform) => {
                self.transform = transform;
                self.notify(EditorMessage::Info("Undo".into()));
                true
            }
            None => {
                self.notify(EditorMessage::Info("Nothing to undo".into()));
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        match self.history.redo() {
            Some(transform) => {
                self.transform = transform;
                self.notify(EditorMessage::Info("Redo".into()));
                true
            }
            None => {
                self.notify(EditorMessage::Info("Nothing to redo".into()));
                false
            }
        }
    }

    /// Reset the transform to identity as one undoable step.
    pub fn reset_transform(&mut self) -> bool {
        self.apply(TransformCommand::Reset)
    }

    /// Reset the transform and the scene settings.
    pub fn reset_all(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        let scene_changed = self.settings != self.default_settings;
        self.settings = self.default_settings;
        let transform_changed = self.asset.is_some() && self.apply(TransformCommand::Reset);
        scene_changed || transform_changed
    }

    // Numeric fields and sliders

    /// Value a numeric field shows.
    pub fn field_value(&self, field: NumericField) -> f32 {
        field.display_value(&self.transform)
    }

    /// Commit an entered display value.
    pub fn set_field(&mut self, field: NumericField, value: f32) -> bool {
        let stored = field.resolve(Some(value), &self.transform);
        self.apply(field.command(stored, self.uniform_scale))
    }

    /// Commit raw field text, coercing malformed input.
    pub fn set_field_text(&mut self, field: NumericField, text: &str) -> bool {
        let stored = field.resolve_text(text, &self.transform);
        self.apply(field.command(stored, self.uniform_scale))
    }

    pub fn slider_value(&self, target: SliderTarget) -> f32 {
        target.value(&self.transform, &self.settings)
    }

    /// Move a slider. Transform sliders commit an undoable edit; lighting
    /// sliders change the scene settings directly.
    pub fn set_slider(&mut self, target: SliderTarget, value: f32) -> bool {
        match target {
            SliderTarget::Transform { channel, axis } => {
                let value = target.resolve(value, self.transform.component(channel, axis));
                let command = if self.uniform_scale && channel == TransformChannel::Scale {
                    TransformCommand::SetUniformScale(value)
                } else {
                    TransformCommand::SetComponent { channel, axis, value }
                };
                self.apply(command)
            }
            SliderTarget::AmbientIntensity => {
                let value = target.resolve(value, self.settings.ambient_intensity);
                let changed = value != self.settings.ambient_intensity;
                self.settings.ambient_intensity = value;
                changed
            }
            SliderTarget::LightPosition(axis) => {
                let value = target.resolve(value, self.settings.light_position[axis]);
                let changed = value != self.settings.light_position[axis];
                self.settings.light_position[axis] = value;
                changed
            }
        }
    }

    pub fn set_uniform_scale(&mut self, enabled: bool) {
        self.uniform_scale = enabled;
    }

    pub fn set_material_color(&mut self, color: Color) {
        self.settings.material_color = color;
    }

    // Gizmo

    pub fn set_mode(&mut self, mode: GizmoMode) -> bool {
        self.gizmo.set_mode(mode)
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.gizmo.toggle_snap();
        self.gizmo.snap.enabled
    }

    /// Toggle the grid. Returns the new visibility.
    pub fn toggle_grid(&mut self) -> bool {
        self.settings.show_grid = !self.settings.show_grid;
        self.settings.show_grid
    }

    /// Toggle one gizmo axis for `mode`. Returns whether it is now enabled.
    pub fn toggle_axis(&mut self, mode: GizmoMode, axis: Axis) -> bool {
        let enabled = self.gizmo.constraints.toggle(mode, axis);
        if !enabled && self.gizmo.hovered_part.is_some_and(|part| !self.gizmo.constraints.allows(part)) {
            self.gizmo.hovered_part = None;
        }
        enabled
    }

    fn sync_gizmo_scale(&mut self) {
        let camera = self.camera();
        self.gizmo.update_scale(camera.eye, self.transform.position);
    }

    /// Hover test under the pointer ray.
    pub fn pick(&mut self, ray: &Ray) -> Option<GizmoPart> {
        if self.asset.is_none() {
            return None;
        }
        self.sync_gizmo_scale();
        self.gizmo.hit_test(&self.transform, ray)
    }

    /// Start dragging `part`.
    pub fn begin_drag(&mut self, part: GizmoPart, ray: &Ray) -> EditorResult<()> {
        if self.asset.is_none() {
            return Err(EditorError::NoAsset);
        }
        self.sync_gizmo_scale();
        self.gizmo.begin_interaction(part, &self.transform, ray)?;
        self.last_drag_commit = Some(Instant::now());
        log::debug!("Drag started on {:?}", part);
        Ok(())
    }

    /// Start dragging whatever part is under `ray`, if any.
    pub fn begin_drag_at(&mut self, ray: &Ray) -> EditorResult<Option<GizmoPart>> {
        match self.pick(ray) {
            Some(part) => self.begin_drag(part, ray).map(|_| Some(part)),
            None => Ok(None),
        }
    }

    /// Move the active drag. Returns the previewed transform.
    pub fn update_drag(&mut self, ray: &Ray) -> EditorResult<Transform> {
        let preview = self.gizmo.update_interaction(ray).ok_or(EditorError::NoDrag)?;
        let preview = self.apply_uniform_drag(preview).sanitized(&self.transform);
        self.transform = preview;

        if let Some(interval) = self.drag_commit.min_interval() {
            let due = self.last_drag_commit.map_or(true, |last| last.elapsed() >= interval);
            if due && preview != self.history.current() {
                self.history.record(preview);
                self.last_drag_commit = Some(Instant::now());
            }
        }
        Ok(preview)
    }

    /// With uniform scale on, an axis handle scales every enabled axis.
    /// Locked axes keep their start value.
    fn apply_uniform_drag(&self, preview: Transform) -> Transform {
        match self.gizmo.interaction {
            Some(state) if self.uniform_scale => match state.active_part {
                GizmoPart::Handle(axis) => {
                    let factor = state.current_delta.scale[axis];
                    let start = state.start_transform.scale;
                    let scale = Axis::ALL
                        .into_iter()
                        .filter(|a| self.gizmo.constraints.is_enabled(GizmoMode::Scale, *a))
                        .fold(start, |scale, a| scale.with(a, start[a] * factor));
                    state.start_transform.with_scale(scale)
                }
                _ => preview,
            },
            _ => preview,
        }
    }

    /// Finish the drag, recording the result. Returns whether anything
    /// was recorded.
    pub fn end_drag(&mut self) -> EditorResult<bool> {
        let state = self.gizmo.end_interaction().ok_or(EditorError::NoDrag)?;
        self.last_drag_commit = None;

        if self.transform == self.history.current() {
            log::debug!("Drag on {:?} ended without change", state.active_part);
            return Ok(false);
        }
        self.history.record(self.transform);
        log::debug!("Drag on {:?} committed", state.active_part);
        Ok(true)
    }

    /// Abort the drag and restore the transform it started from.
    pub fn cancel_drag(&mut self) -> EditorResult<()> {
        let state = self.gizmo.end_interaction().ok_or(EditorError::NoDrag)?;
        self.last_drag_commit = None;
        self.transform = state.start_transform;
        if self.history.current() != state.start_transform {
            // Continuous commits already landed in the log
            self.history.record(state.start_transform);
        }
        Ok(())
    }

    // Keyboard

    /// Handle a key press. Returns the action taken, if any.
    ///
    /// Keys are ignored while a drag is in progress.
    pub fn handle_key(&mut self, input: &KeyInput) -> Option<Shortcut> {
        if self.is_dragging() {
            return None;
        }
        let shortcut = Shortcut::resolve(input)?;
        match shortcut {
            Shortcut::SetMode(mode) => {
                self.set_mode(mode);
            }
            Shortcut::ToggleGrid => {
                self.toggle_grid();
            }
            Shortcut::Undo => {
                self.undo();
            }
            Shortcut::Redo => {
                self.redo();
            }
        }
        Some(shortcut)
    }

    // Persistence

    /// Write the current transform to the store.
    pub async fn save(&mut self) -> EditorResult<TransformPayload> {
        let asset_id = self.asset.as_ref().map(|a| a.id.clone()).ok_or(EditorError::NoAsset)?;
        if self.is_dragging() {
            return Err(EditorError::DragInProgress);
        }

        match self.bridge.save(&asset_id, &self.transform).await {
            Ok(payload) => {
                self.history.mark_saved();
                self.notify(EditorMessage::Info("Saved".into()));
                Ok(payload)
            }
            Err(e) => {
                self.notify(EditorMessage::Error(format!("Save failed: {}", e)));
                Err(e.into())
            }
        }
    }

    /// Publish the selected asset and produce its share link and code.
    pub async fn publish(&mut self) -> EditorResult<PublishOutcome> {
        let asset_id = self.asset.as_ref().map(|a| a.id.clone()).ok_or(EditorError::NoAsset)?;

        match self.bridge.publish(&asset_id, self.published).await {
            Ok(outcome) => {
                self.published = true;
                self.notify(EditorMessage::Info(format!("Published at {}", outcome.share_url())));
                Ok(outcome)
            }
            Err(PublishError::InFlight) => {
                self.notify(EditorMessage::Warning("Publish already in progress".into()));
                Err(PublishError::InFlight.into())
            }
            Err(e) => {
                self.notify(EditorMessage::Error(format!("Publish failed: {}", e)));
                Err(e.into())
            }
        }
    }

    // Views

    pub fn view(&self) -> TransformView {
        let mode = self.gizmo.mode;
        TransformView {
            asset_id: self.asset.as_ref().map(|a| a.id.clone()),
            asset_name: self.asset_name.clone(),
            kind: self.asset.as_ref().map(|a| a.kind),
            transform: self.transform,
            rotation_degrees: Vec3::new(
                degrees(self.transform.rotation.x),
                degrees(self.transform.rotation.y),
                degrees(self.transform.rotation.z),
            ),
            mode,
            enabled_axes: self.gizmo.constraints.enabled_axes(mode),
            uniform_scale: self.uniform_scale,
            show_grid: self.settings.show_grid,
            dragging: self.is_dragging(),
            can_undo: self.history.can_undo() && !self.is_dragging(),
            can_redo: self.history.can_redo() && !self.is_dragging(),
            dirty: self.history.is_dirty() || self.transform != self.history.current(),
            published: self.published,
            history_index: self.history.index(),
            history_len: self.history.len(),
            loading: matches!(self.status, AssetStatus::Loading),
            warning: self.status.warning().map(str::to_string),
            message: self.message.clone(),
        }
    }

    pub fn frame(&self) -> ViewportFrame {
        ViewportFrame::build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_backend::InMemoryStore;
    use ar_math::consts;

    fn session() -> EditorSession {
        let store = Arc::new(InMemoryStore::new());
        let mut session = EditorSession::with_store(store, &EditorPreferences::default());
        session.select_asset(AssetRecord::new("a1", "https://cdn.example/a1.png", AssetKind::ImageTarget));
        session
    }

    #[test]
    fn test_apply_records_and_skips_noops() {
        let mut s = session();
        assert!(s.apply(TransformCommand::Translate(Vec3::new(1.0, 0.0, 0.0))));
        assert!(!s.apply(TransformCommand::Translate(Vec3::ZERO)));
        assert_eq!(s.history().len(), 2);
        assert!(s.view().dirty);
    }

    #[test]
    fn test_no_asset_rejects_edits() {
        let store = Arc::new(InMemoryStore::new());
        let mut s = EditorSession::with_store(store, &EditorPreferences::default());
        assert!(!s.apply(TransformCommand::Reset));
        assert!(matches!(s.message(), Some(EditorMessage::Warning(_))));
        assert!(s.frame().object.is_none());
    }

    #[test]
    fn test_uniform_scale_field() {
        let mut s = session();
        assert!(s.uniform_scale());
        s.set_field(NumericField::new(TransformChannel::Scale, Axis::Y), 2.0);
        assert_eq!(s.transform().scale, Vec3::splat(2.0));

        s.set_uniform_scale(false);
        s.set_field(NumericField::new(TransformChannel::Scale, Axis::X), 3.0);
        assert_eq!(s.transform().scale, Vec3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn test_rotation_field_degrees() {
        let mut s = session();
        let field = NumericField::new(TransformChannel::Rotation, Axis::Y);
        s.set_field_text(field, "90");
        assert!((s.transform().rotation.y - consts::FRAC_PI_2).abs() < 1e-6);
        assert!((s.field_value(field) - 90.0).abs() < 1e-4);
        assert!((s.view().rotation_degrees.y - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_lighting_slider_not_in_history() {
        let mut s = session();
        assert!(s.set_slider(SliderTarget::AmbientIntensity, 0.8));
        assert_eq!(s.settings().ambient_intensity, 0.8);
        assert_eq!(s.history().len(), 1);

        assert!(s.set_slider(SliderTarget::transform(TransformChannel::Position, Axis::X), 9.0));
        assert_eq!(s.transform().position.x, 5.0);
    }

    #[test]
    fn test_keys_ignored_while_dragging() {
        let mut s = session();
        let ray = Ray::from_points(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.3, 0.0, 0.0));
        s.begin_drag(GizmoPart::Axis(Axis::X), &ray).unwrap();

        assert_eq!(s.handle_key(&KeyInput::plain('r')), None);
        assert_eq!(s.gizmo().mode, GizmoMode::Translate);
        assert!(!s.apply(TransformCommand::Reset));

        s.cancel_drag().unwrap();
        assert_eq!(s.handle_key(&KeyInput::plain('r')), Some(Shortcut::SetMode(GizmoMode::Rotate)));
    }

    #[test]
    fn test_reset_all_restores_scene() {
        let mut s = session();
        s.set_slider(SliderTarget::LightPosition(Axis::X), -3.0);
        s.toggle_grid();
        s.apply(TransformCommand::Translate(Vec3::ONE));

        assert!(s.reset_all());
        assert_eq!(*s.settings(), SceneSettings::default());
        assert_eq!(*s.transform(), Transform::IDENTITY);
        assert!(s.history().can_undo());
    }
}
