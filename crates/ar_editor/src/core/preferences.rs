//! Editor preferences and settings.
//!
//! Persistent settings that survive editor restarts, stored as TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{SceneSettings, TransformHistory};
use crate::error::PreferencesError;
use crate::viewport::{DragCommit, SnapSettings};

/// Editor preferences and settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Maximum undo entries per asset
    pub history_capacity: usize,
    /// Base URL of the public viewer used for share links
    pub share_origin: String,
    /// Uniform scale toggle state on startup
    pub uniform_scale: bool,
    /// Gizmo snapping
    pub snap: SnapSettings,
    /// When gizmo drags are written to history
    pub drag_commit: DragCommit,
    /// Scene settings applied on startup and by a full reset
    pub scene: SceneSettings,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            history_capacity: TransformHistory::DEFAULT_CAPACITY,
            share_origin: "http://localhost:3000".to_string(),
            uniform_scale: true,
            snap: SnapSettings::default(),
            drag_commit: DragCommit::OnRelease,
            scene: SceneSettings::default(),
        }
    }
}

impl EditorPreferences {
    /// Load preferences from a file.
    pub fn load(path: &Path) -> Result<Self, PreferencesError> {
        let content = std::fs::read_to_string(path)?;
        let prefs = toml::from_str(&content)?;
        log::info!("Loaded preferences from {:?}", path);
        Ok(prefs)
    }

    /// Load from the default path, falling back to defaults if the file is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(prefs) => prefs,
            Err(e) => {
                log::warn!("Ignoring preferences at {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save preferences to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        log::info!("Saved preferences to {:?}", path);
        Ok(())
    }

    /// Get the default preferences path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("ar_editor");
            p.push("preferences.toml");
            p
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_partial_file_uses_defaults() {
        let prefs: EditorPreferences = toml::from_str(
            r#"
            share_origin = "https://studio.example.com"
            uniform_scale = false

            [snap]
            rotate = 15.0

            [drag_commit]
            policy = "continuous"
            min_interval_ms = 100
            "#,
        )
        .unwrap();

        assert_eq!(prefs.share_origin, "https://studio.example.com");
        assert!(!prefs.uniform_scale);
        assert_eq!(prefs.snap.rotate, 15.0);
        assert_eq!(prefs.snap.translate, 0.1);
        assert_eq!(prefs.drag_commit.min_interval(), Some(Duration::from_millis(100)));
        assert_eq!(prefs.history_capacity, TransformHistory::DEFAULT_CAPACITY);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("ar_editor_prefs_{}", std::process::id()))
            .join("preferences.toml");

        let mut prefs = EditorPreferences::default();
        prefs.history_capacity = 32;
        prefs.scene.show_grid = false;
        prefs.save(&path).unwrap();

        let loaded = EditorPreferences::load(&path).unwrap();
        assert_eq!(loaded, prefs);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_file() {
        let err = toml::from_str::<EditorPreferences>("history_capacity = \"lots\"").unwrap_err();
        assert!(matches!(PreferencesError::from(err), PreferencesError::Parse(_)));
    }
}
