//! Keyboard shortcuts.

use crate::viewport::gizmos::GizmoMode;

/// Keyboard modifiers held with a key press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Cmd on macOS
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, meta: false };

    /// Ctrl or Cmd.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: char,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: char, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: char) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Parse a chord like `"ctrl+shift+z"` or `"t"`.
    pub fn parse(chord: &str) -> Option<Self> {
        let mut modifiers = Modifiers::NONE;
        let mut key = None;

        for part in chord.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "cmd" | "meta" | "super" => modifiers.meta = true,
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next(), key) {
                        (Some(c), None, None) => key = Some(c),
                        _ => return None,
                    }
                }
            }
        }

        key.map(|key| Self::new(key, modifiers))
    }
}

/// Editor action bound to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shortcut {
    SetMode(GizmoMode),
    ToggleGrid,
    Undo,
    Redo,
}

impl Shortcut {
    /// Map a key press to an action. Letters are case-insensitive.
    ///
    /// | Keys                         | Action          |
    /// |------------------------------|-----------------|
    /// | T / R / S                    | gizmo mode      |
    /// | G                            | toggle grid     |
    /// | Ctrl/Cmd+Z                   | undo            |
    /// | Ctrl/Cmd+Shift+Z, Ctrl/Cmd+Y | redo            |
    pub fn resolve(input: &KeyInput) -> Option<Shortcut> {
        let key = input.key.to_ascii_lowercase();
        let mods = input.modifiers;

        if mods.alt {
            return None;
        }

        if mods.command() {
            return match key {
                'z' if mods.shift => Some(Shortcut::Redo),
                'z' => Some(Shortcut::Undo),
                'y' if !mods.shift => Some(Shortcut::Redo),
                _ => None,
            };
        }

        match key {
            't' => Some(Shortcut::SetMode(GizmoMode::Translate)),
            'r' => Some(Shortcut::SetMode(GizmoMode::Rotate)),
            's' => Some(Shortcut::SetMode(GizmoMode::Scale)),
            'g' => Some(Shortcut::ToggleGrid),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(chord: &str) -> Option<Shortcut> {
        Shortcut::resolve(&KeyInput::parse(chord).unwrap())
    }

    #[test]
    fn test_mode_keys_case_insensitive() {
        assert_eq!(resolve("t"), Some(Shortcut::SetMode(GizmoMode::Translate)));
        assert_eq!(resolve("R"), Some(Shortcut::SetMode(GizmoMode::Rotate)));
        assert_eq!(resolve("shift+S"), Some(Shortcut::SetMode(GizmoMode::Scale)));
        assert_eq!(resolve("g"), Some(Shortcut::ToggleGrid));
        assert_eq!(resolve("x"), None);
    }

    #[test]
    fn test_undo_redo_chords() {
        assert_eq!(resolve("ctrl+z"), Some(Shortcut::Undo));
        assert_eq!(resolve("cmd+Z"), Some(Shortcut::Undo));
        assert_eq!(resolve("ctrl+shift+z"), Some(Shortcut::Redo));
        assert_eq!(resolve("meta+shift+Z"), Some(Shortcut::Redo));
        assert_eq!(resolve("ctrl+y"), Some(Shortcut::Redo));
        assert_eq!(resolve("ctrl+t"), None);
        assert_eq!(resolve("alt+z"), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(KeyInput::parse("ctrl+").is_none());
        assert!(KeyInput::parse("ctrl+zz").is_none());
        assert!(KeyInput::parse("a+b").is_none());
    }
}
