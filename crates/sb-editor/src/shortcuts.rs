//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s, then applies
//! them to a [`SceneEngine`]. Kept in Rust so every host resolves keys the
//! same way.
//!
//! The primary modifier is ⌘ on macOS and Ctrl elsewhere; both are accepted.
//! While focus is inside a text-entry control only undo and redo resolve,
//! so typing never deletes, moves or pastes elements.

use crate::clipboard::Clipboard;
use crate::engine::SceneEngine;
use crate::policy::Measure;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    Delete,
    Copy,
    Cut,
    Paste,
    Deselect,
    /// Move the selection by a step (arrow keys).
    Nudge { dx: f64, dy: f64 },
    BringForward,
    SendBackward,
}

/// Modifier state of a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    fn primary(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Distance of one arrow-key nudge.
pub const NUDGE_STEP: f64 = 1.0;

/// Resolves key events into shortcut actions.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the combo has no binding, or if `in_text_entry` is
    /// set and the combo is not undo or redo.
    pub fn resolve(key: &str, mods: KeyModifiers, in_text_entry: bool) -> Option<ShortcutAction> {
        // ── Undo / redo fire even from form fields ──
        if mods.primary() {
            match key {
                "z" | "Z" if mods.shift => return Some(ShortcutAction::Redo),
                "z" | "Z" => return Some(ShortcutAction::Undo),
                "y" | "Y" if mods.ctrl && !mods.shift => return Some(ShortcutAction::Redo),
                _ => {}
            }
        }

        if in_text_entry {
            return None;
        }

        if mods.primary() && mods.shift {
            return None;
        }

        if mods.primary() {
            return match key {
                "c" | "C" => Some(ShortcutAction::Copy),
                "x" | "X" => Some(ShortcutAction::Cut),
                "v" | "V" => Some(ShortcutAction::Paste),
                "[" => Some(ShortcutAction::SendBackward),
                "]" => Some(ShortcutAction::BringForward),
                _ => None,
            };
        }

        // ── Single keys ──
        let step = NUDGE_STEP;
        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            "ArrowLeft" => Some(ShortcutAction::Nudge { dx: -step, dy: 0.0 }),
            "ArrowRight" => Some(ShortcutAction::Nudge { dx: step, dy: 0.0 }),
            "ArrowUp" => Some(ShortcutAction::Nudge { dx: 0.0, dy: -step }),
            "ArrowDown" => Some(ShortcutAction::Nudge { dx: 0.0, dy: step }),
            _ => None,
        }
    }
}

impl ShortcutAction {
    /// Stable name for hosts (e.g. `"undo"`, `"nudge"`).
    pub fn name(self) -> &'static str {
        match self {
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::Delete => "delete",
            ShortcutAction::Copy => "copy",
            ShortcutAction::Cut => "cut",
            ShortcutAction::Paste => "paste",
            ShortcutAction::Deselect => "deselect",
            ShortcutAction::Nudge { .. } => "nudge",
            ShortcutAction::BringForward => "bringForward",
            ShortcutAction::SendBackward => "sendBackward",
        }
    }
}

impl SceneEngine {
    /// Apply a resolved shortcut. Returns whether the scene changed.
    pub fn apply_shortcut(
        &mut self,
        action: ShortcutAction,
        clipboard: &mut dyn Clipboard,
        measure: &dyn Measure,
    ) -> bool {
        match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::Delete => self.delete_selected(),
            ShortcutAction::Copy => {
                self.copy_to(clipboard);
                false
            }
            ShortcutAction::Cut => self.cut_to(clipboard),
            ShortcutAction::Paste => self.paste_from(clipboard).is_some(),
            ShortcutAction::Deselect => {
                let had_selection = self.selected_id().is_some();
                self.clear_selection();
                had_selection
            }
            ShortcutAction::Nudge { dx, dy } => self.nudge_selected(dx, dy, measure),
            ShortcutAction::BringForward => self.move_selected_up(),
            ShortcutAction::SendBackward => self.move_selected_down(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::policy::Unmeasured;
    use sb_core::ElementPatch;

    const CTRL: KeyModifiers = KeyModifiers {
        ctrl: true,
        ..KeyModifiers::NONE
    };
    const META: KeyModifiers = KeyModifiers {
        meta: true,
        ..KeyModifiers::NONE
    };
    const META_SHIFT: KeyModifiers = KeyModifiers {
        meta: true,
        shift: true,
        ..KeyModifiers::NONE
    };

    #[test]
    fn resolve_undo_redo() {
        // Cmd+Z → Undo
        assert_eq!(ShortcutMap::resolve("z", META, false), Some(ShortcutAction::Undo));
        // Ctrl+Z → Undo
        assert_eq!(ShortcutMap::resolve("z", CTRL, false), Some(ShortcutAction::Undo));
        // Cmd+Shift+Z → Redo (key arrives uppercase with shift)
        assert_eq!(ShortcutMap::resolve("Z", META_SHIFT, false), Some(ShortcutAction::Redo));
        // Ctrl+Y → Redo
        assert_eq!(ShortcutMap::resolve("y", CTRL, false), Some(ShortcutAction::Redo));
    }

    #[test]
    fn resolve_delete() {
        assert_eq!(
            ShortcutMap::resolve("Delete", KeyModifiers::NONE, false),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", KeyModifiers::NONE, false),
            Some(ShortcutAction::Delete)
        );
    }

    #[test]
    fn resolve_clipboard() {
        assert_eq!(ShortcutMap::resolve("c", META, false), Some(ShortcutAction::Copy));
        assert_eq!(ShortcutMap::resolve("x", CTRL, false), Some(ShortcutAction::Cut));
        assert_eq!(ShortcutMap::resolve("v", META, false), Some(ShortcutAction::Paste));
    }

    #[test]
    fn resolve_arrows() {
        assert_eq!(
            ShortcutMap::resolve("ArrowLeft", KeyModifiers::NONE, false),
            Some(ShortcutAction::Nudge { dx: -1.0, dy: 0.0 })
        );
        assert_eq!(
            ShortcutMap::resolve("ArrowDown", KeyModifiers::NONE, false),
            Some(ShortcutAction::Nudge { dx: 0.0, dy: 1.0 })
        );
    }

    #[test]
    fn text_entry_suppresses_editing_keys() {
        for (key, mods) in [
            ("Backspace", KeyModifiers::NONE),
            ("Delete", KeyModifiers::NONE),
            ("ArrowUp", KeyModifiers::NONE),
            ("Escape", KeyModifiers::NONE),
            ("c", META),
            ("x", CTRL),
            ("v", CTRL),
            ("]", META),
        ] {
            assert_eq!(ShortcutMap::resolve(key, mods, true), None, "{key}");
        }
    }

    #[test]
    fn text_entry_keeps_undo_redo() {
        assert_eq!(ShortcutMap::resolve("z", META, true), Some(ShortcutAction::Undo));
        assert_eq!(ShortcutMap::resolve("z", CTRL, true), Some(ShortcutAction::Undo));
        assert_eq!(ShortcutMap::resolve("Z", META_SHIFT, true), Some(ShortcutAction::Redo));
        assert_eq!(ShortcutMap::resolve("y", CTRL, true), Some(ShortcutAction::Redo));
    }

    #[test]
    fn resolve_unknown_key() {
        assert_eq!(ShortcutMap::resolve("q", KeyModifiers::NONE, false), None);
        assert_eq!(ShortcutMap::resolve("z", KeyModifiers::NONE, false), None);
    }

    #[test]
    fn apply_cut_then_paste() {
        let mut engine = SceneEngine::default();
        engine.add_rectangle(&ElementPatch::default()).unwrap();
        let mut clipboard = MemoryClipboard::new();

        assert!(engine.apply_shortcut(ShortcutAction::Cut, &mut clipboard, &Unmeasured));
        assert!(engine.elements().is_empty());
        assert!(engine.apply_shortcut(ShortcutAction::Paste, &mut clipboard, &Unmeasured));
        assert_eq!(engine.elements().len(), 1);
        assert!(engine.apply_shortcut(ShortcutAction::Undo, &mut clipboard, &Unmeasured));
        assert!(engine.elements().is_empty());
    }

    #[test]
    fn apply_deselect_and_nudge() {
        let mut engine = SceneEngine::default();
        engine.add_circle(&ElementPatch::default()).unwrap();
        let mut clipboard = MemoryClipboard::new();
        let nudge = ShortcutAction::Nudge { dx: 0.0, dy: 1.0 };

        assert!(engine.apply_shortcut(nudge, &mut clipboard, &Unmeasured));
        assert!(engine.apply_shortcut(ShortcutAction::Deselect, &mut clipboard, &Unmeasured));
        assert!(!engine.apply_shortcut(nudge, &mut clipboard, &Unmeasured));
    }
}
