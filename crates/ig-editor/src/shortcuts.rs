//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s, and those to
//! editor actions against the current selection.

use crate::actions::EditorAction;
use crate::input::Modifiers;
use crate::store::EditorStore;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── View ──
    ZoomIn,
    ZoomOut,
    /// Back to 100%.
    ZoomReset,

    // ── Edit ──
    DeleteSelected,
    Duplicate,

    // ── Z-order ──
    BringToFront,
    SendToBack,

    Deselect,
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘, on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"d"`, `"Delete"`).
    /// Keys typed into a text field never resolve.
    pub fn resolve(key: &str, modifiers: Modifiers, in_text_field: bool) -> Option<ShortcutAction> {
        if in_text_field {
            return None;
        }

        if modifiers.cmd() {
            return match key {
                "0" => Some(ShortcutAction::ZoomReset),
                "d" | "D" => Some(ShortcutAction::Duplicate),
                "]" => Some(ShortcutAction::BringToFront),
                "[" => Some(ShortcutAction::SendToBack),
                _ => None,
            };
        }

        match key {
            "+" | "=" => Some(ShortcutAction::ZoomIn),
            "-" => Some(ShortcutAction::ZoomOut),
            "Delete" | "Backspace" => Some(ShortcutAction::DeleteSelected),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }

    /// Turn a shortcut into editor actions for the current state.
    /// Object shortcuts act on the single selected object and do nothing
    /// for an empty, multiple or frame selection.
    pub fn actions(shortcut: ShortcutAction, store: &EditorStore) -> Vec<EditorAction> {
        let only = store.selection().only();
        match shortcut {
            ShortcutAction::ZoomIn => vec![EditorAction::ZoomIn],
            ShortcutAction::ZoomOut => vec![EditorAction::ZoomOut],
            ShortcutAction::ZoomReset => vec![EditorAction::SetZoom { zoom: 1.0 }],
            ShortcutAction::DeleteSelected => vec![EditorAction::DeleteSelected],
            ShortcutAction::Deselect => vec![EditorAction::ClearSelection],
            ShortcutAction::Duplicate => only
                .map(|id| EditorAction::DuplicateObject { id })
                .into_iter()
                .collect(),
            ShortcutAction::BringToFront => only
                .map(|id| EditorAction::MoveToFront { id })
                .into_iter()
                .collect(),
            ShortcutAction::SendToBack => only
                .map(|id| EditorAction::MoveToBack { id })
                .into_iter()
                .collect(),
        }
    }
}
