use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    CycleEasing,
    ToggleAnimation,
    Help,
    ExitMode,
    None,
}

/// Map a key press to an action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key closes help
        return Action::ExitMode;
    }

    // Uppercase letters arrive with SHIFT on most terminals but not all
    let modifiers = match key.code {
        KeyCode::Char(c) if c.is_ascii_uppercase() => key.modifiers | KeyModifiers::SHIFT,
        _ => key.modifiers,
    };
    let binding = KeyBinding::new(key.code, modifiers);

    if keymap.is_g_prefix(&binding) {
        return match (app.pending_key, keymap.sequence_g_action()) {
            (Some('g'), Some(action)) => *action,
            _ => Action::PendingG,
        };
    }

    keymap.get(&binding).copied().unwrap_or(Action::None)
}
