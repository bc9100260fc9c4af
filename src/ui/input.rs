use crate::ui::traits::Action;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys that apply when the active view did not consume them.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Char('q'), _) => Some(Action::Quit),
            (KeyCode::Esc, _) => Some(Action::CloseOverlay),
            _ => None,
        }
    }
}

/// Edits `value` for a plain character or backspace. Returns whether the key
/// changed it.
pub fn edit_text(value: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            value.push(c);
            true
        }
        KeyCode::Backspace => value.pop().is_some(),
        _ => false,
    }
}
