//! Keyboard adapter: crossterm key events to logical match commands.

use crate::config::KeyBindings;
use crate::sim::{Direction, PlayerId};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// UI-agnostic actions produced by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Steer {
        player: PlayerId,
        direction: Direction,
    },
    Quit,
    None,
}

/// Map a key press using each player's bindings (index = player id).
///
/// Player bindings win over the quit key, so a layout may use `q` for steering.
pub fn map_key(key: KeyEvent, bindings: &[KeyBindings]) -> InputAction {
    if key.kind == KeyEventKind::Release {
        return InputAction::None;
    }

    match key.code {
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Char(c) => bindings
            .iter()
            .enumerate()
            .find_map(|(i, keys)| {
                keys.direction_for(c).map(|direction| InputAction::Steer {
                    player: PlayerId(i),
                    direction,
                })
            })
            .unwrap_or(if c.eq_ignore_ascii_case(&'q') {
                InputAction::Quit
            } else {
                InputAction::None
            }),
        _ => InputAction::None,
    }
}
