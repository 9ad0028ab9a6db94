//! Key mapping from terminal events to engine commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key means to the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forwarded to the engine's input queue.
    Game(Command),
    /// Repaint the whole screen; never reaches the engine.
    Redraw,
}

/// Map a keyboard event to an action, ignoring the press/release kind.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(KeyAction::Game(Command::Quit));
    }

    let command = match key.code {
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDrop,

        KeyCode::Char('z') | KeyCode::Char('Z') => Command::RotateLeft,
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Command::RotateRight,

        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('c') | KeyCode::Char('C') => Command::Hold,
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,

        KeyCode::Char('r') | KeyCode::Char('R') => return Some(KeyAction::Redraw),
        _ => return None,
    };
    Some(KeyAction::Game(command))
}
