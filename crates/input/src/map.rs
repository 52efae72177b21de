//! Key mapping from terminal events to match commands.

use crate::types::MatchCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to match commands.
pub fn handle_key_event(key: KeyEvent) -> Option<MatchCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(MatchCommand::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(MatchCommand::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(MatchCommand::SoftDrop),

        // Rotation (one direction only)
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(MatchCommand::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(MatchCommand::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(MatchCommand::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(MatchCommand::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
