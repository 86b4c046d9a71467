//! Key mapping from terminal events to game commands.

use crate::types::{GameCommand, SessionState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a game command.
///
/// `state` decides the meaning of context-dependent keys: `p` pauses or
/// resumes, Enter only starts a game that is not already in progress.
pub fn handle_key_event(key: KeyEvent, state: SessionState) -> Option<GameCommand> {
    // Ctrl-C is quit, never hold
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameCommand::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameCommand::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameCommand::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X')
        | KeyCode::Char('e')
        | KeyCode::Char('E') => Some(GameCommand::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(GameCommand::RotateCcw)
        }

        // Actions
        KeyCode::Char(' ') => Some(GameCommand::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameCommand::Hold),
        KeyCode::Char('p') | KeyCode::Char('P') => match state {
            SessionState::Playing => Some(GameCommand::Pause),
            SessionState::Paused => Some(GameCommand::Resume),
            _ => None,
        },

        KeyCode::Enter if state.awaits_start() => Some(GameCommand::Start),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
