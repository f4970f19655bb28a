use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Advance,
    Restart,
    CursorLeft,
    CursorRight,
    /// Choose the fixture under the cursor.
    Activate,
    /// Choose fixture `n` (0-based) directly.
    Pick(usize),
    Quit,
}

/// Translates a key press into a command for the screen currently shown.
pub fn map_key(screen: Screen, key: KeyEvent) -> Option<Command> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(Command::Quit),
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => return Some(Command::Quit),
        _ => {}
    }

    let confirm = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
    match screen {
        Screen::Title if confirm => Some(Command::Start),
        Screen::Feedback if confirm => Some(Command::Advance),
        Screen::Results if confirm => Some(Command::Restart),
        Screen::Game => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Command::CursorLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Command::CursorRight),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Activate),
            KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| Command::Pick(d as usize - 1)),
            _ => None,
        },
        _ => None,
    }
}
