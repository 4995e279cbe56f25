//! Keyboard handling: cursor movement and key-to-action mapping.

use crate::games::noughts::Position;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// What a key press asks the driver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Move the cursor.
    Cursor(Position),
    /// Click a cell.
    Click(Position),
    /// Request a reset.
    Reset,
    /// Leave the game.
    Quit,
    /// Nothing to do.
    Ignore,
}

/// Maps a key press to an action.
///
/// Digits 1-9 click the matching cell directly; Enter and Space click
/// under the cursor.
pub fn action(key: KeyEvent, cursor: Position) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('r') => KeyAction::Reset,
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Click(cursor),
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|digit| (digit as usize).checked_sub(1))
            .and_then(Position::from_index)
            .map_or(KeyAction::Ignore, KeyAction::Click),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            KeyAction::Cursor(move_cursor(cursor, key.code))
        }
        _ => KeyAction::Ignore,
    }
}

/// Moves cursor based on arrow keys. Edges do not wrap.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());

    let target = match key {
        KeyCode::Up => row.checked_sub(1).and_then(|r| Position::at(r, col)),
        KeyCode::Down => Position::at(row + 1, col),
        KeyCode::Left => col.checked_sub(1).and_then(|c| Position::at(row, c)),
        KeyCode::Right => Position::at(row, col + 1),
        _ => None,
    };

    target.unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Down), Position::BottomRight);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Right), Position::BottomRight);
    }

    #[test]
    fn test_cursor_moves_one_cell() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Down), Position::BottomCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Left), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::Center, KeyCode::Right), Position::MiddleRight);
    }

    #[test]
    fn test_digit_keys_click_cells() {
        assert_eq!(
            action(press(KeyCode::Char('1')), Position::Center),
            KeyAction::Click(Position::TopLeft)
        );
        assert_eq!(
            action(press(KeyCode::Char('9')), Position::Center),
            KeyAction::Click(Position::BottomRight)
        );
        assert_eq!(action(press(KeyCode::Char('0')), Position::Center), KeyAction::Ignore);
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            action(press(KeyCode::Enter), Position::Center),
            KeyAction::Click(Position::Center)
        );
        assert_eq!(action(press(KeyCode::Char('r')), Position::Center), KeyAction::Reset);
        assert_eq!(action(press(KeyCode::Char('q')), Position::Center), KeyAction::Quit);
    }
}
