//! Mapping from terminal events to player input.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Input the game loop acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Left mouse press at a terminal position (column, row of the screen).
    Press { x: u16, y: u16 },
    /// Move the keyboard cursor; `dy` is positive towards the top of the board.
    MoveCursor { dx: i8, dy: i8 },
    /// Click the cell under the keyboard cursor.
    Select,
    /// Start a new game.
    Restart,
}

/// Map any terminal event to an input action.
pub fn handle_event(event: &Event) -> Option<InputAction> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(*key),
        Event::Mouse(mouse) => handle_mouse_event(*mouse),
        _ => None,
    }
}

/// Map keyboard input to input actions.
pub fn handle_key_event(key: KeyEvent) -> Option<InputAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => {
            Some(InputAction::MoveCursor { dx: -1, dy: 0 })
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => {
            Some(InputAction::MoveCursor { dx: 1, dy: 0 })
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => {
            Some(InputAction::MoveCursor { dx: 0, dy: 1 })
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => {
            Some(InputAction::MoveCursor { dx: 0, dy: -1 })
        }

        KeyCode::Enter | KeyCode::Char(' ') => Some(InputAction::Select),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::Restart),

        _ => None,
    }
}

/// Map mouse input to input actions. Only left-button presses count.
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<InputAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputAction::Press {
            x: mouse.column,
            y: mouse.row,
        }),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_cursor_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(InputAction::MoveCursor { dx: -1, dy: 0 })
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('k'))),
            Some(InputAction::MoveCursor { dx: 0, dy: 1 })
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(InputAction::MoveCursor { dx: 0, dy: -1 })
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(InputAction::Select)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(InputAction::Select)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(InputAction::Restart)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_left_press_maps_to_screen_position() {
        let ev = Event::Mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 7));
        assert_eq!(handle_event(&ev), Some(InputAction::Press { x: 12, y: 7 }));
    }

    #[test]
    fn test_other_mouse_events_are_ignored() {
        for kind in [
            MouseEventKind::Down(MouseButton::Right),
            MouseEventKind::Up(MouseButton::Left),
            MouseEventKind::Moved,
            MouseEventKind::ScrollUp,
        ] {
            assert_eq!(handle_mouse_event(mouse(kind, 1, 1)), None);
        }
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = KeyEvent::from(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_event(&Event::Key(key)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
