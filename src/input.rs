use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::{Direction, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Turn(Direction),
}

pub fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    if is_ctrl_c(key) {
        return Some(InputEvent::Quit);
    }

    match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(InputEvent::Turn(Direction::Up)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(InputEvent::Turn(Direction::Down)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(InputEvent::Turn(Direction::Left)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(InputEvent::Turn(Direction::Right)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Apply this frame's events to the snake. Returns `true` once a quit is
/// seen; anything queued after it is dropped.
pub fn handle_keys(snake: &mut Snake, events: &[InputEvent]) -> bool {
    for event in events {
        match event {
            InputEvent::Quit => return true,
            InputEvent::Turn(dir) => {
                if !dir.is_opposite(snake.direction()) {
                    snake.set_next_direction(*dir);
                }
            }
        }
    }

    false
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
