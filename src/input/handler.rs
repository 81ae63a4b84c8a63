use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    /// Switch topology; the driver resolves it against the current mode
    SwitchMode,
    /// Spectator playback speed, 1 (slowest) to 4
    Speed(u8),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::GameAction(Action::Steer(Direction::Up)),
            KeyCode::Down => KeyAction::GameAction(Action::Steer(Direction::Down)),
            KeyCode::Left => KeyAction::GameAction(Action::Steer(Direction::Left)),
            KeyCode::Right => KeyAction::GameAction(Action::Steer(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::GameAction(Action::Steer(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::GameAction(Action::Steer(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::GameAction(Action::Steer(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::GameAction(Action::Steer(Direction::Right))
            }

            // Lifecycle
            KeyCode::Char(' ') | KeyCode::Esc => KeyAction::GameAction(Action::TogglePause),
            KeyCode::Enter => KeyAction::GameAction(Action::Start),
            KeyCode::Char('m') | KeyCode::Char('M') => KeyAction::SwitchMode,

            KeyCode::Char(c @ '1'..='4') => KeyAction::Speed(c as u8 - b'0'),

            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
