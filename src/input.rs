use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
///
/// `Neutral` is the heading of a snake that has not moved yet.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Neutral,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Neutral => Self::Neutral,
        }
    }

    /// Returns the `(dx, dy)` unit delta for this direction.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Neutral => (0, 0),
        }
    }

    /// Maps the WASD letters to directions.
    #[must_use]
    pub fn from_wasd(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Self::Up),
            's' => Some(Self::Down),
            'a' => Some(Self::Left),
            'd' => Some(Self::Right),
            _ => None,
        }
    }
}

/// High-level input events consumed by the controller.
///
/// Letters stay as `Char` because their meaning depends on the screen:
/// they edit the name in the menu and steer while playing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Char(char),
    Backspace,
    NextField,
    PreviousField,
    Confirm,
    Back,
    Quit,
}

impl GameInput {
    /// Translates a terminal key event. Non-press events and unmapped keys
    /// yield `None`.
    #[must_use]
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(Self::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Up => Some(Self::Direction(Direction::Up)),
            KeyCode::Down => Some(Self::Direction(Direction::Down)),
            KeyCode::Left => Some(Self::Direction(Direction::Left)),
            KeyCode::Right => Some(Self::Direction(Direction::Right)),
            KeyCode::Tab => Some(Self::NextField),
            KeyCode::BackTab => Some(Self::PreviousField),
            KeyCode::Enter => Some(Self::Confirm),
            KeyCode::Esc => Some(Self::Back),
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::Char(c) if !c.is_control() => Some(Self::Char(c)),
            _ => None,
        }
    }
}

/// Waits up to `timeout` for one key press.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(GameInput::from_key(key)),
        _ => Ok(None),
    }
}
