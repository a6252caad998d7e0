use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::grid::GridSize;

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 40;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 30;

/// Default board dimensions.
pub const DEFAULT_GRID: GridSize = GridSize {
    width: DEFAULT_GRID_WIDTH,
    height: DEFAULT_GRID_HEIGHT,
};

/// Maximum number of turns buffered between two ticks.
pub const TURN_QUEUE_CAPACITY: usize = 3;

/// Maximum player name length in characters.
pub const MAX_NAME_LEN: usize = 15;

/// Name used when the player leaves the field empty.
pub const DEFAULT_PLAYER_NAME: &str = "Player1";

/// Refresh rate of non-playing screens.
pub const UI_REFRESH_HZ: u64 = 60;

/// Frame interval of non-playing screens.
pub const UI_FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / UI_REFRESH_HZ);

/// Speed and goal preset selected in the menu.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties in menu order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Simulation ticks per second while playing.
    #[must_use]
    pub fn ticks_per_second(self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Medium => 15,
            Self::Hard => 25,
        }
    }

    /// Snake length that wins the round.
    #[must_use]
    pub fn win_length(self) -> usize {
        match self {
            Self::Easy => 10,
            Self::Medium => 20,
            Self::Hard => 30,
        }
    }

    /// Wall-clock time between two simulation ticks.
    #[must_use]
    pub fn tick_interval(self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.ticks_per_second()))
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }

    /// Returns the neighbouring difficulty, wrapping at both ends.
    #[must_use]
    pub fn cycled(self, forward: bool) -> Self {
        cycle(&Self::ALL, self, forward)
    }
}

/// Snake body color chosen in the menu.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SnakeColor {
    #[default]
    Green,
    Blue,
    Yellow,
    Red,
    White,
    Black,
}

impl SnakeColor {
    /// All colors in picker order.
    pub const ALL: [Self; 6] = [
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Red,
        Self::White,
        Self::Black,
    ];

    /// Returns the RGB triple of the color.
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Green => (50, 200, 50),
            Self::Blue => (50, 50, 200),
            Self::Yellow => (200, 200, 50),
            Self::Red => (200, 50, 50),
            Self::White => (255, 255, 255),
            Self::Black => (0, 0, 0),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
            Self::White => "White",
            Self::Black => "Black",
        }
    }

    /// Returns the neighbouring color, wrapping at both ends.
    #[must_use]
    pub fn cycled(self, forward: bool) -> Self {
        cycle(&Self::ALL, self, forward)
    }
}

fn cycle<T: Copy + PartialEq>(items: &[T], current: T, forward: bool) -> T {
    let idx = items.iter().position(|item| *item == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % items.len()
    } else if idx == 0 {
        items.len() - 1
    } else {
        idx - 1
    };
    items[next]
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Difficulty, SnakeColor, UI_FRAME_INTERVAL};

    #[test]
    fn difficulty_table_matches_tick_rates_and_goals() {
        assert_eq!(Difficulty::Easy.ticks_per_second(), 10);
        assert_eq!(Difficulty::Medium.ticks_per_second(), 15);
        assert_eq!(Difficulty::Hard.ticks_per_second(), 25);

        assert_eq!(Difficulty::Easy.win_length(), 10);
        assert_eq!(Difficulty::Medium.win_length(), 20);
        assert_eq!(Difficulty::Hard.win_length(), 30);
    }

    #[test]
    fn tick_interval_follows_rate() {
        assert_eq!(Difficulty::Easy.tick_interval(), Duration::from_millis(100));
        assert_eq!(Difficulty::Hard.tick_interval(), Duration::from_millis(40));
        assert!(UI_FRAME_INTERVAL < Difficulty::Hard.tick_interval());
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        assert_eq!(Difficulty::Hard.cycled(true), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.cycled(false), Difficulty::Hard);
        assert_eq!(SnakeColor::Black.cycled(true), SnakeColor::Green);
        assert_eq!(SnakeColor::Green.cycled(false), SnakeColor::Black);
        assert_eq!(SnakeColor::Blue.cycled(true), SnakeColor::Yellow);
    }
}
