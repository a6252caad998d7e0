use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::config::SnakeColor;

/// Which of the two built-in palettes is active.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "DARK",
            Self::Light => "LIGHT",
        }
    }

    #[must_use]
    pub fn theme(self) -> &'static Theme {
        match self {
            Self::Dark => &THEME_DARK,
            Self::Light => &THEME_LIGHT,
        }
    }
}

/// A color theme applied to all screen chrome.
///
/// Snake and food colors are not part of the theme; see [`snake_color`] and
/// [`FOOD_COLOR`].
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    /// Background of the whole terminal and of empty board cells.
    pub background: Color,
    pub text: Color,
    /// Dots marking empty board cells.
    pub grid: Color,
    /// HUD bar and popup fill.
    pub ui_bg: Color,
    pub ui_border: Color,
    /// Name field fill.
    pub input_bg: Color,
    pub input_text: Color,
}

pub const THEME_DARK: Theme = Theme {
    name: "Dark",
    background: Color::Rgb(30, 30, 30),
    text: Color::Rgb(240, 240, 240),
    grid: Color::Rgb(40, 40, 40),
    ui_bg: Color::Rgb(50, 50, 50),
    ui_border: Color::Rgb(100, 100, 100),
    input_bg: Color::Rgb(70, 70, 70),
    input_text: Color::Rgb(255, 255, 255),
};

pub const THEME_LIGHT: Theme = Theme {
    name: "Light",
    background: Color::Rgb(240, 240, 240),
    text: Color::Rgb(20, 20, 20),
    grid: Color::Rgb(220, 220, 220),
    ui_bg: Color::Rgb(200, 200, 200),
    ui_border: Color::Rgb(150, 150, 150),
    input_bg: Color::Rgb(255, 255, 255),
    input_text: Color::Rgb(0, 0, 0),
};

/// Food fill color.
pub const FOOD_COLOR: Color = Color::Rgb(200, 50, 50);

/// Food outline color.
pub const FOOD_OUTLINE: Color = Color::Rgb(255, 255, 255);

/// Title color of the game-over popup.
pub const GAME_OVER_COLOR: Color = Color::Rgb(200, 50, 50);

/// Title color of the victory popup.
pub const VICTORY_COLOR: Color = Color::Rgb(50, 200, 50);

/// Returns the terminal color of a snake body.
#[must_use]
pub fn snake_color(color: SnakeColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// Returns the outline color drawn around snake segments; black snakes get
/// a white outline so they stay visible.
#[must_use]
pub fn snake_outline(color: SnakeColor) -> Color {
    match color {
        SnakeColor::Black => Color::Rgb(255, 255, 255),
        _ => Color::Rgb(0, 0, 0),
    }
}
