//! Grid-based Snake: a deterministic simulation core (grid, snake, food,
//! session, state machine) plus the terminal front end that drives it.

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod theme;
pub mod ui;
