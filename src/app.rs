use std::time::Duration;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::{DEFAULT_PLAYER_NAME, Difficulty, MAX_NAME_LEN, SnakeColor, UI_FRAME_INTERVAL};
use crate::error::GameError;
use crate::game::{GameSession, TickOutcome};
use crate::grid::{GridSize, Position};
use crate::input::Direction;
use crate::snake::DeathReason;
use crate::theme::ThemeKind;

/// Top-level screen the game is on.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AppState {
    Menu,
    Playing,
    GameOver,
    Victory,
}

/// Options picked on the menu screen.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MenuSelection {
    pub difficulty: Difficulty,
    pub color: SnakeColor,
    pub name: String,
    pub theme: ThemeKind,
}

impl Default for MenuSelection {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            color: SnakeColor::default(),
            name: DEFAULT_PLAYER_NAME.to_owned(),
            theme: ThemeKind::default(),
        }
    }
}

/// Owned copy of everything a frame needs, taken between ticks.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub state: AppState,
    pub bounds: GridSize,
    pub snake_cells: Vec<Position>,
    pub snake_color: SnakeColor,
    pub food_position: Option<Position>,
    pub score: u32,
    pub length: usize,
    pub alive: bool,
    pub death_reason: Option<DeathReason>,
    pub win_length: usize,
    pub difficulty: Difficulty,
    pub name: String,
    pub theme: ThemeKind,
}

/// Sequences menu, rounds and result screens.
///
/// Intents that do not belong to the current state are ignored.
#[derive(Debug)]
pub struct GameStateMachine {
    state: AppState,
    selection: MenuSelection,
    session: Option<GameSession>,
    bounds: GridSize,
    rng: StdRng,
}

impl GameStateMachine {
    #[must_use]
    pub fn new(bounds: GridSize, selection: MenuSelection) -> Self {
        Self::with_rng(bounds, selection, StdRng::from_entropy())
    }

    /// Creates a machine whose sessions replay identically for one seed.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, selection: MenuSelection, seed: u64) -> Self {
        Self::with_rng(bounds, selection, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut selection: MenuSelection, rng: StdRng) -> Self {
        selection.name = clamp_name(&selection.name);
        Self {
            state: AppState::Menu,
            selection,
            session: None,
            bounds,
            rng,
        }
    }

    #[must_use]
    pub fn state(&self) -> AppState {
        self.state
    }

    #[must_use]
    pub fn selection(&self) -> &MenuSelection {
        &self.selection
    }

    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        if self.state == AppState::Menu {
            self.selection.difficulty = difficulty;
        }
    }

    pub fn select_color(&mut self, color: SnakeColor) {
        if self.state == AppState::Menu {
            self.selection.color = color;
        }
    }

    /// Replaces the player name, keeping at most the first 15 characters.
    pub fn set_name(&mut self, name: &str) {
        if self.state == AppState::Menu {
            self.selection.name = clamp_name(name);
        }
    }

    pub fn toggle_theme(&mut self) {
        if self.state == AppState::Menu {
            self.selection.theme = self.selection.theme.toggled();
        }
    }

    pub fn queue_turn(&mut self, direction: Direction) {
        if self.state != AppState::Playing {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.queue_turn(direction);
        }
    }

    /// Leaves the menu and starts a round with the current selection.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.state != AppState::Menu {
            return Ok(());
        }

        if self.selection.name.trim().is_empty() {
            self.selection.name = DEFAULT_PLAYER_NAME.to_owned();
        }

        let seed = self.rng.next_u64();
        let session = GameSession::new_with_seed(
            self.bounds,
            self.selection.difficulty,
            self.selection.color,
            seed,
        )?;
        self.session = Some(session);
        self.transition(AppState::Playing);
        Ok(())
    }

    /// Restarts the finished round with the same settings.
    pub fn replay(&mut self) -> Result<(), GameError> {
        if !self.is_result_screen() {
            return Ok(());
        }

        match self.session.as_mut() {
            Some(session) => session.restart()?,
            None => {
                let seed = self.rng.next_u64();
                self.session = Some(GameSession::new_with_seed(
                    self.bounds,
                    self.selection.difficulty,
                    self.selection.color,
                    seed,
                )?);
            }
        }
        self.transition(AppState::Playing);
        Ok(())
    }

    /// Drops the finished round and returns to the menu.
    pub fn menu(&mut self) {
        if !self.is_result_screen() {
            return;
        }

        self.session = None;
        self.transition(AppState::Menu);
    }

    /// Runs one step of the active round; a no-op outside `Playing`.
    pub fn tick(&mut self) -> Result<AppState, GameError> {
        if self.state != AppState::Playing {
            return Ok(self.state);
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(self.state);
        };

        match session.tick()? {
            TickOutcome::Ongoing => {}
            TickOutcome::Won => self.transition(AppState::Victory),
            TickOutcome::Lost => self.transition(AppState::GameOver),
        }
        Ok(self.state)
    }

    /// Time the host should wait before the next [`GameStateMachine::tick`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        match (self.state, self.session.as_ref()) {
            (AppState::Playing, Some(session)) => session.tick_interval(),
            _ => UI_FRAME_INTERVAL,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let difficulty = self
            .session
            .as_ref()
            .map_or(self.selection.difficulty, GameSession::difficulty);

        let mut snapshot = Snapshot {
            state: self.state,
            bounds: self.bounds,
            snake_cells: Vec::new(),
            snake_color: self.selection.color,
            food_position: None,
            score: 0,
            length: 0,
            alive: true,
            death_reason: None,
            win_length: difficulty.win_length(),
            difficulty,
            name: self.selection.name.clone(),
            theme: self.selection.theme,
        };

        if let Some(session) = self.session.as_ref() {
            let snake = &session.snake;
            snapshot.snake_cells = snake.segments().copied().collect();
            snapshot.snake_color = snake.color();
            snapshot.food_position = Some(session.food.position());
            snapshot.score = snake.score();
            snapshot.length = snake.len();
            snapshot.alive = snake.is_alive();
            snapshot.death_reason = snake.death_reason();
            snapshot.win_length = session.win_length();
        }

        snapshot
    }

    fn is_result_screen(&self) -> bool {
        matches!(self.state, AppState::GameOver | AppState::Victory)
    }

    fn transition(&mut self, next: AppState) {
        if self.state == next {
            return;
        }

        match self.session.as_ref() {
            Some(session) => tracing::info!(
                from = ?self.state,
                to = ?next,
                score = session.snake.score(),
                length = session.snake.len(),
                "state changed"
            ),
            None => tracing::info!(from = ?self.state, to = ?next, "state changed"),
        }
        self.state = next;
    }
}

fn clamp_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LEN).collect()
}
