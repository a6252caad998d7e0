use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{Difficulty, SnakeColor};
use crate::error::GameError;
use crate::food::FoodSpawner;
use crate::grid::GridSize;
use crate::input::Direction;
use crate::snake::Snake;

/// Result of one session tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Ongoing,
    Won,
    Lost,
}

/// Complete mutable state of one round.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub food: FoodSpawner,
    pub tick_count: u64,
    difficulty: Difficulty,
    win_length: usize,
    bounds: GridSize,
    outcome: TickOutcome,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session seeded from system entropy.
    pub fn new(
        bounds: GridSize,
        difficulty: Difficulty,
        color: SnakeColor,
    ) -> Result<Self, GameError> {
        Self::with_rng(bounds, difficulty, color, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn new_with_seed(
        bounds: GridSize,
        difficulty: Difficulty,
        color: SnakeColor,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::with_rng(bounds, difficulty, color, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        bounds: GridSize,
        difficulty: Difficulty,
        color: SnakeColor,
        mut rng: StdRng,
    ) -> Result<Self, GameError> {
        let win_length = difficulty.win_length();
        if bounds.total_cells() <= win_length {
            return Err(GameError::GridTooSmall {
                width: bounds.width,
                height: bounds.height,
                win_length,
            });
        }

        let snake = Snake::centered(bounds, color);
        let food = FoodSpawner::spawn(&mut rng, bounds, snake.segments())?;

        tracing::info!(
            ?difficulty,
            width = bounds.width,
            height = bounds.height,
            "session started"
        );

        Ok(Self {
            snake,
            food,
            tick_count: 0,
            difficulty,
            win_length,
            bounds,
            outcome: TickOutcome::Ongoing,
            rng,
        })
    }

    /// Replaces snake and food with a fresh start, keeping the settings.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let snake = Snake::centered(self.bounds, self.snake.color());
        let food = FoodSpawner::spawn(&mut self.rng, self.bounds, snake.segments())?;

        self.snake = snake;
        self.food = food;
        self.tick_count = 0;
        self.outcome = TickOutcome::Ongoing;
        tracing::info!(difficulty = ?self.difficulty, "session restarted");
        Ok(())
    }

    /// Forwards a steering request to the snake.
    pub fn queue_turn(&mut self, direction: Direction) {
        self.snake.queue_turn(direction);
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Once a tick has reported `Won` or `Lost` the session is frozen and
    /// keeps reporting it.
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if self.outcome != TickOutcome::Ongoing {
            return Ok(self.outcome);
        }

        self.tick_count += 1;

        // Growth is issued before the step so the tail stays put on the
        // very tick the food is eaten.
        let eating = self.snake.next_head() == Some(self.food.position());
        if eating {
            self.snake.grow(1);
        }

        self.snake.advance(self.bounds);

        if eating && self.snake.head() == self.food.position() {
            self.snake.add_score(1);
            let next = self
                .food
                .respawn(&mut self.rng, self.bounds, self.snake.segments())?;
            tracing::debug!(
                score = self.snake.score(),
                length = self.snake.len(),
                x = next.x,
                y = next.y,
                "food eaten"
            );
        }

        self.outcome = if self.snake.len() >= self.win_length {
            TickOutcome::Won
        } else if !self.snake.is_alive() {
            tracing::debug!(reason = ?self.snake.death_reason(), "snake died");
            TickOutcome::Lost
        } else {
            TickOutcome::Ongoing
        };

        Ok(self.outcome)
    }

    #[must_use]
    pub fn outcome(&self) -> TickOutcome {
        self.outcome
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Wall-clock time between two ticks of this session.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.difficulty.tick_interval()
    }
}
