use std::collections::VecDeque;

use crate::config::{SnakeColor, TURN_QUEUE_CAPACITY};
use crate::grid::{GridSize, Position};
use crate::input::Direction;

/// Why a snake stopped moving.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Mutable snake state and turn buffering behavior.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    last_direction: Direction,
    pending_turns: VecDeque<Direction>,
    grow_pending: u32,
    death_reason: Option<DeathReason>,
    score: u32,
    color: SnakeColor,
}

impl Snake {
    /// Creates an idle one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position, color: SnakeColor) -> Self {
        Self::from_segments(vec![start], Direction::Neutral, color)
    }

    /// Creates an idle one-cell snake in the middle of `bounds`.
    #[must_use]
    pub fn centered(bounds: GridSize, color: SnakeColor) -> Self {
        Self::new(bounds.center(), color)
    }

    /// Creates a snake from explicit body segments (front is head) already
    /// moving in `direction`.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction, color: SnakeColor) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            body: VecDeque::from(segments),
            direction,
            last_direction: direction,
            pending_turns: VecDeque::with_capacity(TURN_QUEUE_CAPACITY),
            grow_pending: 0,
            death_reason: None,
            score: 0,
            color,
        }
    }

    /// Puts the snake back into its initial single-cell state.
    pub fn reset(&mut self, bounds: GridSize, color: SnakeColor) {
        *self = Self::centered(bounds, color);
    }

    /// Queues a turn for a later tick.
    ///
    /// The request is compared against the most recently queued heading, so
    /// two quick presses cannot chain into a reversal. Reversals, repeats of
    /// the reference heading and `Neutral` are ignored, as is anything
    /// arriving while the queue is full.
    pub fn queue_turn(&mut self, requested: Direction) {
        if requested == Direction::Neutral {
            return;
        }

        let reference = self.reference_direction();
        if requested == reference.opposite() || requested == reference {
            return;
        }

        if self.pending_turns.len() < TURN_QUEUE_CAPACITY {
            self.pending_turns.push_back(requested);
        }
    }

    fn reference_direction(&self) -> Direction {
        if let Some(last) = self.pending_turns.back() {
            *last
        } else if self.direction != Direction::Neutral {
            self.direction
        } else {
            self.last_direction
        }
    }

    /// Applies one movement step. Does nothing once the snake is dead.
    ///
    /// A colliding step marks the snake dead and leaves the body exactly as
    /// it was before the step.
    pub fn advance(&mut self, bounds: GridSize) {
        if !self.is_alive() {
            return;
        }

        if let Some(turn) = self.pending_turns.pop_front() {
            self.direction = turn;
            self.last_direction = turn;
        }

        if self.direction == Direction::Neutral {
            return;
        }

        let next_head = self.head().step(self.direction);

        if !bounds.contains(next_head) {
            self.death_reason = Some(DeathReason::WallCollision);
            return;
        }

        if self.collides_with_body(next_head) {
            self.death_reason = Some(DeathReason::SelfCollision);
            return;
        }

        self.body.push_front(next_head);
        if self.grow_pending > 0 {
            self.grow_pending -= 1;
        } else {
            self.body.pop_back();
        }
    }

    // The tail leaves its cell on a non-growing step, so it is excluded.
    fn collides_with_body(&self, next_head: Position) -> bool {
        let checked = if self.grow_pending > 0 {
            self.body.len()
        } else {
            self.body.len() - 1
        };

        self.body
            .iter()
            .take(checked)
            .any(|segment| *segment == next_head)
    }

    /// Returns the cell the next [`Snake::advance`] will try to enter, or
    /// `None` while idle or dead.
    #[must_use]
    pub fn next_head(&self) -> Option<Position> {
        if !self.is_alive() {
            return None;
        }

        let direction = self
            .pending_turns
            .front()
            .copied()
            .unwrap_or(self.direction);
        if direction == Direction::Neutral {
            return None;
        }

        Some(self.head().step(direction))
    }

    /// Adds `units` cells of growth, spent one per tick.
    pub fn grow(&mut self, units: u32) {
        self.grow_pending = self.grow_pending.saturating_add(units);
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.death_reason.is_none()
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Returns the direction applied on the last tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the queued turns, oldest first.
    pub fn pending_turns(&self) -> impl Iterator<Item = &Direction> {
        self.pending_turns.iter()
    }

    #[must_use]
    pub fn grow_pending(&self) -> u32 {
        self.grow_pending
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn color(&self) -> SnakeColor {
        self.color
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::config::SnakeColor;
    use crate::grid::{GridSize, Position};
    use crate::input::Direction;

    use super::{DeathReason, Snake};

    const BOUNDS: GridSize = GridSize {
        width: 40,
        height: 20,
    };

    fn segments(snake: &Snake) -> Vec<Position> {
        snake.segments().copied().collect()
    }

    fn pending(snake: &Snake) -> Vec<Direction> {
        snake.pending_turns().copied().collect()
    }

    #[test]
    fn new_snake_idles_until_first_turn() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, SnakeColor::Green);

        snake.advance(BOUNDS);
        assert_eq!(snake.head(), Position { x: 5, y: 5 });
        assert_eq!(snake.direction(), Direction::Neutral);

        snake.queue_turn(Direction::Left);
        snake.advance(BOUNDS);
        assert_eq!(snake.head(), Position { x: 4, y: 5 });
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }],
            Direction::Right,
            SnakeColor::Green,
        );

        snake.advance(BOUNDS);

        assert_eq!(snake.head(), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn growth_keeps_tail_once_per_unit() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }],
            Direction::Right,
            SnakeColor::Green,
        );

        snake.grow(2);
        snake.advance(BOUNDS);
        assert_eq!(snake.len(), 2);
        snake.advance(BOUNDS);
        assert_eq!(snake.len(), 3);
        snake.advance(BOUNDS);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.grow_pending(), 0);
    }

    #[test]
    fn reversal_requests_never_touch_the_queue() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
            Direction::Right,
            SnakeColor::Green,
        );

        for _ in 0..10 {
            snake.queue_turn(Direction::Left);
        }
        assert!(pending(&snake).is_empty());

        snake.queue_turn(Direction::Up);
        for _ in 0..10 {
            snake.queue_turn(Direction::Down);
        }
        assert_eq!(pending(&snake), vec![Direction::Up]);
    }

    #[test]
    fn repeated_heading_is_not_queued() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }],
            Direction::Right,
            SnakeColor::Green,
        );

        snake.queue_turn(Direction::Right);
        snake.queue_turn(Direction::Up);
        snake.queue_turn(Direction::Up);

        assert_eq!(pending(&snake), vec![Direction::Up]);
    }

    #[test]
    fn neutral_is_never_queued() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }],
            Direction::Right,
            SnakeColor::Green,
        );

        snake.queue_turn(Direction::Neutral);

        assert!(pending(&snake).is_empty());
    }

    #[test]
    fn queued_turns_apply_in_fifo_order() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }],
            Direction::Right,
            SnakeColor::Green,
        );

        snake.queue_turn(Direction::Up);
        snake.queue_turn(Direction::Left);

        snake.advance(BOUNDS);
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.head(), Position { x: 5, y: 4 });

        snake.advance(BOUNDS);
        assert_eq!(snake.direction(), Direction::Left);
        assert_eq!(snake.head(), Position { x: 4, y: 4 });
    }

    #[test]
    fn queue_holds_at_most_three_turns() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }],
            Direction::Right,
            SnakeColor::Green,
        );

        snake.queue_turn(Direction::Up);
        snake.queue_turn(Direction::Left);
        snake.queue_turn(Direction::Down);
        snake.queue_turn(Direction::Right);

        assert_eq!(
            pending(&snake),
            vec![Direction::Up, Direction::Left, Direction::Down]
        );
    }

    #[test]
    fn reversal_is_checked_against_last_queued_turn() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }],
            Direction::Down,
            SnakeColor::Green,
        );

        snake.queue_turn(Direction::Right);
        snake.queue_turn(Direction::Left);

        assert_eq!(pending(&snake), vec![Direction::Right]);
    }

    #[test]
    fn wall_collision_keeps_body_intact() {
        let body = vec![Position { x: 0, y: 3 }, Position { x: 1, y: 3 }];
        let mut snake = Snake::from_segments(body.clone(), Direction::Left, SnakeColor::Green);

        snake.advance(BOUNDS);

        assert!(!snake.is_alive());
        assert_eq!(snake.death_reason(), Some(DeathReason::WallCollision));
        assert_eq!(segments(&snake), body);
    }

    #[test]
    fn self_collision_on_closed_loop_keeps_body_intact() {
        let body = vec![
            Position { x: 2, y: 2 },
            Position { x: 3, y: 2 },
            Position { x: 4, y: 2 },
            Position { x: 5, y: 2 },
            Position { x: 6, y: 2 },
        ];
        let mut snake = Snake::from_segments(body, Direction::Left, SnakeColor::Green);

        snake.queue_turn(Direction::Down);
        snake.queue_turn(Direction::Right);
        snake.queue_turn(Direction::Up);

        snake.advance(BOUNDS);
        snake.advance(BOUNDS);
        assert!(snake.is_alive());
        let before = segments(&snake);

        snake.advance(BOUNDS);

        assert!(!snake.is_alive());
        assert_eq!(snake.death_reason(), Some(DeathReason::SelfCollision));
        assert_eq!(segments(&snake), before);
    }

    #[test]
    fn entering_the_vacating_tail_cell_is_legal() {
        // 2x2 loop: head (1,1) moving up ends on the tail at (1,0).
        let body = vec![
            Position { x: 1, y: 1 },
            Position { x: 0, y: 1 },
            Position { x: 0, y: 0 },
            Position { x: 1, y: 0 },
        ];
        let mut snake = Snake::from_segments(body, Direction::Right, SnakeColor::Green);

        snake.queue_turn(Direction::Up);
        snake.advance(BOUNDS);

        assert!(snake.is_alive());
        assert_eq!(snake.head(), Position { x: 1, y: 0 });
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn entering_the_tail_cell_while_growing_is_a_collision() {
        let body = vec![
            Position { x: 1, y: 1 },
            Position { x: 0, y: 1 },
            Position { x: 0, y: 0 },
            Position { x: 1, y: 0 },
        ];
        let mut snake = Snake::from_segments(body, Direction::Right, SnakeColor::Green);

        snake.grow(1);
        snake.queue_turn(Direction::Up);
        snake.advance(BOUNDS);

        assert_eq!(snake.death_reason(), Some(DeathReason::SelfCollision));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn dead_snake_ignores_further_ticks() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 0, y: 0 }],
            Direction::Up,
            SnakeColor::Green,
        );

        snake.advance(BOUNDS);
        assert!(!snake.is_alive());

        snake.queue_turn(Direction::Right);
        snake.advance(BOUNDS);

        assert_eq!(snake.head(), Position { x: 0, y: 0 });
        assert!(!snake.is_alive());
        assert_eq!(snake.next_head(), None);
    }

    #[test]
    fn next_head_looks_through_the_turn_queue() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, SnakeColor::Green);
        assert_eq!(snake.next_head(), None);

        snake.queue_turn(Direction::Down);

        assert_eq!(snake.next_head(), Some(Position { x: 5, y: 6 }));
    }

    #[test]
    fn reset_restores_the_centered_start() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 3, y: 3 }, Position { x: 2, y: 3 }],
            Direction::Right,
            SnakeColor::Blue,
        );
        snake.add_score(4);
        snake.grow(3);
        snake.queue_turn(Direction::Up);

        snake.reset(BOUNDS, SnakeColor::Blue);

        assert_eq!(segments(&snake), vec![Position { x: 20, y: 10 }]);
        assert!(snake.is_alive());
        assert_eq!(snake.score(), 0);
        assert_eq!(snake.grow_pending(), 0);
        assert!(pending(&snake).is_empty());
        assert_eq!(snake.direction(), Direction::Neutral);
        assert_eq!(snake.color(), SnakeColor::Blue);
    }

    #[test]
    fn living_snake_changes_length_by_at_most_one_per_tick() {
        let mut rng = StdRng::seed_from_u64(99);
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        let bounds = GridSize {
            width: 12,
            height: 12,
        };

        for _ in 0..50 {
            let mut snake = Snake::centered(bounds, SnakeColor::Green);
            for _ in 0..200 {
                if rng.gen_bool(0.4) {
                    snake.queue_turn(directions[rng.gen_range(0..directions.len())]);
                }
                if rng.gen_bool(0.2) {
                    snake.grow(1);
                }

                let before = snake.len();
                snake.advance(bounds);
                if !snake.is_alive() {
                    assert_eq!(snake.len(), before);
                    break;
                }

                let after = snake.len();
                assert!(after == before || after == before + 1);

                let mut cells = segments(&snake);
                cells.sort_by_key(|cell| (cell.x, cell.y));
                cells.dedup();
                assert_eq!(cells.len(), after);
            }
        }
    }
}
