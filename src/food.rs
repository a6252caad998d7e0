use std::collections::HashSet;

use rand::Rng;

use crate::error::GameError;
use crate::grid::{GridSize, Position};

/// Owner of the single food cell on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodSpawner {
    position: Position,
}

impl FoodSpawner {
    /// Creates food at a fixed `position`.
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a cell not listed in `occupied`.
    pub fn spawn<'a, R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        occupied: impl IntoIterator<Item = &'a Position>,
    ) -> Result<Self, GameError> {
        spawn_position(rng, bounds, occupied).map(Self::at)
    }

    /// Moves the food to a fresh free cell and returns it.
    pub fn respawn<'a, R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        occupied: impl IntoIterator<Item = &'a Position>,
    ) -> Result<Position, GameError> {
        self.position = spawn_position(rng, bounds, occupied)?;
        Ok(self.position)
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }
}

/// Draws uniformly from the cells of `bounds` not in `occupied`.
///
/// The free set is built up front, so a full board is reported as
/// [`GameError::BoardFull`] instead of looping.
pub fn spawn_position<'a, R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: impl IntoIterator<Item = &'a Position>,
) -> Result<Position, GameError> {
    let occupied: HashSet<Position> = occupied.into_iter().copied().collect();
    let candidates: Vec<Position> = bounds
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .collect();

    if candidates.is_empty() {
        return Err(GameError::BoardFull {
            width: bounds.width,
            height: bounds.height,
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
