use crate::input::Direction;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when `position` lies inside the grid.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
    }

    /// Returns the spawn cell of a fresh snake.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }

    /// Iterates over every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (0..i32::from(self.height))
            .flat_map(move |y| (0..i32::from(self.width)).map(move |x| Position { x, y }))
    }
}

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{GridSize, Position};

    #[test]
    fn contains_rejects_cells_outside_each_edge() {
        let bounds = GridSize {
            width: 4,
            height: 3,
        };

        assert!(bounds.contains(Position { x: 0, y: 0 }));
        assert!(bounds.contains(Position { x: 3, y: 2 }));
        assert!(!bounds.contains(Position { x: -1, y: 1 }));
        assert!(!bounds.contains(Position { x: 4, y: 1 }));
        assert!(!bounds.contains(Position { x: 1, y: -1 }));
        assert!(!bounds.contains(Position { x: 1, y: 3 }));
    }

    #[test]
    fn step_moves_one_cell_and_neutral_stays() {
        let origin = Position { x: 5, y: 5 };

        assert_eq!(origin.step(Direction::Up), Position { x: 5, y: 4 });
        assert_eq!(origin.step(Direction::Down), Position { x: 5, y: 6 });
        assert_eq!(origin.step(Direction::Left), Position { x: 4, y: 5 });
        assert_eq!(origin.step(Direction::Right), Position { x: 6, y: 5 });
        assert_eq!(origin.step(Direction::Neutral), origin);
    }

    #[test]
    fn cells_cover_the_whole_grid_once() {
        let bounds = GridSize {
            width: 5,
            height: 2,
        };

        let cells: Vec<_> = bounds.cells().collect();

        assert_eq!(cells.len(), bounds.total_cells());
        assert_eq!(cells[0], Position { x: 0, y: 0 });
        assert_eq!(cells[9], Position { x: 4, y: 1 });
        assert!(cells.iter().all(|cell| bounds.contains(*cell)));
    }

    #[test]
    fn center_uses_integer_halves() {
        let bounds = GridSize {
            width: 40,
            height: 30,
        };

        assert_eq!(bounds.center(), Position { x: 20, y: 15 });
    }
}
