//! Grid coordinates and unit directions.
//!
//! Coordinates are signed so that a step off the edge of the grid is
//! representable; bounds are enforced by `Board`, not by `Coord`.

use serde::{Deserialize, Serialize};

/// A cell address on a grid.
///
/// `x` is the first index and `y` the second. Snake treats `x` as the
/// horizontal axis; tic-tac-toe treats it as the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Heading on the grid. `Up` decreases `y`, `Right` increases `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four headings.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The exact reverse heading.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_applies_unit_vector() {
        let origin = Coord::new(10, 10);
        assert_eq!(origin.step(Direction::Right), Coord::new(11, 10));
        assert_eq!(origin.step(Direction::Left), Coord::new(9, 10));
        assert_eq!(origin.step(Direction::Up), Coord::new(10, 9));
        assert_eq!(origin.step(Direction::Down), Coord::new(10, 11));
    }

    #[test]
    fn test_opposite_is_involution() {
        for direction in Direction::ALL {
            assert_ne!(direction, direction.opposite());
            assert_eq!(direction, direction.opposite().opposite());
        }
    }

    #[test]
    fn test_step_off_edge_is_representable() {
        assert_eq!(Coord::new(0, 0).step(Direction::Up), Coord::new(0, -1));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Coord::new(1, 2)), "(1, 2)");
        assert_eq!(format!("{}", Direction::Left), "LEFT");
    }
}
