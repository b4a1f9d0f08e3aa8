//! Snake movement rules.
//!
//! Pure functions over coordinates; the round state decides which body
//! cells to pass in.

use crate::core::{Board, CellState, Coord, Direction, GameRng};

/// The cell the head enters when moving one step in `direction`.
#[must_use]
pub fn compute_next_head(head: Coord, direction: Direction) -> Coord {
    head.step(direction)
}

/// Whether `coord` lies outside a `width x height` board.
#[must_use]
pub fn is_wall_collision(coord: Coord, width: usize, height: usize) -> bool {
    coord.x < 0 || coord.y < 0 || coord.x as usize >= width || coord.y as usize >= height
}

/// Whether `coord` is one of the given body cells.
///
/// The caller chooses the body: the full body when the snake grows this
/// tick, the body without its tail otherwise (the tail cell is vacated
/// before the head arrives).
pub fn is_self_collision<'a>(coord: Coord, body: impl IntoIterator<Item = &'a Coord>) -> bool {
    body.into_iter().any(|&segment| segment == coord)
}

/// Whether `requested` is the exact reverse of `current`.
#[must_use]
pub fn is_reversal(current: Direction, requested: Direction) -> bool {
    requested == current.opposite()
}

/// Pick a uniformly random empty cell for new food.
///
/// Returns `None` when the board has no empty cell left.
pub fn place_food<C: CellState>(board: &Board<C>, rng: &mut GameRng) -> Option<Coord> {
    let empty = board.empty_cells();
    rng.choose(&empty).copied()
}
