//! Fixed-size grid of cells.
//!
//! ## Storage
//!
//! Cells are stored row-major in a flat `Vec` (index `y * width + x`).
//! The grid never changes size after construction.
//!
//! ## Cell states
//!
//! Games supply their own cell type through `CellState`. The board only
//! needs to know which value means "empty".

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::error::BoundsError;

/// Per-game cell occupancy.
pub trait CellState: Copy + Eq + std::fmt::Debug {
    /// The vacant cell value.
    const EMPTY: Self;

    /// Whether this cell is vacant.
    fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// Fixed `width x height` grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board<C> {
    width: usize,
    height: usize,
    cells: Vec<C>,
}

impl<C: CellState> Board<C> {
    /// Create an empty board.
    ///
    /// Dimensions are checked by the game builders; a zero-sized board is
    /// legal here and simply has no cells.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![C::EMPTY; width * height],
        }
    }

    /// Board width (range of `x`).
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Board height (range of `y`).
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `coord` lies on the board.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    fn index(&self, coord: Coord) -> Result<usize, BoundsError> {
        if self.in_bounds(coord) {
            Ok(coord.y as usize * self.width + coord.x as usize)
        } else {
            Err(BoundsError {
                coord,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Read a cell.
    pub fn get(&self, coord: Coord) -> Result<C, BoundsError> {
        let i = self.index(coord)?;
        Ok(self.cells[i])
    }

    /// Overwrite a cell.
    pub fn set(&mut self, coord: Coord, value: C) -> Result<(), BoundsError> {
        let i = self.index(coord)?;
        self.cells[i] = value;
        Ok(())
    }

    /// True iff no empty cell remains.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Iterate over `(coord, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, C)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (Coord::new((i % width) as i32, (i / width) as i32), c))
    }

    /// All empty cells, ordered by `x` then `y`.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Coord> {
        let mut cells: Vec<Coord> = self
            .iter()
            .filter(|(_, c)| c.is_empty())
            .map(|(coord, _)| coord)
            .collect();
        cells.sort_unstable();
        cells
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }
}
