//! Win and draw detection for tic-tac-toe.
//!
//! Cells are addressed `(row, column)`: `Coord::x` is the row.
//!
//! ## Scan order
//!
//! Lines are checked in a fixed order: the three rows top to bottom, the
//! three columns left to right, the main diagonal, then the anti-diagonal.
//! The first complete line wins. Sequential play completes at most one new
//! line per move, but pre-populated boards can hold several, and the order
//! decides which one is reported.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::instrument;

use crate::core::{Board, CellState, Coord};

/// Side in a tic-tac-toe round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Scoreboard label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tic-tac-toe cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    #[default]
    Empty,
    Taken(Mark),
}

impl CellState for Square {
    const EMPTY: Self = Square::Empty;
}

/// Ordered coordinates of a completed line.
pub type WinningLine = SmallVec<[Coord; 3]>;

const fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

/// Every line, in scan order.
pub const LINES: [[Coord; 3]; 8] = [
    // Rows
    [c(0, 0), c(0, 1), c(0, 2)],
    [c(1, 0), c(1, 1), c(1, 2)],
    [c(2, 0), c(2, 1), c(2, 2)],
    // Columns
    [c(0, 0), c(1, 0), c(2, 0)],
    [c(0, 1), c(1, 1), c(2, 1)],
    [c(0, 2), c(1, 2), c(2, 2)],
    // Diagonals
    [c(0, 0), c(1, 1), c(2, 2)],
    [c(0, 2), c(1, 1), c(2, 0)],
];

/// Find the first line held entirely by one mark.
///
/// Returns the mark and the line's coordinates in scan order, or `None`
/// when no line is complete.
#[instrument(level = "trace", skip(board))]
pub fn check_winner(board: &Board<Square>) -> Option<(Mark, WinningLine)> {
    LINES.iter().find_map(|line| {
        let [first, second, third] = (*line).map(|coord| board.get(coord).unwrap_or(Square::Empty));
        match first {
            Square::Taken(mark) if first == second && second == third => {
                Some((mark, SmallVec::from_slice(line)))
            }
            _ => None,
        }
    })
}

/// True iff the board is full and nobody has a line.
#[must_use]
pub fn is_draw(board: &Board<Square>) -> bool {
    board.is_full() && check_winner(board).is_none()
}
