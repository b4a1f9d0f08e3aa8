//! Error taxonomy.
//!
//! - `BoundsError`: a coordinate outside the grid. Validated input never
//!   produces one; seeing it means a caller skipped validation.
//! - `MoveRejected`: an illegal move. Expected and recoverable; the state
//!   is left exactly as it was.
//! - `GameError`: everything else, mostly invalid configuration.

use thiserror::Error;

use super::coord::{Coord, Direction};

/// A coordinate outside `[0, width) x [0, height)`.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("coordinate {coord} is outside the {width}x{height} grid")]
pub struct BoundsError {
    pub coord: Coord,
    pub width: usize,
    pub height: usize,
}

/// Reasons a move is refused.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum MoveRejected {
    #[error("move targets a cell off the board: {0}")]
    OutOfBounds(#[from] BoundsError),

    #[error("cell {0} is already occupied")]
    Occupied(Coord),

    #[error("round is over; reset to play again")]
    RoundOver,

    #[error("cannot reverse from {current} to {requested}")]
    Reversal { current: Direction, requested: Direction },

    #[error("direction already changed this tick")]
    AlreadyTurned,

    #[error("it is not the submitting player's turn")]
    NotYourTurn,
}

/// Crate-level error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GameError {
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error(transparent)]
    Bounds(#[from] BoundsError),

    #[error(transparent)]
    Rejected(#[from] MoveRejected),
}

impl GameError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig { message: message.into() }
    }
}

/// Result alias for fallible crate operations.
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_error_message() {
        let err = BoundsError { coord: Coord::new(3, -1), width: 3, height: 3 };
        assert_eq!(err.to_string(), "coordinate (3, -1) is outside the 3x3 grid");
    }

    #[test]
    fn test_bounds_error_converts_to_rejection() {
        let err = BoundsError { coord: Coord::new(5, 5), width: 3, height: 3 };
        let rejected: MoveRejected = err.into();
        assert_eq!(rejected, MoveRejected::OutOfBounds(err));
    }

    #[test]
    fn test_reversal_message() {
        let err = MoveRejected::Reversal {
            current: Direction::Right,
            requested: Direction::Left,
        };
        assert_eq!(err.to_string(), "cannot reverse from RIGHT to LEFT");
    }
}
