//! Tic-tac-toe on a 3x3 grid.
//!
//! - X opens by default; turns alternate
//! - Three equal marks in a row, column or diagonal win
//! - A full board without a line is a draw
//! - Optionally one side is played by an automated opponent

mod game;
pub mod lines;

pub use game::{
    Placement, TicTacToe, TicTacToeBuilder, TicTacToeConfig, TicTacToeOutcome, TicTacToeState, SIZE,
};
pub use lines::{check_winner, is_draw, Mark, Square, WinningLine, LINES};
