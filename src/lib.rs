//! # grid-arcade
//!
//! Turn-based and tick-based grid games over a pure state-transition core.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic Core**: `Board`, `Coord` and `GameRng` know nothing
//!    about any particular game. Games bring their own cell types.
//!
//! 2. **Pure Rules**: A `RulesEngine` maps a state plus a move (or a tick)
//!    to the next state. It never touches input, output or timers.
//!
//! 3. **One Owner**: The `SessionController` is the only thing that mutates
//!    round state or the scoreboard. Presentation reads snapshots.
//!
//! ## Modules
//!
//! - `core`: Coordinates, board, RNG, configuration, errors
//! - `rules`: `RulesEngine` trait and round phases
//! - `agents`: Automated opponents
//! - `games`: Tic-tac-toe and snake
//! - `session`: Controller, scoreboard, tick loop

pub mod core;
pub mod rules;
pub mod agents;
pub mod games;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Board, CellState, Coord, Direction,
    GameRng, SessionConfig,
    BoundsError, GameError, MoveRejected,
};

pub use crate::rules::{Outcome, Phase, RulesEngine, Transition};

pub use crate::agents::{Agent, RandomAgent};

pub use crate::games::tictactoe::{Mark, Square, TicTacToe, TicTacToeBuilder, TicTacToeOutcome, TicTacToeState};
pub use crate::games::snake::{SnakeBuilder, SnakeCell, SnakeGame, SnakeOutcome, SnakeState};

pub use crate::session::{ScoreBoard, SessionController, Snapshot};
