//! Core engine types: coordinates, board, RNG, configuration, errors.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games supply their own cell types via `CellState` rather than modifying the core.

pub mod coord;
pub mod board;
pub mod rng;
pub mod config;
pub mod error;

pub use coord::{Coord, Direction};
pub use board::{Board, CellState};
pub use rng::GameRng;
pub use config::SessionConfig;
pub use error::{BoundsError, GameError, MoveRejected, Result};
