//! Game implementations.
//!
//! - `tictactoe`: event-driven, two sides, optional automated opponent
//! - `snake`: time-driven, single player

pub mod snake;
pub mod tictactoe;
