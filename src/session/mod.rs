//! Session layer: one controller per running game.
//!
//! - `SessionController`: sequences moves, ticks and opponent replies
//! - `ScoreBoard`: per-outcome tallies that survive resets
//! - `ticker`: fixed-interval loop for real-time games

pub mod controller;
pub mod scoreboard;
pub mod ticker;

pub use controller::{SessionController, Snapshot};
pub use scoreboard::ScoreBoard;
pub use ticker::{run, ImmediateTicker, IntervalTicker, Ticker};
