//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal moves for each round state
//! - How moves and ticks modify state
//! - Win, loss and draw conditions
//!
//! The session layer calls into `RulesEngine` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::{Outcome, Phase, RulesEngine, Transition};
