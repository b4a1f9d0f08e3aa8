//! Automated players.
//!
//! - `Agent`: pluggable move-selection policy
//! - `RandomAgent`: uniform choice among empty cells

pub mod policy;

pub use policy::{Agent, RandomAgent};
