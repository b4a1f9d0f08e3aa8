//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - How a round starts
//! - Which moves are legal
//! - How moves (and, for timed games, ticks) modify state
//! - Terminal conditions
//!
//! ## Turn cycle
//!
//! ```text
//! AwaitingMove -> play/tick -> Transition::Continuing -> AwaitingMove
//!                          \-> Transition::Terminal   -> Terminal
//! ```
//!
//! Evaluation happens inside a single call to `play` or `tick`, win checks
//! before draw checks, and its result is the returned `Transition`. Between
//! calls a round is either `AwaitingMove` or `Terminal`; only a reset leaves
//! `Terminal`.

use serde::{Deserialize, Serialize};

use crate::core::{Board, CellState, GameRng, MoveRejected};

/// Position of a round between calls into the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the next move or tick.
    #[default]
    AwaitingMove,
    /// The round is over. Only a reset leaves this phase.
    Terminal,
}

/// Result of applying a move or tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition<O> {
    /// The round goes on.
    Continuing,
    /// The round just ended.
    Terminal(O),
}

impl<O> Transition<O> {
    /// Whether the round ended.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Transition::Terminal(_))
    }
}

/// Terminal result of a round, as recorded on a scoreboard.
pub trait Outcome: Clone + std::fmt::Debug + PartialEq {
    /// Scoreboard key for this outcome.
    fn label(&self) -> &'static str;
}

/// Rules engine trait.
///
/// Engines are immutable rule sets; all mutable data lives in `State`.
///
/// ## Implementation Notes
///
/// - `validate` must not mutate anything
/// - `play` validates first; a rejected move leaves the state untouched
/// - `play` and `tick` must be deterministic given the RNG
/// - `outcome` returns `None` while the round continues
pub trait RulesEngine {
    /// Cell occupancy type.
    type Cell: CellState;

    /// A single player input: a target cell, a direction change.
    type Move: Clone + std::fmt::Debug;

    /// Terminal result.
    type Outcome: Outcome;

    /// Mutable round state.
    type State: Clone + std::fmt::Debug + PartialEq + Serialize;

    /// Create the state for a fresh round.
    fn new_round(&self, rng: &mut GameRng) -> Self::State;

    /// The board of a round.
    fn board<'s>(&self, state: &'s Self::State) -> &'s Board<Self::Cell>;

    /// The recorded outcome, once the round is terminal.
    fn outcome<'s>(&self, state: &'s Self::State) -> Option<&'s Self::Outcome>;

    /// Check a move without applying it.
    fn validate(&self, state: &Self::State, mv: &Self::Move) -> Result<(), MoveRejected>;

    /// Validate and apply a move, then evaluate the result.
    fn play(
        &self,
        state: &mut Self::State,
        mv: &Self::Move,
        rng: &mut GameRng,
    ) -> Result<Transition<Self::Outcome>, MoveRejected>;

    /// Advance game time by one tick.
    ///
    /// Event-driven games have no notion of time; the default does nothing.
    fn tick(&self, _state: &mut Self::State, _rng: &mut GameRng) -> Option<Transition<Self::Outcome>> {
        None
    }

    /// Whether the automated opponent moves next.
    fn agent_to_move(&self, _state: &Self::State) -> bool {
        false
    }

    /// Points earned so far in this round (for the high score).
    fn round_points(&self, _state: &Self::State) -> u32 {
        0
    }

    /// Every outcome label, in display order.
    fn outcome_labels(&self) -> &'static [&'static str];

    // === Convenience Methods ===

    /// Whether the round is over.
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.outcome(state).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_is_terminal() {
        assert!(!Transition::<()>::Continuing.is_terminal());
        assert!(Transition::Terminal(()).is_terminal());
    }

    #[test]
    fn test_default_phase() {
        assert_eq!(Phase::default(), Phase::AwaitingMove);
    }
}
