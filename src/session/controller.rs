//! Session controller: the only owner of round state.
//!
//! The controller sequences moves and ticks, runs the automated opponent,
//! and keeps the scoreboard. Presentation code talks to nothing else:
//! it reads `snapshot()` and sends moves, resets and score clears back in.
//!
//! ## Lifecycle
//!
//! - `new`: build the session and its first round
//! - `reset`: replace the round wholesale; scores survive
//! - `teardown`: consume the session, handing back the final scores

use serde::Serialize;
use tracing::{debug, info, instrument, trace, warn};

use super::scoreboard::ScoreBoard;
use crate::agents::Agent;
use crate::core::{GameRng, MoveRejected, SessionConfig};
use crate::rules::{Outcome, RulesEngine, Transition};

/// Read-only view handed to the presentation layer after each change.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a, S> {
    pub state: &'a S,
    pub scores: &'a ScoreBoard,
    pub running: bool,
}

/// Drives one game for one session.
pub struct SessionController<G: RulesEngine> {
    engine: G,
    config: SessionConfig,
    state: G::State,
    scores: ScoreBoard,
    /// Stream for rule-driven randomness (food placement).
    rng: GameRng,
    /// Stream for the automated opponent.
    agent_rng: GameRng,
    agent: Option<Box<dyn Agent<G::Cell, G::Move>>>,
    running: bool,
}

impl<G: RulesEngine> SessionController<G> {
    /// Create a session and deal its first round.
    pub fn new(engine: G, config: SessionConfig) -> Self {
        let seed_rng = GameRng::new(config.seed);
        let mut rng = seed_rng.for_context("rules");
        let agent_rng = seed_rng.for_context("agent");

        let state = engine.new_round(&mut rng);
        let scores = ScoreBoard::with_labels(engine.outcome_labels().iter().copied());

        Self {
            engine,
            config,
            state,
            scores,
            rng,
            agent_rng,
            agent: None,
            running: false,
        }
    }

    /// Attach an automated opponent.
    ///
    /// If the opponent holds the opening move it plays immediately.
    pub fn with_agent(mut self, agent: impl Agent<G::Cell, G::Move> + 'static) -> Self {
        self.agent = Some(Box::new(agent));
        self.respond_with_agent();
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn engine(&self) -> &G {
        &self.engine
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &G::State {
        &self.state
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.engine.is_terminal(&self.state)
    }

    /// Whether the tick loop should keep going.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_, G::State> {
        Snapshot {
            state: &self.state,
            scores: &self.scores,
            running: self.running,
        }
    }

    // === Input ===

    /// Apply a human move, then the opponent's reply if one is due.
    ///
    /// A rejected move leaves the session exactly as it was, so repeating
    /// it yields the same rejection.
    ///
    /// If the opponent's last reply failed (no move, or an illegal one) it
    /// is still due. It gets one more try before `mv` is looked at; if it
    /// fails again the move is refused with `NotYourTurn` and the round
    /// stays blocked until the opponent moves or the round is reset.
    #[instrument(level = "debug", skip(self))]
    pub fn submit_move(&mut self, mv: G::Move) -> Result<&G::State, MoveRejected> {
        if self.agent.is_some() && self.engine.agent_to_move(&self.state) {
            self.respond_with_agent();
            if self.engine.agent_to_move(&self.state) {
                debug!("move rejected: opponent to move");
                return Err(MoveRejected::NotYourTurn);
            }
        }

        match self.engine.play(&mut self.state, &mv, &mut self.rng) {
            Err(rejected) => {
                debug!(%rejected, "move rejected");
                return Err(rejected);
            }
            Ok(Transition::Terminal(outcome)) => self.finish_round(&outcome),
            Ok(Transition::Continuing) => self.respond_with_agent(),
        }

        Ok(&self.state)
    }

    /// Advance game time by one tick.
    ///
    /// Returns `None` when nothing moved: the loop is stopped, the round is
    /// over, or the game has no notion of time.
    pub fn tick(&mut self) -> Option<Transition<G::Outcome>> {
        if !self.running {
            return None;
        }

        let transition = self.engine.tick(&mut self.state, &mut self.rng)?;
        trace!(terminal = transition.is_terminal(), "tick");
        if let Transition::Terminal(outcome) = &transition {
            self.finish_round(outcome);
        }
        Some(transition)
    }

    /// Let the tick loop run. Has no effect on a finished round.
    pub fn start(&mut self) {
        self.running = !self.is_terminal();
        debug!(running = self.running, "start requested");
    }

    /// Pause the tick loop.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Replace the round with a fresh one. Scores are untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) -> &G::State {
        self.state = self.engine.new_round(&mut self.rng);
        self.running = false;
        info!("round reset");
        self.respond_with_agent();
        &self.state
    }

    /// Zero the scoreboard. The current round is untouched.
    pub fn clear_scores(&mut self) {
        self.scores.clear();
        info!("scores cleared");
    }

    /// End the session and hand back its scores.
    pub fn teardown(self) -> ScoreBoard {
        info!(rounds = self.scores.rounds(), "session closed");
        self.scores
    }

    // === Internals ===

    fn finish_round(&mut self, outcome: &G::Outcome) {
        let label = outcome.label();
        let count = self.scores.record(label);
        let points = self.engine.round_points(&self.state);
        let best = self.scores.record_points(points);
        self.running = false;
        info!(outcome = label, count, points, new_high_score = best, "round finished");
    }

    /// One opponent move, if the opponent is due. A reply that ends the
    /// round stops there; it is never rolled back. A failed reply changes
    /// nothing, so the opponent stays due.
    fn respond_with_agent(&mut self) {
        let Some(agent) = &self.agent else {
            return;
        };
        if !self.engine.agent_to_move(&self.state) {
            return;
        }

        let board = self.engine.board(&self.state);
        let Some(mv) = agent.select_move(board, &mut self.agent_rng) else {
            warn!("opponent found no move");
            return;
        };

        match self.engine.play(&mut self.state, &mv, &mut self.rng) {
            Ok(Transition::Terminal(outcome)) => self.finish_round(&outcome),
            Ok(Transition::Continuing) => debug!(?mv, "opponent moved"),
            Err(rejected) => warn!(?mv, %rejected, "opponent move rejected"),
        }
    }
}
