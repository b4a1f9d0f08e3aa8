//! Tic-tac-toe rules engine and round state.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::lines::{check_winner, Mark, Square, WinningLine};
use crate::core::{Board, CellState, Coord, GameError, GameRng, MoveRejected};
use crate::rules::{Outcome, Phase, RulesEngine, Transition};

/// Side length of the grid.
pub const SIZE: usize = 3;

/// How a tic-tac-toe round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicTacToeOutcome {
    Winner(Mark),
    Draw,
}

impl Outcome for TicTacToeOutcome {
    fn label(&self) -> &'static str {
        match self {
            TicTacToeOutcome::Winner(mark) => mark.label(),
            TicTacToeOutcome::Draw => "Draws",
        }
    }
}

/// One placed mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub mark: Mark,
    pub cell: Coord,
}

/// State of a single round.
///
/// Only `TicTacToe::play` mutates it. A reset replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeState {
    board: Board<Square>,
    current: Mark,
    move_count: u32,
    phase: Phase,
    outcome: Option<TicTacToeOutcome>,
    winning_line: WinningLine,
    history: Vector<Placement>,
}

impl TicTacToeState {
    /// Empty board with `first` to move.
    #[must_use]
    pub fn new(first: Mark) -> Self {
        Self {
            board: Board::new(SIZE, SIZE),
            current: first,
            move_count: 0,
            phase: Phase::AwaitingMove,
            outcome: None,
            winning_line: SmallVec::new(),
            history: Vector::new(),
        }
    }

    /// Start from a pre-populated board.
    ///
    /// The board is evaluated immediately, so a board that already holds a
    /// line or is full yields a terminal state. History starts empty.
    pub fn from_board(board: Board<Square>, current: Mark) -> Result<Self, GameError> {
        if board.width() != SIZE || board.height() != SIZE {
            return Err(GameError::invalid_config(format!(
                "tic-tac-toe board must be {SIZE}x{SIZE}, got {}x{}",
                board.width(),
                board.height()
            )));
        }

        let move_count = (SIZE * SIZE - board.empty_count()) as u32;
        let mut state = Self {
            board,
            current,
            move_count,
            ..Self::new(current)
        };
        state.evaluate();
        Ok(state)
    }

    #[must_use]
    pub fn board(&self) -> &Board<Square> {
        &self.board
    }

    /// Side to move (the side that moved last, once terminal).
    #[must_use]
    pub fn current(&self) -> Mark {
        self.current
    }

    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    #[must_use]
    pub fn outcome(&self) -> Option<TicTacToeOutcome> {
        self.outcome
    }

    /// The winning mark, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Mark> {
        match self.outcome {
            Some(TicTacToeOutcome::Winner(mark)) => Some(mark),
            _ => None,
        }
    }

    /// Coordinates of the completed line; empty unless there is a winner.
    #[must_use]
    pub fn winning_line(&self) -> &[Coord] {
        &self.winning_line
    }

    /// Placements in the order they were made.
    #[must_use]
    pub fn history(&self) -> &Vector<Placement> {
        &self.history
    }

    /// Win first, then draw. Returns the outcome if the round just ended.
    fn evaluate(&mut self) -> Option<TicTacToeOutcome> {
        let outcome = if let Some((mark, line)) = check_winner(&self.board) {
            self.winning_line = line;
            Some(TicTacToeOutcome::Winner(mark))
        } else if self.board.is_full() {
            Some(TicTacToeOutcome::Draw)
        } else {
            None
        };

        self.phase = if outcome.is_some() { Phase::Terminal } else { Phase::AwaitingMove };
        self.outcome = outcome;
        outcome
    }
}

/// Tic-tac-toe settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeConfig {
    /// Side that opens every round.
    pub first: Mark,
    /// Side played by the automated opponent. `None` for two human players.
    pub computer: Option<Mark>,
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self {
            first: Mark::X,
            computer: None,
        }
    }
}

/// Tic-tac-toe rules.
#[derive(Clone, Debug, Default)]
pub struct TicTacToe {
    config: TicTacToeConfig,
}

/// Builder for creating a `TicTacToe`.
#[derive(Default)]
pub struct TicTacToeBuilder {
    config: TicTacToeConfig,
}

impl TicTacToeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first(mut self, mark: Mark) -> Self {
        self.config.first = mark;
        self
    }

    /// Let the automated opponent play `mark`.
    pub fn computer(mut self, mark: Mark) -> Self {
        self.config.computer = Some(mark);
        self
    }

    pub fn two_player(mut self) -> Self {
        self.config.computer = None;
        self
    }

    pub fn build(self) -> TicTacToe {
        TicTacToe { config: self.config }
    }
}

impl TicTacToe {
    /// Build from an existing config.
    #[must_use]
    pub fn from_config(config: TicTacToeConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &TicTacToeConfig {
        &self.config
    }
}

const LABELS: &[&str] = &["X", "O", "Draws"];

impl RulesEngine for TicTacToe {
    type Cell = Square;
    type Move = Coord;
    type Outcome = TicTacToeOutcome;
    type State = TicTacToeState;

    fn new_round(&self, _rng: &mut GameRng) -> TicTacToeState {
        TicTacToeState::new(self.config.first)
    }

    fn board<'s>(&self, state: &'s TicTacToeState) -> &'s Board<Square> {
        &state.board
    }

    fn outcome<'s>(&self, state: &'s TicTacToeState) -> Option<&'s TicTacToeOutcome> {
        state.outcome.as_ref()
    }

    fn validate(&self, state: &TicTacToeState, cell: &Coord) -> Result<(), MoveRejected> {
        if state.is_terminal() {
            return Err(MoveRejected::RoundOver);
        }
        if !state.board.get(*cell)?.is_empty() {
            return Err(MoveRejected::Occupied(*cell));
        }
        Ok(())
    }

    fn play(
        &self,
        state: &mut TicTacToeState,
        cell: &Coord,
        _rng: &mut GameRng,
    ) -> Result<Transition<TicTacToeOutcome>, MoveRejected> {
        self.validate(state, cell)?;

        let mark = state.current;
        state.board.set(*cell, Square::Taken(mark))?;
        state.move_count += 1;
        state.history.push_back(Placement { mark, cell: *cell });
        trace!(%mark, %cell, move_count = state.move_count, "mark placed");

        match state.evaluate() {
            Some(outcome) => {
                debug!(?outcome, "round over");
                Ok(Transition::Terminal(outcome))
            }
            None => {
                state.current = mark.other();
                Ok(Transition::Continuing)
            }
        }
    }

    fn agent_to_move(&self, state: &TicTacToeState) -> bool {
        !state.is_terminal() && self.config.computer == Some(state.current)
    }

    fn outcome_labels(&self) -> &'static [&'static str] {
        LABELS
    }
}
