//! Snake rules engine and round state.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use super::movement::{compute_next_head, is_reversal, is_self_collision, is_wall_collision, place_food};
use crate::core::{Board, BoundsError, CellState, Coord, Direction, GameError, GameRng, MoveRejected};
use crate::rules::{Outcome, Phase, RulesEngine, Transition};

/// Snake board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnakeCell {
    #[default]
    Empty,
    Segment,
    Food,
}

impl CellState for SnakeCell {
    const EMPTY: Self = SnakeCell::Empty;
}

/// How a snake round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeOutcome {
    /// The head left the board.
    HitWall,
    /// The head ran into the body.
    HitSelf,
    /// No free cell was left for food.
    BoardCleared,
}

impl Outcome for SnakeOutcome {
    fn label(&self) -> &'static str {
        match self {
            SnakeOutcome::HitWall => "Wall",
            SnakeOutcome::HitSelf => "Self",
            SnakeOutcome::BoardCleared => "Cleared",
        }
    }
}

/// State of a single round.
///
/// `body` runs head first. `direction` is the heading for the next tick.
/// `turned` is set once a direction request has been accepted this tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeState {
    board: Board<SnakeCell>,
    body: Vector<Coord>,
    direction: Direction,
    turned: bool,
    food: Option<Coord>,
    score: u32,
    ticks: u32,
    phase: Phase,
    outcome: Option<SnakeOutcome>,
}

impl SnakeState {
    /// Build a state from explicit parts, for resuming or staging a round.
    ///
    /// `body` runs head first and must be non-empty, in bounds and free of
    /// duplicates. `food` may be any in-bounds cell not covered by the body,
    /// except that it may sit on the tail: the tail is vacated only on ticks
    /// that do not eat.
    pub fn from_parts(
        width: usize,
        height: usize,
        body: impl IntoIterator<Item = Coord>,
        direction: Direction,
        food: Option<Coord>,
    ) -> Result<Self, GameError> {
        let body: Vector<Coord> = body.into_iter().collect();
        let mut board = Board::new(width, height);

        if body.is_empty() {
            return Err(GameError::invalid_config("snake body must have at least one segment"));
        }
        for &segment in &body {
            if board.get(segment)? == SnakeCell::Segment {
                return Err(GameError::invalid_config(format!("segment {segment} appears twice")));
            }
            board.set(segment, SnakeCell::Segment)?;
        }

        if let Some(food) = food {
            let tail = body.last().copied();
            if board.get(food)? == SnakeCell::Segment && Some(food) != tail {
                return Err(GameError::invalid_config(format!("food {food} lies on the body")));
            }
            if board.get(food)? == SnakeCell::Empty {
                board.set(food, SnakeCell::Food)?;
            }
        }

        Ok(Self {
            board,
            body,
            direction,
            turned: false,
            food,
            score: 0,
            ticks: 0,
            phase: Phase::AwaitingMove,
            outcome: None,
        })
    }

    #[must_use]
    pub fn board(&self) -> &Board<SnakeCell> {
        &self.board
    }

    /// Segments, head first.
    #[must_use]
    pub fn body(&self) -> &Vector<Coord> {
        &self.body
    }

    #[must_use]
    pub fn head(&self) -> Coord {
        self.body[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// A snake always has a head, so this is never true.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a direction request was already accepted this tick.
    #[must_use]
    pub fn has_turned(&self) -> bool {
        self.turned
    }

    #[must_use]
    pub fn food(&self) -> Option<Coord> {
        self.food
    }

    /// Points earned this round.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks the snake has moved.
    #[must_use]
    pub fn ticks(&self) -> u32 {
        self.ticks
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
    pub fn outcome(&self) -> Option<SnakeOutcome> {
        self.outcome
    }

    fn finish(&mut self, outcome: SnakeOutcome) -> Transition<SnakeOutcome> {
        self.phase = Phase::Terminal;
        self.outcome = Some(outcome);
        debug!(?outcome, score = self.score, length = self.body.len(), "round over");
        Transition::Terminal(outcome)
    }

    /// Move the body one step onto `next`. The tail is vacated first
    /// unless the snake grows. Food lying under the tail shows again once
    /// the tail leaves.
    fn advance(&mut self, next: Coord, grows: bool) -> Result<(), BoundsError> {
        if !grows {
            if let Some(tail) = self.body.pop_back() {
                let uncovered = if self.food == Some(tail) { SnakeCell::Food } else { SnakeCell::Empty };
                self.board.set(tail, uncovered)?;
            }
        }
        self.body.push_front(next);
        self.board.set(next, SnakeCell::Segment)
    }
}

/// Snake settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeConfig {
    pub width: usize,
    pub height: usize,
    /// Cell of the single starting segment.
    pub start: Coord,
    /// Initial heading.
    pub direction: Direction,
    /// Points per food eaten.
    pub food_points: u32,
    /// Fixed position of the first food. `None` places it at random.
    pub initial_food: Option<Coord>,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            start: Coord::new(10, 10),
            direction: Direction::Right,
            food_points: 10,
            initial_food: None,
        }
    }
}

impl SnakeConfig {
    fn validate(&self) -> Result<(), GameError> {
        let max_side = i32::MAX as usize;
        if self.width > max_side || self.height > max_side {
            return Err(GameError::invalid_config(format!(
                "snake board sides must not exceed {max_side}, got {}x{}",
                self.width, self.height
            )));
        }
        let cells = self.width.checked_mul(self.height).ok_or_else(|| {
            GameError::invalid_config(format!("snake board {}x{} is too large", self.width, self.height))
        })?;
        if cells < 2 {
            return Err(GameError::invalid_config(format!(
                "snake board must have room for the snake and food, got {}x{}",
                self.width, self.height
            )));
        }
        if is_wall_collision(self.start, self.width, self.height) {
            return Err(GameError::invalid_config(format!("start {} is off the board", self.start)));
        }
        if let Some(food) = self.initial_food {
            if is_wall_collision(food, self.width, self.height) || food == self.start {
                return Err(GameError::invalid_config(format!("initial food {food} is not a free cell")));
            }
        }
        Ok(())
    }
}

/// Snake rules.
#[derive(Clone, Debug)]
pub struct SnakeGame {
    config: SnakeConfig,
}

/// Builder for creating a `SnakeGame`.
#[derive(Default)]
pub struct SnakeBuilder {
    config: SnakeConfig,
}

impl SnakeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board_size(mut self, width: usize, height: usize) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn start(mut self, start: Coord) -> Self {
        self.config.start = start;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    pub fn food_points(mut self, points: u32) -> Self {
        self.config.food_points = points;
        self
    }

    /// Place the first food of every round at `cell`.
    pub fn food_at(mut self, cell: Coord) -> Self {
        self.config.initial_food = Some(cell);
        self
    }

    /// Build the game, checking the configuration.
    pub fn build(self) -> Result<SnakeGame, GameError> {
        SnakeGame::from_config(self.config)
    }
}

impl SnakeGame {
    /// Build from an existing config.
    pub fn from_config(config: SnakeConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    fn step(&self, state: &mut SnakeState, rng: &mut GameRng) -> Result<Transition<SnakeOutcome>, BoundsError> {
        let next = compute_next_head(state.head(), state.direction);
        if is_wall_collision(next, state.board.width(), state.board.height()) {
            return Ok(state.finish(SnakeOutcome::HitWall));
        }

        let grows = state.food == Some(next);
        let collides = if grows {
            is_self_collision(next, state.body.iter())
        } else {
            is_self_collision(next, state.body.iter().take(state.body.len() - 1))
        };
        if collides {
            return Ok(state.finish(SnakeOutcome::HitSelf));
        }

        state.advance(next, grows)?;
        state.turned = false;
        state.ticks += 1;
        trace!(head = %next, length = state.body.len(), tick = state.ticks, "snake moved");

        if grows {
            state.score += self.config.food_points;
            state.food = place_food(&state.board, rng);
            match state.food {
                Some(food) => {
                    state.board.set(food, SnakeCell::Food)?;
                    debug!(%food, score = state.score, "food eaten");
                }
                None => return Ok(state.finish(SnakeOutcome::BoardCleared)),
            }
        }

        Ok(Transition::Continuing)
    }
}

const LABELS: &[&str] = &["Wall", "Self", "Cleared"];

impl RulesEngine for SnakeGame {
    type Cell = SnakeCell;
    type Move = Direction;
    type Outcome = SnakeOutcome;
    type State = SnakeState;

    fn new_round(&self, rng: &mut GameRng) -> SnakeState {
        let config = &self.config;
        let mut board = Board::new(config.width, config.height);
        let mut body = Vector::new();
        body.push_back(config.start);

        // In bounds: checked when the game was built
        let _ = board.set(config.start, SnakeCell::Segment);
        let food = config.initial_food.or_else(|| place_food(&board, rng));
        if let Some(food) = food {
            let _ = board.set(food, SnakeCell::Food);
        }

        SnakeState {
            board,
            body,
            direction: config.direction,
            turned: false,
            food,
            score: 0,
            ticks: 0,
            phase: Phase::AwaitingMove,
            outcome: None,
        }
    }

    fn board<'s>(&self, state: &'s SnakeState) -> &'s Board<SnakeCell> {
        &state.board
    }

    fn outcome<'s>(&self, state: &'s SnakeState) -> Option<&'s SnakeOutcome> {
        state.outcome.as_ref()
    }

    /// One direction request per tick. With that, the queued direction is
    /// always the one travelled last tick, so a single reversal check covers
    /// quick double turns too.
    fn validate(&self, state: &SnakeState, requested: &Direction) -> Result<(), MoveRejected> {
        if state.is_terminal() {
            return Err(MoveRejected::RoundOver);
        }
        if state.turned {
            return Err(MoveRejected::AlreadyTurned);
        }
        if is_reversal(state.direction, *requested) {
            return Err(MoveRejected::Reversal {
                current: state.direction,
                requested: *requested,
            });
        }
        Ok(())
    }

    fn play(
        &self,
        state: &mut SnakeState,
        requested: &Direction,
        _rng: &mut GameRng,
    ) -> Result<Transition<SnakeOutcome>, MoveRejected> {
        self.validate(state, requested)?;
        state.direction = *requested;
        state.turned = true;
        Ok(Transition::Continuing)
    }

    fn tick(&self, state: &mut SnakeState, rng: &mut GameRng) -> Option<Transition<SnakeOutcome>> {
        if state.is_terminal() {
            return None;
        }
        match self.step(state, rng) {
            Ok(transition) => Some(transition),
            Err(err) => {
                error!(%err, "snake left the board past the wall check");
                Some(state.finish(SnakeOutcome::HitWall))
            }
        }
    }

    fn round_points(&self, state: &SnakeState) -> u32 {
        state.score
    }

    fn outcome_labels(&self) -> &'static [&'static str] {
        LABELS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_without_random_food() -> SnakeGame {
        SnakeBuilder::new().food_at(Coord::new(0, 0)).build().unwrap()
    }

    #[test]
    fn test_new_round() {
        let game = game_without_random_food();
        let state = game.new_round(&mut GameRng::new(0));

        assert_eq!(state.head(), Coord::new(10, 10));
        assert_eq!(state.len(), 1);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.food(), Some(Coord::new(0, 0)));
        assert_eq!(state.board().get(Coord::new(10, 10)), Ok(SnakeCell::Segment));
        assert_eq!(state.board().get(Coord::new(0, 0)), Ok(SnakeCell::Food));
    }

    #[test]
    fn test_random_food_never_on_snake() {
        let game = SnakeBuilder::new().board_size(2, 1).start(Coord::new(0, 0)).build().unwrap();
        for seed in 0..20 {
            let state = game.new_round(&mut GameRng::new(seed));
            assert_eq!(state.food(), Some(Coord::new(1, 0)));
        }
    }

    #[test]
    fn test_moves_right() {
        let game = game_without_random_food();
        let mut state = game.new_round(&mut GameRng::new(0));
        let mut rng = GameRng::new(0);

        for _ in 0..5 {
            assert_eq!(game.tick(&mut state, &mut rng), Some(Transition::Continuing));
        }

        assert_eq!(state.head(), Coord::new(15, 10));
        assert_eq!(state.len(), 1);
        assert_eq!(state.ticks(), 5);
        assert_eq!(state.board().get(Coord::new(10, 10)), Ok(SnakeCell::Empty));
        assert_eq!(state.phase(), Phase::AwaitingMove);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let game = SnakeBuilder::new().food_at(Coord::new(11, 10)).build().unwrap();
        let mut state = game.new_round(&mut GameRng::new(0));
        let mut rng = GameRng::new(3);

        game.tick(&mut state, &mut rng);

        assert_eq!(state.len(), 2);
        assert_eq!(state.score(), 10);
        let body: Vec<_> = state.body().iter().copied().collect();
        assert_eq!(body, vec![Coord::new(11, 10), Coord::new(10, 10)]);
        let food = state.food().unwrap();
        assert!(state.body().iter().all(|&segment| segment != food));
        assert_eq!(state.board().get(food), Ok(SnakeCell::Food));
    }

    #[test]
    fn test_wall_collision_is_terminal() {
        let game = SnakeBuilder::new()
            .board_size(5, 5)
            .start(Coord::new(4, 2))
            .food_at(Coord::new(0, 0))
            .build()
            .unwrap();
        let mut state = game.new_round(&mut GameRng::new(0));

        let transition = game.tick(&mut state, &mut GameRng::new(0));
        assert_eq!(transition, Some(Transition::Terminal(SnakeOutcome::HitWall)));
        assert!(state.is_terminal());
        // The head did not move
        assert_eq!(state.head(), Coord::new(4, 2));

        // Terminal rounds ignore ticks
        assert_eq!(game.tick(&mut state, &mut GameRng::new(0)), None);
    }

    #[test]
    fn test_reversal_rejected() {
        let game = game_without_random_food();
        let mut state = game.new_round(&mut GameRng::new(0));
        let before = state.clone();

        let err = game.play(&mut state, &Direction::Left, &mut GameRng::new(0));
        assert_eq!(
            err,
            Err(MoveRejected::Reversal { current: Direction::Right, requested: Direction::Left })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_one_turn_per_tick() {
        let game = game_without_random_food();
        let mut state = game.new_round(&mut GameRng::new(0));
        let mut rng = GameRng::new(0);

        game.play(&mut state, &Direction::Up, &mut rng).unwrap();
        assert!(state.has_turned());

        // Neither a second turn nor a turn back is accepted before the tick
        let before = state.clone();
        assert_eq!(game.play(&mut state, &Direction::Right, &mut rng), Err(MoveRejected::AlreadyTurned));
        assert_eq!(game.play(&mut state, &Direction::Left, &mut rng), Err(MoveRejected::AlreadyTurned));
        assert_eq!(state, before);

        game.tick(&mut state, &mut rng);
        assert_eq!(state.head(), Coord::new(10, 9));
        assert!(!state.has_turned());

        game.play(&mut state, &Direction::Left, &mut rng).unwrap();
        assert_eq!(state.direction(), Direction::Left);
    }

    #[test]
    fn test_reversal_does_not_use_up_the_turn() {
        let game = game_without_random_food();
        let mut state = game.new_round(&mut GameRng::new(0));
        let mut rng = GameRng::new(0);

        assert!(matches!(
            game.play(&mut state, &Direction::Left, &mut rng),
            Err(MoveRejected::Reversal { .. })
        ));
        assert!(!state.has_turned());
        game.play(&mut state, &Direction::Down, &mut rng).unwrap();
        assert_eq!(state.direction(), Direction::Down);
    }

    #[test]
    fn test_food_under_tail_reappears() {
        let game = SnakeBuilder::new().board_size(4, 4).start(Coord::new(1, 0)).build().unwrap();
        let body = [Coord::new(1, 0), Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)];
        let mut state = SnakeState::from_parts(4, 4, body, Direction::Right, Some(Coord::new(1, 1))).unwrap();
        assert_eq!(state.board().get(Coord::new(1, 1)), Ok(SnakeCell::Segment));

        let transition = game.tick(&mut state, &mut GameRng::new(0));

        assert_eq!(transition, Some(Transition::Continuing));
        assert_eq!(state.head(), Coord::new(2, 0));
        assert_eq!(state.food(), Some(Coord::new(1, 1)));
        assert_eq!(state.board().get(Coord::new(1, 1)), Ok(SnakeCell::Food));
        assert!(state.board().empty_cells().iter().all(|&cell| cell != Coord::new(1, 1)));
    }

    #[test]
    fn test_moving_into_vacating_tail_survives() {
        // Head (1,0), body wraps a 2x2 square; tail at (1,1) just below the head
        let game = SnakeBuilder::new().board_size(4, 4).start(Coord::new(1, 0)).build().unwrap();
        let body = [Coord::new(1, 0), Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)];
        let mut state = SnakeState::from_parts(4, 4, body, Direction::Down, Some(Coord::new(3, 3))).unwrap();

        let transition = game.tick(&mut state, &mut GameRng::new(0));

        assert_eq!(transition, Some(Transition::Continuing));
        assert_eq!(state.head(), Coord::new(1, 1));
        assert_eq!(state.len(), 4);
        assert_eq!(state.board().get(Coord::new(1, 1)), Ok(SnakeCell::Segment));
    }

    #[test]
    fn test_moving_into_tail_while_growing_collides() {
        let game = SnakeBuilder::new().board_size(4, 4).start(Coord::new(1, 0)).build().unwrap();
        let body = [Coord::new(1, 0), Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)];
        let mut state = SnakeState::from_parts(4, 4, body, Direction::Down, Some(Coord::new(1, 1))).unwrap();

        let transition = game.tick(&mut state, &mut GameRng::new(0));

        assert_eq!(transition, Some(Transition::Terminal(SnakeOutcome::HitSelf)));
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn test_board_cleared_when_no_room_for_food() {
        let game = SnakeBuilder::new()
            .board_size(2, 1)
            .start(Coord::new(0, 0))
            .food_at(Coord::new(1, 0))
            .build()
            .unwrap();
        let mut state = game.new_round(&mut GameRng::new(0));

        let transition = game.tick(&mut state, &mut GameRng::new(0));

        assert_eq!(transition, Some(Transition::Terminal(SnakeOutcome::BoardCleared)));
        assert_eq!(state.score(), 10);
        assert_eq!(state.len(), 2);
        assert_eq!(state.food(), None);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(SnakeBuilder::new().board_size(1, 1).start(Coord::new(0, 0)).build().is_err());
        assert!(SnakeBuilder::new().board_size(5, 5).build().is_err()); // default start (10,10)
        assert!(SnakeBuilder::new().food_at(Coord::new(10, 10)).build().is_err());
        assert!(SnakeBuilder::new().food_at(Coord::new(20, 0)).build().is_err());
    }

    #[test]
    fn test_oversized_boards_rejected() {
        let huge_width = SnakeBuilder::new().board_size(usize::MAX, 2).start(Coord::new(0, 0)).build();
        assert!(matches!(huge_width, Err(GameError::InvalidConfig { .. })));

        let side_past_coord_range = SnakeBuilder::new()
            .board_size(i32::MAX as usize + 1, 1)
            .start(Coord::new(0, 0))
            .build();
        assert!(matches!(side_past_coord_range, Err(GameError::InvalidConfig { .. })));
    }

    #[test]
    fn test_from_parts_rejects_bad_bodies() {
        assert!(SnakeState::from_parts(4, 4, Vec::new(), Direction::Up, None).is_err());
        assert!(SnakeState::from_parts(4, 4, [Coord::new(4, 0)], Direction::Up, None).is_err());
        assert!(SnakeState::from_parts(4, 4, [Coord::new(1, 1), Coord::new(1, 1)], Direction::Up, None).is_err());
        assert!(SnakeState::from_parts(
            4,
            4,
            [Coord::new(1, 1), Coord::new(1, 2), Coord::new(1, 3)],
            Direction::Up,
            Some(Coord::new(1, 2))
        )
        .is_err());
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(SnakeOutcome::HitWall.label(), "Wall");
        assert_eq!(SnakeOutcome::HitSelf.label(), "Self");
        assert_eq!(SnakeOutcome::BoardCleared.label(), "Cleared");
    }

    #[test]
    fn test_config_serialization() {
        let config = SnakeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SnakeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
