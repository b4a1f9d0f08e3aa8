//! Move-selection policies for automated players.
//!
//! Agents only see the board and an injected RNG. They never touch round
//! state, so a policy can be swapped without changing any rules.

use crate::core::{Board, CellState, Coord, GameRng};

/// Policy that picks a move for a non-human player.
pub trait Agent<C: CellState, M>: Send + Sync {
    /// Select a move for the current board.
    ///
    /// Returns `None` if the policy has nothing to play.
    fn select_move(&self, board: &Board<C>, rng: &mut GameRng) -> Option<M>;
}

/// Uniform opponent: samples one empty cell with equal probability.
///
/// Fails only on a full board, which is already terminal for every game
/// that uses it.
#[derive(Clone, Debug, Default)]
pub struct RandomAgent;

impl<C: CellState> Agent<C, Coord> for RandomAgent {
    fn select_move(&self, board: &Board<C>, rng: &mut GameRng) -> Option<Coord> {
        let empty = board.empty_cells();
        rng.choose(&empty).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Cell {
        Empty,
        Taken,
    }

    impl CellState for Cell {
        const EMPTY: Self = Cell::Empty;
    }

    #[test]
    fn test_random_agent_picks_empty_cell() {
        let mut board: Board<Cell> = Board::new(3, 3);
        for coord in [Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)] {
            board.set(coord, Cell::Taken).unwrap();
        }

        let mut rng = GameRng::new(42);
        for _ in 0..50 {
            let chosen = RandomAgent.select_move(&board, &mut rng).unwrap();
            assert_eq!(board.get(chosen), Ok(Cell::Empty));
        }
    }

    #[test]
    fn test_random_agent_full_board() {
        let mut board: Board<Cell> = Board::new(2, 2);
        for coord in board.empty_cells() {
            board.set(coord, Cell::Taken).unwrap();
        }

        let chosen: Option<Coord> = RandomAgent.select_move(&board, &mut GameRng::new(1));
        assert_eq!(chosen, None);
    }

    #[test]
    fn test_random_agent_is_seeded() {
        let board: Board<Cell> = Board::new(3, 3);

        let a: Vec<Option<Coord>> = {
            let mut rng = GameRng::new(9);
            (0..5).map(|_| RandomAgent.select_move(&board, &mut rng)).collect()
        };
        let b: Vec<Option<Coord>> = {
            let mut rng = GameRng::new(9);
            (0..5).map(|_| RandomAgent.select_move(&board, &mut rng)).collect()
        };

        assert_eq!(a, b);
    }

    #[test]
    fn test_random_agent_only_option() {
        let mut board: Board<Cell> = Board::new(2, 1);
        board.set(Coord::new(0, 0), Cell::Taken).unwrap();

        let chosen: Option<Coord> = RandomAgent.select_move(&board, &mut GameRng::new(3));
        assert_eq!(chosen, Some(Coord::new(1, 0)));
    }
}
