//! Snake on a rectangular grid.
//!
//! - The snake starts as a single segment heading right
//! - Every tick the head advances one cell in the current direction
//! - Eating food scores points, grows the snake and places new food
//! - Leaving the board or running into the body ends the round
//! - Reversing straight back onto the body is refused

mod game;
pub mod movement;

pub use game::{SnakeBuilder, SnakeCell, SnakeConfig, SnakeGame, SnakeOutcome, SnakeState};
pub use movement::{compute_next_head, is_reversal, is_self_collision, is_wall_collision, place_food};
