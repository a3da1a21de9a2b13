//! Engine abstraction.
//!
//! The game controller and the match harness pick moves through this trait,
//! so the opponent strategy can be swapped without touching either.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Side;
use crate::moves::move_descriptions::Move;

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// A legal move for `side`, or `None` when `side` has no legal move.
    fn choose_move(&mut self, board: &Board, side: Side) -> Option<Move>;
}
