use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;
use crate::moves::rook_moves::slide_attacks;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[inline]
pub fn bishop_attacks(board: &Board, from: Square) -> Vec<Square> {
    slide_attacks(board, from, &BISHOP_DIRECTIONS)
}
