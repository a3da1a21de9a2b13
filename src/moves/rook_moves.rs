use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[inline]
pub fn rook_attacks(board: &Board, from: Square) -> Vec<Square> {
    slide_attacks(board, from, &ROOK_DIRECTIONS)
}

/// Walk each direction until the board edge or the first occupied square.
/// The blocking square is included whatever its colour; callers decide
/// whether it is a capture or a defended friendly piece.
pub fn slide_attacks(board: &Board, from: Square, directions: &[(i8, i8)]) -> Vec<Square> {
    let mut attacks = Vec::with_capacity(14);
    for (d_row, d_col) in directions {
        let mut current = from.offset(*d_row, *d_col);
        while let Some(sq) = current {
            attacks.push(sq);
            if !board.is_empty(sq) {
                break;
            }
            current = sq.offset(*d_row, *d_col);
        }
    }
    attacks
}
