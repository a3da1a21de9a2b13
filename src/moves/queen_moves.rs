use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::rook_moves::{slide_attacks, ROOK_DIRECTIONS};

pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    ROOK_DIRECTIONS[0],
    ROOK_DIRECTIONS[1],
    ROOK_DIRECTIONS[2],
    ROOK_DIRECTIONS[3],
    BISHOP_DIRECTIONS[0],
    BISHOP_DIRECTIONS[1],
    BISHOP_DIRECTIONS[2],
    BISHOP_DIRECTIONS[3],
];

#[inline]
pub fn queen_attacks(board: &Board, from: Square) -> Vec<Square> {
    slide_attacks(board, from, &QUEEN_DIRECTIONS)
}

#[cfg(test)]
mod tests {
    use super::queen_attacks;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::Square;

    #[test]
    fn queen_rays_from_d4_have_twenty_seven_squares() {
        let board = Board::new_empty();
        let d4 = Square::new(4, 3).expect("d4 should exist");
        assert_eq!(queen_attacks(&board, d4).len(), 27);
    }
}
