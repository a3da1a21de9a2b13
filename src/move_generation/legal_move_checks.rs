//! Attack oracle.
//!
//! Answers "is this square attacked by that side" by walking every enemy
//! piece's attack pattern. Attack patterns differ from move lists: pawns hit
//! their diagonals even when empty, kings hit every neighbour, and slider
//! rays include the first blocker whatever its colour.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

/// Squares the piece on `from` attacks.
pub fn attack_pattern(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.side, from).collect(),
        PieceKind::Knight => knight_attacks(from).collect(),
        PieceKind::Bishop => bishop_attacks(board, from),
        PieceKind::Rook => rook_attacks(board, from),
        PieceKind::Queen => queen_attacks(board, from),
        PieceKind::King => king_attacks(from).collect(),
    }
}

pub fn is_square_attacked(board: &Board, square: Square, by_side: Side) -> bool {
    board
        .pieces_of(by_side)
        .any(|(from, piece)| attack_pattern(board, from, piece).contains(&square))
}

/// Pieces of `by_side` attacking `square`.
pub fn attackers_to_square(board: &Board, square: Square, by_side: Side) -> Vec<(Square, Piece)> {
    board
        .pieces_of(by_side)
        .filter(|(from, piece)| attack_pattern(board, *from, *piece).contains(&square))
        .collect()
}

/// Location of `side`'s king.
///
/// # Panics
///
/// Panics when the side has no king. Kings are never captured in legal play,
/// so a missing king means the board is corrupted.
pub fn king_square(board: &Board, side: Side) -> Square {
    match board.king_square(side) {
        Some(square) => square,
        None => panic!("board invariant violated: no {side} king on the board"),
    }
}

#[inline]
pub fn is_in_check(board: &Board, side: Side) -> bool {
    is_square_attacked(board, king_square(board, side), side.opposite())
}

#[cfg(test)]
mod tests {
    use super::{attackers_to_square, is_in_check, is_square_attacked};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("test square should be on the board")
    }

    #[test]
    fn rook_on_open_file_gives_check() {
        let mut board = Board::new_empty();
        board.place(sq(0, 4), Piece::new(PieceKind::King, Side::Black));
        board.place(sq(7, 4), Piece::new(PieceKind::Rook, Side::White));
        board.place(sq(7, 0), Piece::new(PieceKind::King, Side::White));

        assert!(is_in_check(&board, Side::Black));
        assert!(!is_in_check(&board, Side::White));
    }

    #[test]
    fn blocked_rook_does_not_give_check() {
        let mut board = Board::new_empty();
        board.place(sq(0, 4), Piece::new(PieceKind::King, Side::Black));
        board.place(sq(3, 4), Piece::new(PieceKind::Knight, Side::Black));
        board.place(sq(7, 4), Piece::new(PieceKind::Rook, Side::White));
        board.place(sq(7, 0), Piece::new(PieceKind::King, Side::White));

        assert!(!is_in_check(&board, Side::Black));
    }

    #[test]
    fn pawns_attack_empty_diagonals_but_not_straight_ahead() {
        let mut board = Board::new_empty();
        board.place(sq(6, 4), Piece::new(PieceKind::Pawn, Side::White));

        assert!(is_square_attacked(&board, sq(5, 3), Side::White));
        assert!(is_square_attacked(&board, sq(5, 5), Side::White));
        assert!(!is_square_attacked(&board, sq(5, 4), Side::White));
    }

    #[test]
    fn attackers_lists_every_piece_hitting_the_square() {
        let board = Board::new_game();
        // f3 is covered by the g1 knight and the e2 and g2 pawns.
        let attackers = attackers_to_square(&board, sq(5, 5), Side::White);
        assert_eq!(attackers.len(), 3);
        assert!(attackers.iter().any(|(_, p)| p.kind == PieceKind::Knight));
    }

    #[test]
    #[should_panic(expected = "no black king")]
    fn missing_king_is_fatal() {
        let board = Board::new_empty();
        let _ = is_in_check(&board, Side::Black);
    }
}
