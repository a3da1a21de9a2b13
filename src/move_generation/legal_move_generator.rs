//! Full legal move generation pipeline.
//!
//! Dispatches piece-wise pseudo-legal generation, applies each candidate to a
//! scratch copy of the board and drops the ones that leave the mover's own
//! king attacked. The live board is never touched.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliding::{
    generate_bishop_moves, generate_queen_moves, generate_rook_moves,
};
use crate::moves::move_descriptions::Move;

/// Move enumeration seam used by search, perft and the match harness.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, board: &Board, side: Side) -> Vec<Move>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, board: &Board, side: Side) -> Vec<Move> {
        all_legal_moves(board, side)
    }
}

/// Pseudo-legal moves of the piece on `from`; empty when the square is empty.
pub fn pseudo_legal_moves_for(board: &Board, from: Square) -> Vec<Move> {
    let mut out = Vec::with_capacity(32);
    if let Some(piece) = board.piece_at(from) {
        generate_piece_moves(board, from, piece, &mut out);
    }
    out
}

/// Legal moves of the piece on `from`, in generation order.
pub fn legal_moves_for(board: &Board, from: Square) -> Vec<Move> {
    let mut out = pseudo_legal_moves_for(board, from);
    out.retain(|mv| !leaves_king_in_check(board, mv));
    out
}

pub fn legal_destinations(board: &Board, from: Square) -> Vec<Square> {
    legal_moves_for(board, from)
        .into_iter()
        .map(|mv| mv.to)
        .collect()
}

/// Every legal move for `side`, pieces visited in row-major order.
pub fn all_legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut pseudo = Vec::with_capacity(64);
    for (from, piece) in board.pieces_of(side) {
        generate_piece_moves(board, from, piece, &mut pseudo);
    }
    pseudo.retain(|mv| !leaves_king_in_check(board, mv));
    pseudo
}

/// Short-circuits on the first legal move found.
pub fn has_any_legal_move(board: &Board, side: Side) -> bool {
    let mut pseudo = Vec::with_capacity(32);
    board.pieces_of(side).any(|(from, piece)| {
        pseudo.clear();
        generate_piece_moves(board, from, piece, &mut pseudo);
        pseudo.iter().any(|mv| !leaves_king_in_check(board, mv))
    })
}

#[inline]
pub fn leaves_king_in_check(board: &Board, mv: &Move) -> bool {
    let next = apply_move(board, mv);
    is_in_check(&next, mv.piece.side)
}

fn generate_piece_moves(board: &Board, from: Square, piece: Piece, out: &mut Vec<Move>) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, from, piece, out),
        PieceKind::Knight => generate_knight_moves(board, from, piece, out),
        PieceKind::Bishop => generate_bishop_moves(board, from, piece, out),
        PieceKind::Rook => generate_rook_moves(board, from, piece, out),
        PieceKind::Queen => generate_queen_moves(board, from, piece, out),
        PieceKind::King => generate_king_moves(board, from, piece, out),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    use super::{
        all_legal_moves, has_any_legal_move, legal_destinations, LegalMoveGenerator,
        MoveGenerator,
    };
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::Side;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::move_generation::legal_move_checks::is_in_check;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;
    use crate::utils::long_algebraic::apply_long_algebraic;

    #[test]
    fn start_position_has_twenty_moves() {
        let board = Board::new_game();
        assert_eq!(LegalMoveGenerator.generate_legal_moves(&board, Side::White).len(), 20);
        assert_eq!(all_legal_moves(&board, Side::Black).len(), 20);
    }

    #[test]
    fn pinned_knight_has_no_destinations() {
        let (board, _) = parse_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let e2 = algebraic_to_square("e2").expect("e2 should parse");
        assert!(legal_destinations(&board, e2).is_empty());
    }

    #[test]
    fn en_passant_is_only_available_for_one_ply() {
        let board = Board::new_game();
        let mut side = Side::White;
        let mut board = board;
        for text in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            board = apply_long_algebraic(&board, side, text).expect("opening move should be legal");
            side = side.opposite();
        }
        let e5 = algebraic_to_square("e5").expect("e5 should parse");
        let d6 = algebraic_to_square("d6").expect("d6 should parse");
        assert!(legal_destinations(&board, e5).contains(&d6));

        for text in ["h2h3", "h7h6"] {
            board = apply_long_algebraic(&board, side, text).expect("waiting move should be legal");
            side = side.opposite();
        }
        assert!(!legal_destinations(&board, e5).contains(&d6));
    }

    #[test]
    fn random_walks_never_leave_the_mover_in_check() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..8 {
            let mut board = Board::new_game();
            let mut side = Side::White;
            for _ in 0..60 {
                let moves = all_legal_moves(&board, side);
                for mv in &moves {
                    assert!(!is_in_check(&apply_move(&board, mv), side), "{mv} exposes the king");
                }
                let Some(mv) = moves.choose(&mut rng) else {
                    assert!(!has_any_legal_move(&board, side));
                    break;
                };
                board = apply_move(&board, mv);
                side = side.opposite();
            }
        }
    }
}
