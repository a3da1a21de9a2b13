//! Move application.
//!
//! Applies every side effect of a move in one step: capture removal
//! (including the en-passant victim beside the destination), the paired rook
//! relocation for castling, en-passant target bookkeeping and `has_moved`
//! updates. Search and the legality filter use the copying entry points; only
//! the game controller mutates its live board in place.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{CastleSide, Move, SpecialMove};

/// Apply `mv` to a copy of `board`. Promotions become queens.
#[inline]
pub fn apply_move(board: &Board, mv: &Move) -> Board {
    apply_move_with_promotion(board, mv, Some(PieceKind::Queen))
}

/// Apply `mv` to a copy of `board`. With `promotion == None` a promoting pawn
/// is left on the last rank for a later [`promote_in_place`].
pub fn apply_move_with_promotion(board: &Board, mv: &Move, promotion: Option<PieceKind>) -> Board {
    let mut next = board.clone();
    apply_move_in_place(&mut next, mv, promotion);
    next
}

pub fn apply_move_in_place(board: &mut Board, mv: &Move, promotion: Option<PieceKind>) {
    let side = mv.piece.side;

    board.take(mv.from);
    if let Some(capture_square) = mv.capture_square() {
        board.take(capture_square);
    }

    let placed = match (mv.special, promotion) {
        (Some(SpecialMove::Promotion), Some(kind)) => Piece::new(kind, side).moved(),
        _ => mv.piece.moved(),
    };
    board.place(mv.to, placed);

    if let Some(SpecialMove::Castling(castle_side)) = mv.special {
        let (rook_from_col, rook_to_col) = match castle_side {
            CastleSide::Kingside => (KINGSIDE_ROOK_COL, KINGSIDE_ROOK_TARGET_COL),
            CastleSide::Queenside => (QUEENSIDE_ROOK_COL, QUEENSIDE_ROOK_TARGET_COL),
        };
        move_rook(board, side.home_row(), rook_from_col, rook_to_col);
    }

    board.en_passant_target = if mv.piece.kind == PieceKind::Pawn
        && mv.from.row().abs_diff(mv.to.row()) == 2
    {
        Square::new((mv.from.row() + mv.to.row()) / 2, mv.from.col())
    } else {
        None
    };
}

/// Replace the pawn waiting on `square` with `kind`.
///
/// Returns `false` (and leaves the board alone) when no pawn stands there or
/// `kind` is not a legal promotion target.
pub fn promote_in_place(board: &mut Board, square: Square, kind: PieceKind) -> bool {
    if !kind.is_promotion_target() {
        return false;
    }
    match board.piece_at(square) {
        Some(pawn) if pawn.kind == PieceKind::Pawn => {
            board.place(square, Piece::new(kind, pawn.side).moved());
            true
        }
        _ => false,
    }
}

fn move_rook(board: &mut Board, row: u8, from_col: u8, to_col: u8) {
    let (Some(from), Some(to)) = (Square::new(row, from_col), Square::new(row, to_col)) else {
        return;
    };
    if let Some(rook) = board.take(from) {
        board.place(to, rook.moved());
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move, apply_move_with_promotion, promote_in_place};
    use crate::game_state::chess_types::{PieceKind, Side};
    use crate::move_generation::legal_move_generator::legal_moves_for;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn find_move(fen: &str, from: &str, to: &str) -> (crate::game_state::board::Board, crate::moves::move_descriptions::Move) {
        let (board, _) = parse_fen(fen).expect("FEN should parse");
        let from = algebraic_to_square(from).expect("from square should parse");
        let to = algebraic_to_square(to).expect("to square should parse");
        let mv = legal_moves_for(&board, from)
            .into_iter()
            .find(|mv| mv.to == to)
            .expect("move should be legal");
        (board, mv)
    }

    #[test]
    fn double_step_sets_en_passant_target_and_next_move_clears_it() {
        let (board, mv) = find_move(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "e2",
            "e4",
        );
        let next = apply_move(&board, &mv);
        assert_eq!(next.en_passant_target.map(|sq| sq.to_string()), Some("e3".to_owned()));

        let g8 = algebraic_to_square("g8").expect("g8 should parse");
        let reply = legal_moves_for(&next, g8)
            .into_iter()
            .next()
            .expect("knight should have a move");
        let after = apply_move(&next, &reply);
        assert!(after.en_passant_target.is_none());
    }

    #[test]
    fn castling_relocates_rook_and_marks_both_moved() {
        let (board, mv) = find_move("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1", "g1");
        let next = apply_move(&board, &mv);
        let f1 = algebraic_to_square("f1").expect("f1 should parse");
        let g1 = algebraic_to_square("g1").expect("g1 should parse");
        let h1 = algebraic_to_square("h1").expect("h1 should parse");

        let rook = next.piece_at(f1).expect("rook should land on f1");
        let king = next.piece_at(g1).expect("king should land on g1");
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(rook.has_moved && king.has_moved);
        assert!(next.is_empty(h1));
    }

    #[test]
    fn en_passant_removes_the_pawn_beside_the_destination() {
        let (board, mv) = find_move("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5", "d6");
        let next = apply_move(&board, &mv);
        let d5 = algebraic_to_square("d5").expect("d5 should parse");
        let d6 = algebraic_to_square("d6").expect("d6 should parse");
        assert!(next.is_empty(d5));
        assert_eq!(next.piece_at(d6).map(|p| p.side), Some(Side::White));
    }

    #[test]
    fn deferred_promotion_leaves_pawn_until_promoted() {
        let (board, mv) = find_move("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7", "a8");
        let a8 = algebraic_to_square("a8").expect("a8 should parse");

        let mut pending = apply_move_with_promotion(&board, &mv, None);
        assert_eq!(pending.piece_at(a8).map(|p| p.kind), Some(PieceKind::Pawn));
        assert!(!promote_in_place(&mut pending, a8, PieceKind::King));
        assert!(promote_in_place(&mut pending, a8, PieceKind::Knight));
        assert_eq!(pending.piece_at(a8).map(|p| p.kind), Some(PieceKind::Knight));

        let auto = apply_move(&board, &mv);
        assert_eq!(auto.piece_at(a8).map(|p| p.kind), Some(PieceKind::Queen));
    }
}
