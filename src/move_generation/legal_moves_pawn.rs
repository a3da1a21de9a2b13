use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, SpecialMove};
use crate::moves::pawn_moves::pawn_attacks;

pub fn generate_pawn_moves(board: &Board, from: Square, piece: Piece, out: &mut Vec<Move>) {
    let side = piece.side;
    let forward = side.forward();

    if let Some(one_step) = from.offset(forward, 0) {
        if board.is_empty(one_step) {
            out.push(pawn_move(from, one_step, piece, None));

            if !piece.has_moved && from.row() == side.pawn_start_row() {
                if let Some(two_step) = one_step.offset(forward, 0) {
                    if board.is_empty(two_step) {
                        out.push(pawn_move(from, two_step, piece, None));
                    }
                }
            }
        }
    }

    // captures and en-passant
    for to in pawn_attacks(side, from) {
        match board.piece_at(to) {
            Some(target) if target.side != side => {
                out.push(pawn_move(from, to, piece, Some(target)));
            }
            None if board.en_passant_target == Some(to) => {
                if let Some(victim) = en_passant_victim(board, from, to, side) {
                    out.push(Move {
                        captured: Some(victim),
                        special: Some(SpecialMove::EnPassant),
                        ..Move::quiet(from, to, piece)
                    });
                }
            }
            _ => {}
        }
    }
}

/// The enemy pawn that skipped over `to`, standing beside the capturer.
fn en_passant_victim(board: &Board, from: Square, to: Square, side: Side) -> Option<Piece> {
    let victim_square = Square::new(from.row(), to.col())?;
    board
        .piece_at(victim_square)
        .filter(|p| p.kind == PieceKind::Pawn && p.side != side)
}

#[inline]
fn pawn_move(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> Move {
    let special = if to.row() == piece.side.promotion_row() {
        Some(SpecialMove::Promotion)
    } else {
        None
    };
    Move {
        captured,
        special,
        ..Move::quiet(from, to, piece)
    }
}
