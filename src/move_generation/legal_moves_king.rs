use crate::game_state::board::Board;
use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::king_moves::king_attacks;
use crate::moves::move_descriptions::{CastleSide, Move, SpecialMove};

pub fn generate_king_moves(board: &Board, from: Square, piece: Piece, out: &mut Vec<Move>) {
    push_targets(board, from, piece, king_attacks(from), out);
    generate_castling_moves(board, from, piece, out);
}

fn generate_castling_moves(board: &Board, king_from: Square, king: Piece, out: &mut Vec<Move>) {
    let side = king.side;
    let enemy = side.opposite();
    let home = side.home_row();

    if king.has_moved || king_from.row() != home || king_from.col() != KING_START_COL {
        return;
    }

    // Cannot castle out of check.
    if is_square_attacked(board, king_from, enemy) {
        return;
    }

    for castle_side in [CastleSide::Kingside, CastleSide::Queenside] {
        let (rook_col, between, passes, target_col): (u8, &[u8], &[u8], u8) = match castle_side {
            CastleSide::Kingside => (
                KINGSIDE_ROOK_COL,
                &[5, 6],
                &[KINGSIDE_ROOK_TARGET_COL],
                KINGSIDE_KING_TARGET_COL,
            ),
            CastleSide::Queenside => (
                QUEENSIDE_ROOK_COL,
                &[1, 2, 3],
                &[QUEENSIDE_ROOK_TARGET_COL],
                QUEENSIDE_KING_TARGET_COL,
            ),
        };

        if !board.castling_pieces_unmoved(side, rook_col) {
            continue;
        }

        let path_clear = between
            .iter()
            .filter_map(|col| Square::new(home, *col))
            .all(|sq| board.is_empty(sq));
        if !path_clear {
            continue;
        }

        // The destination is left to the legality filter.
        let path_safe = passes
            .iter()
            .filter_map(|col| Square::new(home, *col))
            .all(|sq| !is_square_attacked(board, sq, enemy));
        if !path_safe {
            continue;
        }

        if let Some(to) = Square::new(home, target_col) {
            out.push(Move {
                special: Some(SpecialMove::Castling(castle_side)),
                ..Move::quiet(king_from, to, king)
            });
        }
    }
}
