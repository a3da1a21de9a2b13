//! Bishop, rook and queen generation: ray-casts that stop before a friendly
//! piece and stop on (capturing) an enemy one.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::move_descriptions::Move;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

pub fn generate_bishop_moves(board: &Board, from: Square, piece: Piece, out: &mut Vec<Move>) {
    push_targets(board, from, piece, bishop_attacks(board, from), out);
}

pub fn generate_rook_moves(board: &Board, from: Square, piece: Piece, out: &mut Vec<Move>) {
    push_targets(board, from, piece, rook_attacks(board, from), out);
}

pub fn generate_queen_moves(board: &Board, from: Square, piece: Piece, out: &mut Vec<Move>) {
    push_targets(board, from, piece, queen_attacks(board, from), out);
}
