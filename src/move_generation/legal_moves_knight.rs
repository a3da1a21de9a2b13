use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::move_descriptions::Move;

pub fn generate_knight_moves(board: &Board, from: Square, piece: Piece, out: &mut Vec<Move>) {
    push_targets(board, from, piece, knight_attacks(from), out);
}
