use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Step or slide onto `to`: quiet when empty, a capture when an enemy stands
/// there, nothing when a friendly piece blocks.
#[inline]
pub fn step_or_capture(board: &Board, from: Square, piece: Piece, to: Square) -> Option<Move> {
    match board.piece_at(to) {
        None => Some(Move::quiet(from, to, piece)),
        Some(target) if target.side != piece.side => Some(Move {
            captured: Some(target),
            ..Move::quiet(from, to, piece)
        }),
        Some(_) => None,
    }
}

#[inline]
pub fn push_targets<I>(board: &Board, from: Square, piece: Piece, targets: I, out: &mut Vec<Move>)
where
    I: IntoIterator<Item = Square>,
{
    out.extend(
        targets
            .into_iter()
            .filter_map(|to| step_or_capture(board, from, piece, to)),
    );
}
