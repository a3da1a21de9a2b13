//! Coordinate move text (`e2e4`, `e7e8q`) resolved against the legal move
//! list of a position.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move_with_promotion;
use crate::move_generation::legal_move_generator::legal_moves_for;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::notation_errors::{NotationError, NotationResult};

/// A legal move plus the promotion piece named by the text, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMove {
    pub mv: Move,
    pub promotion: Option<PieceKind>,
}

pub fn move_to_long_algebraic(mv: &Move, promotion: Option<PieceKind>) -> String {
    let mut out = format!("{}{}", mv.from, mv.to);
    if let Some(ch) = promotion.filter(|_| mv.is_promotion()).and_then(promotion_to_char) {
        out.push(ch);
    }
    out
}

/// Match `text` against the legal moves of `side` on `board`.
///
/// A promotion move without a suffix resolves with `promotion == None`,
/// leaving the piece choice to the caller.
pub fn resolve_long_algebraic(board: &Board, side: Side, text: &str) -> NotationResult<ResolvedMove> {
    let invalid = || NotationError::InvalidMoveText {
        text: text.to_owned(),
    };
    let illegal = || NotationError::IllegalMove {
        text: text.to_owned(),
    };

    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(invalid());
    }
    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        Some(ch) => Some(char_to_promotion(ch).ok_or_else(invalid)?),
        None => None,
    };

    match board.piece_at(from) {
        Some(piece) if piece.side == side => {}
        _ => return Err(illegal()),
    }

    let mv = legal_moves_for(board, from)
        .into_iter()
        .find(|mv| mv.to == to)
        .ok_or_else(illegal)?;
    if promotion.is_some() && !mv.is_promotion() {
        return Err(invalid());
    }

    Ok(ResolvedMove { mv, promotion })
}

/// Resolve and apply `text`, promoting to a queen when no suffix is given.
pub fn apply_long_algebraic(board: &Board, side: Side, text: &str) -> NotationResult<Board> {
    let resolved = resolve_long_algebraic(board, side, text)?;
    let promotion = resolved.promotion.unwrap_or(PieceKind::Queen);
    Ok(apply_move_with_promotion(board, &resolved.mv, Some(promotion)))
}

fn promotion_to_char(kind: PieceKind) -> Option<char> {
    match kind {
        PieceKind::Knight => Some('n'),
        PieceKind::Bishop => Some('b'),
        PieceKind::Rook => Some('r'),
        PieceKind::Queen => Some('q'),
        PieceKind::Pawn | PieceKind::King => None,
    }
}

pub fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}
