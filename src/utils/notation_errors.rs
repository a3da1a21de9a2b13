//! Errors raised while reading coordinate, move and FEN text.

use thiserror::Error;

use crate::game_state::chess_types::Side;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid square text: {text:?}")]
    InvalidSquare { text: String },

    #[error("invalid move text: {text:?}")]
    InvalidMoveText { text: String },

    #[error("no legal move matches {text:?}")]
    IllegalMove { text: String },

    #[error("FEN is missing its {field} field")]
    MissingFenField { field: &'static str },

    #[error("FEN has extra trailing fields")]
    TrailingFenFields,

    #[error("invalid FEN board layout: {reason}")]
    InvalidBoardLayout { reason: String },

    #[error("invalid piece character {0:?}")]
    InvalidPieceChar(char),

    #[error("invalid side-to-move field: {0:?}")]
    InvalidSide(String),

    #[error("invalid castling field character {0:?}")]
    InvalidCastling(char),

    #[error("invalid move counter: {0:?}")]
    InvalidCounter(String),

    #[error("invalid en-passant target: {text:?}")]
    InvalidEnPassant { text: String },

    #[error("expected exactly one {side} king, found {found}")]
    KingCount { side: Side, found: usize },

    #[error("the {side} king is in check but it is not {side}'s turn")]
    OpponentInCheck { side: Side },
}

pub type NotationResult<T> = Result<T, NotationError>;
