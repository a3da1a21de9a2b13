//! Reasons a player action is rejected.
//!
//! None of these are fatal: the controller reports them and keeps going.

use thiserror::Error;

use crate::game_state::chess_types::{PieceKind, Side, Square};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("no game is in progress")]
    NotInPlay,

    #[error("it is {0}'s turn and {0} is played by the engine")]
    NotYourTurn(Side),

    #[error("the engine is thinking")]
    EngineThinking,

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {square} belongs to {owner}")]
    EnemyPiece { square: Square, owner: Side },

    #[error("no piece is selected")]
    NothingSelected,

    #[error("{to} is not a legal destination from {from}")]
    IllegalDestination { from: Square, to: Square },

    #[error("a promotion choice is pending")]
    PromotionPending,

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("a pawn cannot promote to {0:?}")]
    InvalidPromotionPiece(PieceKind),
}

pub type GameResult<T> = Result<T, GameError>;
