//! Append-only history of completed moves.

use chrono::{DateTime, Utc};

use crate::game_state::chess_types::{PieceKind, Side};
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedMove {
    pub mv: Move,
    pub side: Side,
    /// Piece chosen for a promotion move.
    pub promotion: Option<PieceKind>,
    pub gives_check: bool,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    started_at: DateTime<Utc>,
    first_side: Side,
    first_fullmove: u32,
    moves: Vec<RecordedMove>,
}

impl GameRecord {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            first_side: Side::White,
            first_fullmove: 1,
            moves: Vec::new(),
        }
    }

    /// Record for a game set up with `side` to move on move `fullmove_number`.
    pub fn from_position(side: Side, fullmove_number: u32) -> Self {
        Self {
            first_side: side,
            first_fullmove: fullmove_number.max(1),
            ..Self::new()
        }
    }

    pub fn push(&mut self, mv: Move, promotion: Option<PieceKind>, gives_check: bool) {
        self.moves.push(RecordedMove {
            mv,
            side: mv.piece.side,
            promotion,
            gives_check,
            played_at: Utc::now(),
        });
    }

    #[inline]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[inline]
    pub fn moves(&self) -> &[RecordedMove] {
        &self.moves
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&RecordedMove> {
        self.moves.last()
    }

    #[inline]
    pub fn first_side(&self) -> Side {
        self.first_side
    }

    /// FEN-style move number of the next move.
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number_at(self.moves.len())
    }

    /// Move number of the `index`-th recorded move (0-based).
    pub fn fullmove_number_at(&self, index: usize) -> u32 {
        let plies_from_white = index + usize::from(self.first_side == Side::Black);
        self.first_fullmove + (plies_from_white / 2) as u32
    }
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new()
    }
}
