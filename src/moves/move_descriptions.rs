//! Move values.
//!
//! A move is fully determined by its squares plus the board it was generated
//! from. It carries the moving piece and any captured piece so application
//! and scoring never have to look them up again.

use std::fmt;

use crate::game_state::chess_types::{Piece, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMove {
    Castling(CastleSide),
    /// Captures the pawn beside `from` on the destination column, not on `to`.
    EnPassant,
    /// Pawn reaches the last rank; the replacement piece is chosen separately.
    Promotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub special: Option<SpecialMove>,
}

impl Move {
    #[inline]
    pub const fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            special: None,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        matches!(self.special, Some(SpecialMove::Castling(_)))
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.special, Some(SpecialMove::EnPassant))
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.special, Some(SpecialMove::Promotion))
    }

    /// Square of the piece removed by this move, if any.
    pub fn capture_square(&self) -> Option<Square> {
        if self.is_en_passant() {
            Square::new(self.from.row(), self.to.col())
        } else if self.captured.is_some() {
            Some(self.to)
        } else {
            None
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, SpecialMove};
    use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};

    #[test]
    fn en_passant_capture_square_is_beside_the_pawn() {
        let e5 = Square::new(3, 4).expect("e5 should exist");
        let d6 = Square::new(2, 3).expect("d6 should exist");
        let mv = Move {
            from: e5,
            to: d6,
            piece: Piece::new(PieceKind::Pawn, Side::White).moved(),
            captured: Some(Piece::new(PieceKind::Pawn, Side::Black).moved()),
            special: Some(SpecialMove::EnPassant),
        };

        assert_eq!(mv.capture_square().map(|sq| sq.to_string()), Some("d5".to_owned()));
        assert_eq!(mv.to_string(), "e5d6");
    }
}
