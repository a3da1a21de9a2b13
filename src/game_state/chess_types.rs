//! Core value types shared by every subsystem: sides, piece kinds, pieces and
//! board squares.

use std::fmt;

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta of a single pawn step. Row 0 is Black's back rank.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start of the game.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Side::White => 6,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Piece kind (the owner is carried separately on [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Kinds a pawn may turn into on the last rank.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// A piece as stored on the board. Identity is positional: the square that
/// holds the value is the piece's location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    /// Gates castling for kings/rooks and the double step for pawns.
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self {
            kind,
            side,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn moved(self) -> Self {
        Self {
            has_moved: true,
            ..self
        }
    }
}

/// Board coordinate. Row 0 is rank 8, column 0 is the a-file.
///
/// Fields are private so an out-of-range square cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Signed constructor used by offset and ray walks.
    #[inline]
    pub fn from_signed(row: i8, col: i8) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::from_signed(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    /// Every square in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.col);
        let rank = char::from(b'8' - self.row);
        write!(f, "{file}{rank}")
    }
}
