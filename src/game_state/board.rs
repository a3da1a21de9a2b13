//! Board model.
//!
//! `Board` is plain data: an 8x8 grid of optional pieces plus the en-passant
//! target left behind by the last double pawn step. It performs no rule
//! validation so search and the legality filter can copy and mutate it freely.

use crate::game_state::chess_rules::{KINGSIDE_ROOK_COL, KING_START_COL, QUEENSIDE_ROOK_COL};
use crate::game_state::chess_types::*;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    /// Square a pawn skipped over on the previous ply, if any.
    pub en_passant_target: Option<Square>,
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut board = Self::new_empty();
        for side in [Side::White, Side::Black] {
            let home = side.home_row() as usize;
            let pawns = side.pawn_start_row() as usize;
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.squares[home][col] = Some(Piece::new(*kind, side));
                board.squares[pawns][col] = Some(Piece::new(PieceKind::Pawn, side));
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row() as usize][square.col() as usize] = piece;
    }

    #[inline]
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.set_piece(square, Some(piece));
    }

    /// Clear a square, returning whatever stood on it.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Occupied squares and their pieces, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.side == side)
    }

    pub fn count(&self, side: Side, kind: PieceKind) -> usize {
        self.pieces_of(side)
            .filter(|(_, piece)| piece.kind == kind)
            .count()
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces_of(side)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// True when the king and the rook on `rook_col` both stand unmoved on
    /// their home squares.
    pub fn castling_pieces_unmoved(&self, side: Side, rook_col: u8) -> bool {
        let home = side.home_row();
        let (Some(king_sq), Some(rook_sq)) = (
            Square::new(home, KING_START_COL),
            Square::new(home, rook_col),
        ) else {
            return false;
        };

        let king_ok = matches!(
            self.piece_at(king_sq),
            Some(Piece { kind: PieceKind::King, side: s, has_moved: false }) if s == side
        );
        let rook_ok = matches!(
            self.piece_at(rook_sq),
            Some(Piece { kind: PieceKind::Rook, side: s, has_moved: false }) if s == side
        );
        king_ok && rook_ok
    }

    #[inline]
    pub fn can_castle_kingside_by_flags(&self, side: Side) -> bool {
        self.castling_pieces_unmoved(side, KINGSIDE_ROOK_COL)
    }

    #[inline]
    pub fn can_castle_queenside_by_flags(&self, side: Side) -> bool {
        self.castling_pieces_unmoved(side, QUEENSIDE_ROOK_COL)
    }
}
