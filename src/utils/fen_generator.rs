//! Board-to-FEN generator.
//!
//! The castling field is derived from the king and rook `has_moved` flags.
//! The halfmove clock is not tracked and is always written as `0`.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// FEN for `board` with `side` to move and a fullmove number of 1.
pub fn generate_fen(board: &Board, side: Side) -> String {
    generate_fen_with_fullmove(board, side, 1)
}

pub fn generate_fen_with_fullmove(board: &Board, side: Side, fullmove_number: u32) -> String {
    let side_to_move = match side {
        Side::White => "w",
        Side::Black => "b",
    };
    let en_passant = board
        .en_passant_target
        .map_or_else(|| "-".to_owned(), |sq| sq.to_string());

    format!(
        "{} {} {} {} 0 {}",
        generate_board_field(board),
        side_to_move,
        generate_castling_field(board),
        en_passant,
        fullmove_number.max(1)
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for row in 0..8u8 {
        let mut empty_count = 0u8;

        for col in 0..8u8 {
            match Square::new(row, col).and_then(|sq| board.piece_at(sq)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if row < 7 {
            out.push('/');
        }
    }

    out
}

pub fn piece_to_fen_char(piece: Piece) -> char {
    let base = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match piece.side {
        Side::White => base.to_ascii_uppercase(),
        Side::Black => base,
    }
}

fn generate_castling_field(board: &Board) -> String {
    let mut out = String::new();

    if board.can_castle_kingside_by_flags(Side::White) {
        out.push('K');
    }
    if board.can_castle_queenside_by_flags(Side::White) {
        out.push('Q');
    }
    if board.can_castle_kingside_by_flags(Side::Black) {
        out.push('k');
    }
    if board.can_castle_queenside_by_flags(Side::Black) {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}
