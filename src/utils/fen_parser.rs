//! FEN-to-Board parser.
//!
//! Builds a [`Board`] and the side to move from Forsyth-Edwards Notation. The
//! board keeps no separate castling rights, so the castling field is folded
//! into the `has_moved` flags of kings and rooks, and pawns standing off
//! their starting row are marked as moved. Positions where the side that just
//! moved is still in check are rejected, since the side to move could then
//! capture a king.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KINGSIDE_ROOK_COL, KING_START_COL, QUEENSIDE_ROOK_COL};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::notation_errors::{NotationError, NotationResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CastlingField {
    kingside: [bool; 2],
    queenside: [bool; 2],
}

/// A parsed FEN record, counters included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenPosition {
    pub board: Board,
    pub side_to_move: Side,
    pub halfmove_clock: u32,
    /// Never below 1.
    pub fullmove_number: u32,
}

pub fn parse_fen(fen: &str) -> NotationResult<(Board, Side)> {
    let position = parse_fen_position(fen)?;
    Ok((position.board, position.side_to_move))
}

pub fn parse_fen_position(fen: &str) -> NotationResult<FenPosition> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or(NotationError::MissingFenField { field: "board" })?;
    let side_part = parts
        .next()
        .ok_or(NotationError::MissingFenField { field: "side-to-move" })?;
    let castling_part = parts
        .next()
        .ok_or(NotationError::MissingFenField { field: "castling" })?;
    let en_passant_part = parts
        .next()
        .ok_or(NotationError::MissingFenField { field: "en-passant" })?;

    // Counters are optional.
    let halfmove_clock = parse_counter(parts.next(), 0)?;
    let fullmove_number = parse_counter(parts.next(), 1)?.max(1);
    if parts.next().is_some() {
        return Err(NotationError::TrailingFenFields);
    }

    let mut board = Board::new_empty();
    parse_board(board_part, &mut board)?;
    let side_to_move = parse_side_to_move(side_part)?;
    validate_position(&board, side_to_move)?;

    let castling = parse_castling_field(castling_part)?;
    apply_movement_history(&mut board, castling);
    board.en_passant_target = parse_en_passant_square(en_passant_part, side_to_move)?;

    Ok(FenPosition {
        board,
        side_to_move,
        halfmove_clock,
        fullmove_number,
    })
}

/// Checks a position can be played from: one king per side, and the side
/// that is not to move is not in check.
pub fn validate_position(board: &Board, side_to_move: Side) -> NotationResult<()> {
    for side in [Side::White, Side::Black] {
        let found = board.count(side, PieceKind::King);
        if found != 1 {
            return Err(NotationError::KingCount { side, found });
        }
    }

    let waiting = side_to_move.opposite();
    if is_in_check(board, waiting) {
        return Err(NotationError::OpponentInCheck { side: waiting });
    }
    Ok(())
}

fn parse_counter(field: Option<&str>, default: u32) -> NotationResult<u32> {
    match field {
        None => Ok(default),
        Some(text) => text
            .parse::<u32>()
            .map_err(|_| NotationError::InvalidCounter(text.to_owned())),
    }
}

fn parse_board(board_part: &str, board: &mut Board) -> NotationResult<()> {
    let invalid = |reason: &str| NotationError::InvalidBoardLayout {
        reason: reason.to_owned(),
    };

    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    // FEN lists rank 8 first, which is row 0.
    for (row, rank_str) in (0u8..).zip(ranks) {
        let mut col = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid("empty-square count must be 1-8"));
                }
                col = col
                    .checked_add(empty_count as u8)
                    .filter(|files| *files <= 8)
                    .ok_or_else(|| invalid("rank has too many files"))?;
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or(NotationError::InvalidPieceChar(ch))?;
            let square = Square::new(row, col).ok_or_else(|| invalid("rank has too many files"))?;
            board.place(square, piece);
            col += 1;
        }

        if col != 8 {
            return Err(invalid("rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> NotationResult<Side> {
    match side_part {
        "w" => Ok(Side::White),
        "b" => Ok(Side::Black),
        _ => Err(NotationError::InvalidSide(side_part.to_owned())),
    }
}

fn parse_castling_field(castling_part: &str) -> NotationResult<CastlingField> {
    let mut field = CastlingField::default();
    if castling_part == "-" {
        return Ok(field);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => field.kingside[Side::White.index()] = true,
            'Q' => field.queenside[Side::White.index()] = true,
            'k' => field.kingside[Side::Black.index()] = true,
            'q' => field.queenside[Side::Black.index()] = true,
            _ => return Err(NotationError::InvalidCastling(ch)),
        }
    }

    Ok(field)
}

/// The target sits behind a pawn that just double-stepped, so it must be on
/// the third rank with Black to move or the sixth with White to move.
fn parse_en_passant_square(en_passant_part: &str, side_to_move: Side) -> NotationResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    let square = algebraic_to_square(en_passant_part)?;
    let mover = side_to_move.opposite();
    let expected_row = mover.pawn_start_row() as i8 + mover.forward();
    if square.row() as i8 != expected_row {
        return Err(NotationError::InvalidEnPassant {
            text: en_passant_part.to_owned(),
        });
    }
    Ok(Some(square))
}

/// Every piece is placed unmoved; mark the ones the FEN says have moved.
fn apply_movement_history(board: &mut Board, castling: CastlingField) {
    let placed: Vec<(Square, Piece)> = board.occupied().collect();

    for (square, piece) in placed {
        let side = piece.side;
        let on_home_row = square.row() == side.home_row();
        let kingside = castling.kingside[side.index()];
        let queenside = castling.queenside[side.index()];

        let unmoved = match piece.kind {
            PieceKind::Pawn => square.row() == side.pawn_start_row(),
            PieceKind::King => on_home_row && square.col() == KING_START_COL && (kingside || queenside),
            PieceKind::Rook if on_home_row && square.col() == KINGSIDE_ROOK_COL => kingside,
            PieceKind::Rook if on_home_row && square.col() == QUEENSIDE_ROOK_COL => queenside,
            PieceKind::Rook => false,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => true,
        };

        if !unmoved {
            board.place(square, piece.moved());
        }
    }
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let side = if ch.is_ascii_uppercase() {
        Side::White
    } else if ch.is_ascii_lowercase() {
        Side::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(kind, side))
}

#[cfg(test)]
mod tests {
    use super::{parse_fen, parse_fen_position};
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Side;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::notation_errors::NotationError;

    #[test]
    fn starting_fen_matches_new_game() {
        let (board, side) = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(side, Side::White);
        assert_eq!(board, Board::new_game());
    }

    #[test]
    fn castling_field_becomes_movement_flags() {
        let (board, side) = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 3 20").expect("FEN should parse");
        assert_eq!(side, Side::Black);
        assert!(board.can_castle_kingside_by_flags(Side::White));
        assert!(!board.can_castle_queenside_by_flags(Side::White));
        assert!(!board.can_castle_kingside_by_flags(Side::Black));
        assert!(board.can_castle_queenside_by_flags(Side::Black));
    }

    #[test]
    fn en_passant_field_and_moved_pawns() {
        let (board, _) =
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let d6 = algebraic_to_square("d6").expect("d6 should parse");
        let e5 = algebraic_to_square("e5").expect("e5 should parse");
        assert_eq!(board.en_passant_target, Some(d6));
        assert!(board.piece_at(e5).expect("e5 should hold a pawn").has_moved);
    }

    #[test]
    fn rejects_boards_without_one_king_each() {
        let err = parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").expect_err("missing king should fail");
        assert_eq!(
            err,
            NotationError::KingCount {
                side: Side::Black,
                found: 0
            }
        );
    }

    #[test]
    fn rejects_malformed_layouts() {
        assert!(parse_fen("8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K2X w - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra").is_err());
        assert!(matches!(
            parse_fen("88888888888888888888888888888888/8/8/8/8/8/8/8 w - - 0 1"),
            Err(NotationError::InvalidBoardLayout { .. })
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/44K3 w - - 0 1"),
            Err(NotationError::InvalidBoardLayout { .. })
        ));
    }

    #[test]
    fn rejects_positions_where_the_waiting_king_is_attacked() {
        let err = parse_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1")
            .expect_err("black in check with white to move should fail");
        assert_eq!(err, NotationError::OpponentInCheck { side: Side::Black });

        // The side to move may be in check.
        assert!(parse_fen("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").is_ok());
    }

    #[test]
    fn en_passant_target_must_match_the_side_to_move() {
        assert!(parse_fen("4k3/8/8/8/4Pp2/8/8/4K3 b - e3 0 1").is_ok());
        assert_eq!(
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - e4 0 1").expect_err("e4 is never an en-passant target"),
            NotationError::InvalidEnPassant { text: "e4".to_owned() }
        );
        assert!(parse_fen("4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1").is_err());
    }

    #[test]
    fn counters_are_kept() {
        let position = parse_fen_position("4k3/8/8/8/8/8/8/4K3 b - - 7 20").expect("FEN should parse");
        assert_eq!(position.side_to_move, Side::Black);
        assert_eq!(position.halfmove_clock, 7);
        assert_eq!(position.fullmove_number, 20);

        let position = parse_fen_position("4k3/8/8/8/8/8/8/4K3 w - -").expect("FEN should parse");
        assert_eq!((position.halfmove_clock, position.fullmove_number), (0, 1));
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1").is_err());
    }
}
