//! Terminal-oriented Unicode board renderer used for diagnostics and logs.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Render the board with rank 8 at the top.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8u8 {
        let rank = char::from(b'8' - row);
        out.push(rank);
        out.push(' ');

        for col in 0..8u8 {
            match Square::new(row, col).and_then(|sq| board.piece_at(sq)) {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }

            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.side, piece.kind) {
        (Side::White, PieceKind::Pawn) => '♙',
        (Side::White, PieceKind::Knight) => '♘',
        (Side::White, PieceKind::Bishop) => '♗',
        (Side::White, PieceKind::Rook) => '♖',
        (Side::White, PieceKind::Queen) => '♕',
        (Side::White, PieceKind::King) => '♔',
        (Side::Black, PieceKind::Pawn) => '♟',
        (Side::Black, PieceKind::Knight) => '♞',
        (Side::Black, PieceKind::Bishop) => '♝',
        (Side::Black, PieceKind::Rook) => '♜',
        (Side::Black, PieceKind::Queen) => '♛',
        (Side::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::board::Board;

    #[test]
    fn start_position_renders_black_on_top() {
        let text = render_board(&Board::new_game());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[5], "4 · · · · · · · · 4");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }
}
