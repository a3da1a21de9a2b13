//! Static evaluation.
//!
//! Search delegates leaf scoring to [`BoardScorer`] so heuristics can be
//! swapped without touching the tree walk. Scores use the white-positive
//! convention: each term is computed per side and Black's total is
//! subtracted from White's. Search flips the sign for a Black root.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::tables::piece_square_tables::piece_square_value;

pub trait BoardScorer: Send + Sync {
    /// White-positive static score of `board`.
    fn score(&self, board: &Board) -> i32;
}

pub const MOBILITY_WEIGHT: i32 = 5;
pub const CENTER_BONUS: i32 = 20;
pub const EXTENDED_CENTER_PAWN_BONUS: i32 = 10;
pub const EXTENDED_CENTER_PIECE_BONUS: i32 = 5;
pub const PAWN_SHIELD_NEAR_BONUS: i32 = 10;
pub const PAWN_SHIELD_FAR_BONUS: i32 = 5;
pub const OPEN_FILE_NEAR_KING_PENALTY: i32 = 15;
pub const CASTLED_KING_BONUS: i32 = 30;
pub const DOUBLED_PAWN_PENALTY: i32 = 20;
pub const PASSED_PAWN_STEP_BONUS: i32 = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20000,
        }
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board) -> i32 {
        material_balance(board)
    }
}

/// Per-term white-minus-black scores, for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalBreakdown {
    pub material: i32,
    pub piece_squares: i32,
    pub king_safety: i32,
    pub mobility: i32,
    pub center_control: i32,
    pub pawn_structure: i32,
}

impl EvalBreakdown {
    #[inline]
    pub const fn total(&self) -> i32 {
        self.material
            + self.piece_squares
            + self.king_safety
            + self.mobility
            + self.center_control
            + self.pawn_structure
    }
}

/// Material, piece-square tables, king safety, mobility, center control and
/// pawn structure, added together.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl StandardScorer {
    pub fn breakdown(&self, board: &Board) -> EvalBreakdown {
        let endgame = is_endgame(board);
        EvalBreakdown {
            material: material_balance(board),
            piece_squares: piece_square_balance(board, endgame),
            king_safety: if endgame { 0 } else { king_safety_balance(board) },
            mobility: mobility_balance(board),
            center_control: center_control_balance(board),
            pawn_structure: pawn_structure_balance(board),
        }
    }
}

impl BoardScorer for StandardScorer {
    fn score(&self, board: &Board) -> i32 {
        self.breakdown(board).total()
    }
}

#[inline]
fn signed(side: Side, value: i32) -> i32 {
    match side {
        Side::White => value,
        Side::Black => -value,
    }
}

/// Queens are off, or both queens remain with at most two minor pieces.
pub fn is_endgame(board: &Board) -> bool {
    let white_queens = board.count(Side::White, PieceKind::Queen);
    let black_queens = board.count(Side::Black, PieceKind::Queen);
    if white_queens + black_queens == 0 {
        return true;
    }

    let minors: usize = [Side::White, Side::Black]
        .into_iter()
        .map(|side| board.count(side, PieceKind::Knight) + board.count(side, PieceKind::Bishop))
        .sum();
    white_queens > 0 && black_queens > 0 && minors <= 2
}

pub fn material_balance(board: &Board) -> i32 {
    board
        .occupied()
        .map(|(_, piece)| signed(piece.side, MaterialScorer::piece_value(piece.kind)))
        .sum()
}

pub fn piece_square_balance(board: &Board, endgame: bool) -> i32 {
    board
        .occupied()
        .map(|(sq, piece)| signed(piece.side, piece_square_value(piece, sq, endgame)))
        .sum()
}

pub fn king_safety_balance(board: &Board) -> i32 {
    king_safety(board, Side::White) - king_safety(board, Side::Black)
}

fn king_safety(board: &Board, side: Side) -> i32 {
    let Some(king) = board.king_square(side) else {
        return 0;
    };
    let forward = side.forward();
    let mut score = 0;

    for d_col in -1..=1i8 {
        let col = king.col() as i8 + d_col;
        if !(0..8).contains(&col) {
            continue;
        }

        for (distance, bonus) in [(1i8, PAWN_SHIELD_NEAR_BONUS), (2, PAWN_SHIELD_FAR_BONUS)] {
            let shield = Square::from_signed(king.row() as i8 + forward * distance, col);
            if shield.is_some_and(|sq| is_pawn_of(board, sq, side)) {
                score += bonus;
            }
        }

        if pawns_on_file(board, col as u8, side) == 0 {
            score -= OPEN_FILE_NEAR_KING_PENALTY;
        }
    }

    if king.row() == side.home_row() && (king.col() >= 6 || king.col() <= 2) {
        score += CASTLED_KING_BONUS;
    }

    score
}

pub fn mobility_balance(board: &Board) -> i32 {
    let white = all_legal_moves(board, Side::White).len() as i32;
    let black = all_legal_moves(board, Side::Black).len() as i32;
    (white - black) * MOBILITY_WEIGHT
}

pub fn center_control_balance(board: &Board) -> i32 {
    board
        .occupied()
        .map(|(sq, piece)| {
            let row = sq.row();
            let col = sq.col();
            let bonus = if (3..=4).contains(&row) && (3..=4).contains(&col) {
                CENTER_BONUS
            } else if (2..=5).contains(&row) && (2..=5).contains(&col) {
                if piece.kind == PieceKind::Pawn {
                    EXTENDED_CENTER_PAWN_BONUS
                } else {
                    EXTENDED_CENTER_PIECE_BONUS
                }
            } else {
                0
            };
            signed(piece.side, bonus)
        })
        .sum()
}

pub fn pawn_structure_balance(board: &Board) -> i32 {
    pawn_structure(board, Side::White) - pawn_structure(board, Side::Black)
}

fn pawn_structure(board: &Board, side: Side) -> i32 {
    let doubled: i32 = (0..8u8)
        .map(|col| pawns_on_file(board, col, side).saturating_sub(1) as i32)
        .sum();

    let passed: i32 = board
        .pieces_of(side)
        .filter(|(sq, piece)| piece.kind == PieceKind::Pawn && is_passed_pawn(board, *sq, side))
        .map(|(sq, _)| {
            let distance = i32::from(sq.row().abs_diff(side.promotion_row()));
            (7 - distance) * PASSED_PAWN_STEP_BONUS
        })
        .sum();

    passed - doubled * DOUBLED_PAWN_PENALTY
}

/// No enemy pawn ahead on the pawn's own or adjacent files.
fn is_passed_pawn(board: &Board, square: Square, side: Side) -> bool {
    let enemy = side.opposite();
    !board.pieces_of(enemy).any(|(sq, piece)| {
        piece.kind == PieceKind::Pawn
            && sq.col().abs_diff(square.col()) <= 1
            && match side {
                Side::White => sq.row() < square.row(),
                Side::Black => sq.row() > square.row(),
            }
    })
}

#[inline]
fn is_pawn_of(board: &Board, square: Square, side: Side) -> bool {
    matches!(
        board.piece_at(square),
        Some(Piece { kind: PieceKind::Pawn, side: s, .. }) if s == side
    )
}

fn pawns_on_file(board: &Board, col: u8, side: Side) -> usize {
    (0..8u8)
        .filter_map(|row| Square::new(row, col))
        .filter(|sq| is_pawn_of(board, *sq, side))
        .count()
}

#[cfg(test)]
mod tests {
    use super::{
        is_endgame, pawn_structure_balance, BoardScorer, MaterialScorer, StandardScorer,
        CASTLED_KING_BONUS,
    };
    use crate::game_state::board::Board;
    use crate::utils::fen_parser::parse_fen;

    fn board(fen: &str) -> Board {
        parse_fen(fen).expect("FEN should parse").0
    }

    #[test]
    fn start_position_is_balanced() {
        let board = Board::new_game();
        assert_eq!(StandardScorer.score(&board), 0);
        assert_eq!(StandardScorer.breakdown(&board), Default::default());
        assert!(!is_endgame(&board));
    }

    #[test]
    fn material_is_white_positive() {
        assert_eq!(MaterialScorer.score(&board("4k3/8/8/8/8/8/8/4KQ2 w - - 0 1")), 900);
        assert_eq!(MaterialScorer.score(&board("4kq2/8/8/8/8/8/8/4K3 w - - 0 1")), -900);
    }

    #[test]
    fn central_knight_beats_rim_knight() {
        let center = board("4k3/8/8/3N4/8/8/8/4K3 w - - 0 1");
        let rim = board("4k3/8/8/8/8/8/N7/4K3 w - - 0 1");
        assert!(StandardScorer.score(&center) > StandardScorer.score(&rim));
    }

    #[test]
    fn endgame_detection_follows_queens_and_minors() {
        assert!(is_endgame(&board("4k3/pppp4/8/8/8/8/PPPP4/R3K3 w - - 0 1")));
        assert!(is_endgame(&board("3qk3/8/8/8/8/8/8/3QK1N1 w - - 0 1")));
        assert!(!is_endgame(&board("3qkb2/8/8/8/8/8/8/3QK1NN w - - 0 1")));
        assert!(!is_endgame(&board("4k3/8/8/8/8/8/8/3QK3 w - - 0 1")));
    }

    #[test]
    fn doubled_pawns_cost_and_passed_pawns_pay() {
        // White: doubled e-pawns, no black pawns to stop them.
        let doubled = board("4k3/8/8/8/4P3/4P3/8/4K3 w - - 0 1");
        // e4 passed (distance 4) + e3 passed (distance 5) - one doubled pawn.
        assert_eq!(pawn_structure_balance(&doubled), 30 + 20 - 20);

        let blocked = board("4k3/4p3/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(pawn_structure_balance(&blocked), 0);
    }

    #[test]
    fn castled_king_with_shield_is_safer() {
        let castled = board("r2q1rk1/ppp2ppp/2nb4/8/8/2NB4/PPP2PPP/R2Q1RK1 w - - 0 1");
        let exposed = board("r2q1rk1/ppp2ppp/2nb4/8/8/2NB4/PPP2PPP/R2QK2R w - - 0 1");
        let castled_safety = StandardScorer.breakdown(&castled).king_safety;
        let exposed_safety = StandardScorer.breakdown(&exposed).king_safety;
        assert_eq!(castled_safety, 0);
        assert!(exposed_safety < 0);
        assert!(castled_safety - exposed_safety >= CASTLED_KING_BONUS);
    }
}
