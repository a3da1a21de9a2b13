//! Canonical chess-rule constants.
//!
//! Static rule literals such as the standard starting position FEN and the
//! fixed columns involved in castling.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KING_START_COL: u8 = 4;
pub const KINGSIDE_ROOK_COL: u8 = 7;
pub const QUEENSIDE_ROOK_COL: u8 = 0;

pub const KINGSIDE_KING_TARGET_COL: u8 = 6;
pub const QUEENSIDE_KING_TARGET_COL: u8 = 2;
pub const KINGSIDE_ROOK_TARGET_COL: u8 = 5;
pub const QUEENSIDE_ROOK_TARGET_COL: u8 = 3;
