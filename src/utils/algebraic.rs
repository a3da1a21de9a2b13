//! Square conversions for coordinate text such as `e4`.

use crate::game_state::chess_types::Square;
use crate::utils::notation_errors::{NotationError, NotationResult};

/// Convert coordinate text (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> NotationResult<Square> {
    let invalid = || NotationError::InvalidSquare {
        text: square.to_owned(),
    };

    let &[file, rank] = square.as_bytes() else {
        return Err(invalid());
    };
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(invalid());
    }

    Square::new(b'8' - rank, file - b'a').ok_or_else(invalid)
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}
