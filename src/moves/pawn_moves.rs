use crate::game_state::chess_types::{Side, Square};

/// The two diagonal squares a pawn attacks. Pawns attack these whether or
/// not anything stands there.
#[inline]
pub fn pawn_attacks(side: Side, from: Square) -> impl Iterator<Item = Square> {
    let forward = side.forward();
    [-1i8, 1i8]
        .into_iter()
        .filter_map(move |d_col| from.offset(forward, d_col))
}

#[cfg(test)]
mod tests {
    use super::pawn_attacks;
    use crate::game_state::chess_types::{Side, Square};

    #[test]
    fn white_pawn_attacks_toward_rank_eight() {
        let e2 = Square::new(6, 4).expect("e2 should exist");
        let attacked: Vec<String> = pawn_attacks(Side::White, e2).map(|s| s.to_string()).collect();
        assert_eq!(attacked, vec!["d3", "f3"]);
    }

    #[test]
    fn edge_pawn_attacks_one_square() {
        let a7 = Square::new(1, 0).expect("a7 should exist");
        let attacked: Vec<String> = pawn_attacks(Side::Black, a7).map(|s| s.to_string()).collect();
        assert_eq!(attacked, vec!["b6"]);
    }
}
