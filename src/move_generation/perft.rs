//! Perft node counting.
//!
//! Walks the legal move tree to a fixed depth and tallies leaf moves by kind.
//! A promotion counts once per destination because the piece choice is made
//! after the move, not as part of it.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Side;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{has_any_legal_move, MoveGenerator};
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, mv: &Move, after: &Board) {
        self.nodes += 1;
        if mv.is_capture() {
            self.captures += 1;
        }
        if mv.is_en_passant() {
            self.en_passant += 1;
        }
        if mv.is_castling() {
            self.castles += 1;
        }
        if mv.is_promotion() {
            self.promotions += 1;
        }

        let defender = mv.piece.side.opposite();
        if is_in_check(after, defender) {
            self.checks += 1;
            if !has_any_legal_move(after, defender) {
                self.checkmates += 1;
            }
        }
    }
}

pub fn perft<G: MoveGenerator>(generator: &G, board: &Board, side: Side, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(board, side) {
        let next = apply_move(board, &mv);
        if depth == 1 {
            total.record_leaf(&mv, &next);
        } else {
            total.merge(perft(generator, &next, side.opposite(), depth - 1));
        }
    }
    total
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    board: &Board,
    side: Side,
    depth: u8,
) -> Vec<(Move, usize)> {
    if depth == 0 {
        return Vec::new();
    }
    generator
        .generate_legal_moves(board, side)
        .into_iter()
        .map(|mv| {
            let next = apply_move(board, &mv);
            let nodes = perft(generator, &next, side.opposite(), depth - 1).nodes;
            (mv, nodes)
        })
        .collect()
}
