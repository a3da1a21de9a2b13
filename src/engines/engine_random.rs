//! Seeded random-move engine.
//!
//! Selects uniformly from legal moves; used for harness runs and tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::Engine;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Side;
use crate::move_generation::legal_move_generator::{LegalMoveGenerator, MoveGenerator};
use crate::moves::move_descriptions::Move;

pub struct RandomEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(&mut self, board: &Board, side: Side) -> Option<Move> {
        let legal_moves = self.move_generator.generate_legal_moves(board, side);
        legal_moves.choose(&mut self.rng).copied()
    }
}
