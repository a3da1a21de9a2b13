//! Depth-limited minimax with alpha-beta pruning.
//!
//! The root side maximizes and the opponent minimizes. Every branch is
//! explored on its own board copy and moves are searched in generation order,
//! so the first of several equally scored root moves is always the one
//! returned.
//!
//! A node with no legal moves scores as a decisive result for the side that
//! is not to move. Checkmate and stalemate are scored alike.

use tracing::debug;

use crate::game_state::board::Board;
use crate::game_state::chess_types::Side;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::{LegalMoveGenerator, MoveGenerator};
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, StandardScorer};

/// Magnitude of a no-legal-move leaf. Shallower results score slightly higher.
pub const MATE_SCORE: i32 = 1_000_000;
const INFINITY: i32 = MATE_SCORE + 1;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Plies to search; zero is treated as one.
    pub depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: 4 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Score from the root side's point of view.
    pub best_score: i32,
    pub nodes: u64,
}

/// Best move for `side` using the standard evaluator.
pub fn best_move(board: &Board, side: Side, depth: u8) -> Option<Move> {
    search(
        &LegalMoveGenerator,
        &StandardScorer,
        board,
        side,
        SearchConfig { depth },
    )
    .best_move
}

pub fn search<G: MoveGenerator, S: BoardScorer>(
    generator: &G,
    scorer: &S,
    board: &Board,
    side: Side,
    config: SearchConfig,
) -> SearchResult {
    let depth = config.depth.max(1);
    let mut ctx = SearchContext {
        generator,
        scorer,
        root: side,
        nodes: 0,
    };

    let moves = generator.generate_legal_moves(board, side);
    let mut result = SearchResult {
        best_move: None,
        best_score: -INFINITY,
        nodes: 1,
    };
    if moves.is_empty() {
        result.best_score = ctx.terminal_score(side, 0);
        debug!(%side, "search root has no legal moves");
        return result;
    }

    let mut alpha = -INFINITY;
    for mv in moves {
        let next = apply_move(board, &mv);
        let score = ctx.minimax(&next, side.opposite(), depth - 1, 1, alpha, INFINITY);
        if score > result.best_score {
            result.best_score = score;
            result.best_move = Some(mv);
        }
        alpha = alpha.max(score);
    }
    result.nodes += ctx.nodes;

    debug!(
        %side,
        depth,
        score = result.best_score,
        nodes = result.nodes,
        best = ?result.best_move.map(|mv| mv.to_string()),
        "search finished"
    );
    result
}

struct SearchContext<'a, G, S> {
    generator: &'a G,
    scorer: &'a S,
    root: Side,
    nodes: u64,
}

impl<G: MoveGenerator, S: BoardScorer> SearchContext<'_, G, S> {
    fn minimax(
        &mut self,
        board: &Board,
        to_move: Side,
        depth: u8,
        ply: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        let moves = self.generator.generate_legal_moves(board, to_move);
        if moves.is_empty() {
            return self.terminal_score(to_move, ply);
        }
        if depth == 0 {
            return self.static_score(board);
        }

        if to_move == self.root {
            let mut best = -INFINITY;
            for mv in moves {
                let next = apply_move(board, &mv);
                best = best.max(self.minimax(&next, to_move.opposite(), depth - 1, ply + 1, alpha, beta));
                alpha = alpha.max(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        } else {
            let mut best = INFINITY;
            for mv in moves {
                let next = apply_move(board, &mv);
                best = best.min(self.minimax(&next, to_move.opposite(), depth - 1, ply + 1, alpha, beta));
                beta = beta.min(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
    }

    #[inline]
    fn static_score(&self, board: &Board) -> i32 {
        let white_positive = self.scorer.score(board);
        match self.root {
            Side::White => white_positive,
            Side::Black => -white_positive,
        }
    }

    /// The side not to move is treated as the winner.
    #[inline]
    fn terminal_score(&self, to_move: Side, ply: u8) -> i32 {
        let magnitude = MATE_SCORE - i32::from(ply);
        if to_move == self.root {
            -magnitude
        } else {
            magnitude
        }
    }
}
