//! Difficulty-driven minimax engine used for the automated opponent.

use tracing::debug;

use crate::engines::engine_trait::Engine;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Side;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::StandardScorer;
use crate::search::minimax::{search, SearchConfig, SearchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Shallow,
    #[default]
    Medium,
    Deep,
}

impl Difficulty {
    /// Search depth in plies.
    pub const fn depth(self) -> u8 {
        match self {
            Difficulty::Shallow => 2,
            Difficulty::Medium => 4,
            Difficulty::Deep => 5,
        }
    }
}

pub struct MinimaxEngine {
    config: SearchConfig,
    generator: LegalMoveGenerator,
    scorer: StandardScorer,
    last_result: Option<SearchResult>,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            generator: LegalMoveGenerator,
            scorer: StandardScorer,
            last_result: None,
        }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(SearchConfig {
            depth: difficulty.depth(),
        })
    }

    pub fn depth(&self) -> u8 {
        self.config.depth
    }

    /// Outcome of the most recent search, if any.
    pub fn last_result(&self) -> Option<SearchResult> {
        self.last_result
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::with_difficulty(Difficulty::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn new_game(&mut self) {
        self.last_result = None;
    }

    fn choose_move(&mut self, board: &Board, side: Side) -> Option<Move> {
        let result = search(&self.generator, &self.scorer, board, side, self.config);
        debug!(depth = self.config.depth, nodes = result.nodes, "minimax engine searched");
        self.last_result = Some(result);
        result.best_move
    }
}

#[cfg(test)]
mod tests {
    use super::{Difficulty, MinimaxEngine};
    use crate::engines::engine_trait::Engine;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn difficulty_maps_to_depth() {
        assert_eq!(Difficulty::Shallow.depth(), 2);
        assert_eq!(Difficulty::default().depth(), 4);
        assert_eq!(MinimaxEngine::with_difficulty(Difficulty::Deep).depth(), 5);
    }

    #[test]
    fn shallow_engine_wins_hanging_rook() {
        let (board, side) = parse_fen("4k3/8/8/8/8/8/1r6/1Q2K3 w - - 0 1").expect("FEN should parse");
        let mut engine = MinimaxEngine::with_difficulty(Difficulty::Shallow);
        let mv = engine.choose_move(&board, side).expect("a move should be found");
        assert_eq!(mv.to_string(), "b1b2");
        assert!(engine.last_result().is_some_and(|r| r.nodes > 1));
    }
}
