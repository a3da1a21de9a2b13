//! Crate root module declarations for the casual Plum Chess game core.
//!
//! This file exposes the board model, legal move generation, search,
//! engines, the interactive game controller and notation helpers so the
//! binary, benches, tests and a front end can import stable module paths.

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliding;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}
pub mod tables {
    pub mod piece_square_tables;
}
pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod game {
    pub mod events;
    pub mod game_controller;
    pub mod game_errors;
    pub mod game_record;
    pub mod turn;
}

pub mod utils {
    pub mod algebraic;
    pub mod engine_match_harness;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod notation_errors;
    pub mod pgn;
    pub mod render_game_state;
}
