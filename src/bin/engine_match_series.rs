//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --verbose`
//! `RUST_LOG=debug cargo run --release --bin engine_match_series`

use plum_chess_casual::engines::engine_minimax::{Difficulty, MinimaxEngine};
use plum_chess_casual::engines::engine_random::RandomEngine;
use plum_chess_casual::engines::engine_trait::Engine;
use plum_chess_casual::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};
use tracing_subscriber::EnvFilter;

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Swap these two lines to try other pairings or difficulties.
    let player1 = || Box::new(MinimaxEngine::with_difficulty(Difficulty::Shallow)) as Box<dyn Engine>;
    let player2 = || Box::new(RandomEngine::new(99)) as Box<dyn Engine>;

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: 10,
            base_seed: 1234,
            per_game: MatchConfig {
                max_plies: 200,
                opening_min_plies: 2,
                opening_max_plies: 6,
            },
        },
    );

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
}
