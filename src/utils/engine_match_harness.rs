//! Head-to-head engine match harness.
//!
//! Runs two `Engine` implementations against each other from the standard
//! position after a seeded random opening, with no front end involved.

use std::time::Instant;

use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};
use tracing::{debug, info};

use crate::engines::engine_trait::Engine;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Side;
use crate::game_state::game_state::GameOutcome;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawMaxPlies,
}

impl From<GameOutcome> for MatchOutcome {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Checkmate { winner: Side::White } => MatchOutcome::WhiteWinCheckmate,
            GameOutcome::Checkmate { winner: Side::Black } => MatchOutcome::BlackWinCheckmate,
            GameOutcome::Stalemate => MatchOutcome::DrawStalemate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWinCheckmate { player: PlayerId, side: Side },
    DrawStalemate,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            opening_min_plies: 2,
            opening_max_plies: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_board: Board,
    pub final_side_to_move: Side,
    pub opening_moves_lan: Vec<String>,
    pub played_moves_lan: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match.
///
/// An engine that returns `None` while legal moves exist, or a move that is
/// not legal, forfeits to the first legal move in generation order.
pub fn play_engine_match(
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    seed: u64,
    config: MatchConfig,
) -> MatchResult {
    engine_white.new_game();
    engine_black.new_game();

    let (mut board, mut side, opening_moves_lan) = apply_seeded_random_opening(
        seed,
        config.opening_min_plies,
        config.opening_max_plies,
    );

    let mut result = MatchResult {
        outcome: MatchOutcome::DrawMaxPlies,
        final_board: Board::new_game(),
        final_side_to_move: Side::White,
        opening_moves_lan,
        played_moves_lan: Vec::new(),
        white_move_count: 0,
        black_move_count: 0,
        white_total_time_ns: 0,
        black_total_time_ns: 0,
    };

    for _ in 0..config.max_plies {
        let legal_moves = all_legal_moves(&board, side);
        if legal_moves.is_empty() {
            let outcome = if is_in_check(&board, side) {
                GameOutcome::Checkmate {
                    winner: side.opposite(),
                }
            } else {
                GameOutcome::Stalemate
            };
            result.outcome = outcome.into();
            break;
        }

        let started = Instant::now();
        let proposed = match side {
            Side::White => engine_white.choose_move(&board, side),
            Side::Black => engine_black.choose_move(&board, side),
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match side {
            Side::White => {
                result.white_move_count = result.white_move_count.saturating_add(1);
                result.white_total_time_ns = result.white_total_time_ns.saturating_add(elapsed_ns);
            }
            Side::Black => {
                result.black_move_count = result.black_move_count.saturating_add(1);
                result.black_total_time_ns = result.black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let chosen = match proposed.filter(|mv| legal_moves.contains(mv)) {
            Some(mv) => mv,
            None => {
                debug!(%side, "engine returned no legal move; using first legal move");
                legal_moves[0]
            }
        };

        result.played_moves_lan.push(move_to_long_algebraic(&chosen, None));
        board = apply_move(&board, &chosen);
        side = side.opposite();
    }

    result.final_board = board;
    result.final_side_to_move = side;
    result
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> MatchSeriesStats
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_white = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));

        let mut player1 = player1_factory();
        let mut player2 = player2_factory();
        let (white_name, black_name) = if player1_is_white {
            (player1.name(), player2.name())
        } else {
            (player2.name(), player1.name())
        };
        info!(
            game = i + 1,
            games = config.games,
            seed,
            white = white_name,
            black = black_name,
            "series game started"
        );

        let result = if player1_is_white {
            play_engine_match(player1.as_mut(), player2.as_mut(), seed, config.per_game)
        } else {
            play_engine_match(player2.as_mut(), player1.as_mut(), seed, config.per_game)
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_white {
            (
                result.white_move_count,
                result.black_move_count,
                result.white_total_time_ns,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_move_count,
                result.white_move_count,
                result.black_total_time_ns,
                result.white_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let mapped = match result.outcome {
            MatchOutcome::WhiteWinCheckmate | MatchOutcome::BlackWinCheckmate => {
                let winning_side = if result.outcome == MatchOutcome::WhiteWinCheckmate {
                    Side::White
                } else {
                    Side::Black
                };
                let player1_won = player1_is_white == (winning_side == Side::White);
                let player = if player1_won {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWinCheckmate {
                    player,
                    side: winning_side,
                }
            }
            MatchOutcome::DrawStalemate => {
                stats.draws += 1;
                SeriesOutcome::DrawStalemate
            }
            MatchOutcome::DrawMaxPlies => {
                stats.draws += 1;
                SeriesOutcome::DrawMaxPlies
            }
        };
        stats.outcomes.push(mapped);

        info!(
            game = i + 1,
            result = ?mapped,
            p1_wins = stats.player1_wins,
            p2_wins = stats.player2_wins,
            draws = stats.draws,
            "series game finished"
        );
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    stats
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> (Board, Side, Vec<String>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new_game();
    let mut side = Side::White;
    let mut opening_moves_lan = Vec::<String>::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        let legal_moves = all_legal_moves(&board, side);
        let Some(chosen) = legal_moves.choose(&mut rng) else {
            break;
        };

        opening_moves_lan.push(move_to_long_algebraic(chosen, None));
        board = apply_move(&board, chosen);
        side = side.opposite();
    }

    (board, side, opening_moves_lan)
}

#[cfg(test)]
mod tests {
    use super::{
        play_engine_match, play_engine_match_series, MatchConfig, MatchOutcome, MatchSeriesConfig,
    };
    use crate::engines::engine_minimax::MinimaxEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_trait::Engine;
    use crate::search::minimax::SearchConfig;

    #[test]
    fn random_vs_minimax_runs_to_a_recorded_end() {
        let mut white = RandomEngine::new(1);
        let mut black = MinimaxEngine::new(SearchConfig { depth: 1 });
        let result = play_engine_match(
            &mut white,
            &mut black,
            42,
            MatchConfig {
                max_plies: 30,
                opening_min_plies: 2,
                opening_max_plies: 6,
            },
        );

        assert!((2..=6).contains(&result.opening_moves_lan.len()));
        let played = result.white_move_count + result.black_move_count;
        assert_eq!(played as usize, result.played_moves_lan.len());
        if result.outcome == MatchOutcome::DrawMaxPlies {
            assert_eq!(played, 30);
        }
    }

    #[test]
    fn same_seed_replays_the_same_game() {
        let config = MatchConfig {
            max_plies: 20,
            ..MatchConfig::default()
        };
        let first = play_engine_match(&mut RandomEngine::new(3), &mut RandomEngine::new(4), 7, config);
        let second = play_engine_match(&mut RandomEngine::new(3), &mut RandomEngine::new(4), 7, config);
        assert_eq!(first.opening_moves_lan, second.opening_moves_lan);
        assert_eq!(first.played_moves_lan, second.played_moves_lan);
        assert_eq!(first.final_board, second.final_board);
    }

    #[test]
    fn series_tallies_every_game() {
        let stats = play_engine_match_series(
            || Box::new(RandomEngine::new(11)) as Box<dyn Engine>,
            || Box::new(RandomEngine::new(12)) as Box<dyn Engine>,
            MatchSeriesConfig {
                games: 3,
                base_seed: 777,
                per_game: MatchConfig {
                    max_plies: 16,
                    opening_min_plies: 2,
                    opening_max_plies: 4,
                },
            },
        );

        assert_eq!(stats.games, 3);
        assert_eq!(stats.outcomes.len(), 3);
        assert_eq!(stats.player1_wins + stats.player2_wins + stats.draws, 3);
        assert!(stats.overall_avg_move_time_ms >= 0.0);
        assert!(stats.report().starts_with("games=3"));
    }
}
