//! The automated opponent and search, seen from outside the crate.

use plum_chess_casual::engines::engine_minimax::Difficulty;
use plum_chess_casual::game::game_controller::{ChessGame, GameConfig};
use plum_chess_casual::game::game_errors::GameError;
use plum_chess_casual::game_state::board::Board;
use plum_chess_casual::game_state::chess_types::{Side, Square};
use plum_chess_casual::game_state::game_state::GameState;
use plum_chess_casual::move_generation::legal_move_generator::all_legal_moves;
use plum_chess_casual::search::minimax::best_move;
use plum_chess_casual::utils::algebraic::algebraic_to_square;
use plum_chess_casual::utils::fen_parser::parse_fen;

fn sq(text: &str) -> Square {
    algebraic_to_square(text).expect("test square should parse")
}

fn shallow_vs_human() -> ChessGame {
    ChessGame::new(GameConfig {
        difficulty: Difficulty::Shallow,
        ..GameConfig::default()
    })
}

#[test]
fn search_is_deterministic() {
    let (board, side) = parse_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
        .expect("FEN should parse");
    let first = best_move(&board, side, 3);
    let second = best_move(&board, side, 3);
    assert!(first.is_some());
    assert_eq!(first, second);

    let legal = all_legal_moves(&board, side);
    assert!(legal.contains(&first.expect("a move should be found")));
}

#[test]
fn engine_replies_identically_in_identical_games() {
    let mut replies = Vec::new();
    for _ in 0..2 {
        let mut game = shallow_vs_human();
        game.start_game();
        game.play(sq("e2"), sq("e4")).expect("e2e4 should be accepted");

        assert!(game.is_thinking());
        assert_eq!(game.select(sq("d2")).err(), Some(GameError::EngineThinking));

        let task = game.scheduled_task().expect("engine move should be scheduled");
        assert!(game.poll_at(task.due));
        assert!(!game.is_thinking());
        assert_eq!(game.side_to_move(), Side::White);
        assert_eq!(game.state(), GameState::Playing);

        let reply = game.last_move().expect("engine should have moved");
        assert_eq!(reply.side, Side::Black);
        replies.push(reply.mv);
    }
    assert_eq!(replies[0], replies[1]);
}

#[test]
fn engine_takes_a_hanging_queen() {
    let mut game = shallow_vs_human();
    game.start_from_fen("rnb1kbnr/pppp1ppp/8/4p2Q/4P3/8/PPPP1PPP/RNB1KBNR w KQkq - 0 1")
        .expect("FEN should parse");
    // Qxf7+ is undefended, so the king should take it.
    game.play(sq("h5"), sq("f7")).expect("Qxf7+ should be accepted");
    assert_eq!(game.state(), GameState::Check);

    let task = game.scheduled_task().expect("engine move should be scheduled");
    assert!(game.poll_at(task.due));
    let reply = game.last_move().expect("engine should have moved");
    assert_eq!(reply.mv.to, sq("f7"));
    assert_eq!(reply.mv.from, sq("e8"));
}

#[test]
fn human_cannot_move_for_the_engine() {
    let mut game = ChessGame::new(GameConfig {
        automated_side: Some(Side::White),
        difficulty: Difficulty::Shallow,
        ..GameConfig::default()
    });
    game.start_game();
    assert!(game.is_thinking());
    assert_eq!(game.select(sq("e2")).err(), Some(GameError::EngineThinking));

    game.restart_to_menu();
    assert_eq!(game.state(), GameState::Menu);
    assert!(game.scheduled_task().is_none());
    assert_eq!(game.board(), &Board::new_game());
}
