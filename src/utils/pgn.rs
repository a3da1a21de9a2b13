//! PGN export of a finished or ongoing game.
//!
//! Movetext uses coordinate notation (`e2e4`, `e7e8q`) with `+`/`#` suffixes,
//! which keeps the export independent of SAN disambiguation.

use std::collections::BTreeMap;

use crate::game::game_record::GameRecord;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Side;
use crate::game_state::game_state::GameOutcome;
use crate::utils::fen_generator::generate_fen_with_fullmove;
use crate::utils::long_algebraic::move_to_long_algebraic;

/// Standard seven-tag roster plus `SetUp`/`FEN` for non-standard starts.
pub fn pgn_headers(
    record: &GameRecord,
    initial_board: &Board,
    initial_side: Side,
    outcome: Option<GameOutcome>,
) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Casual Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert(
        "Date".to_owned(),
        record.started_at().format("%Y.%m.%d").to_string(),
    );
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert(
        "Result".to_owned(),
        outcome.map_or("*", GameOutcome::result_token).to_owned(),
    );

    let initial_fen = generate_fen_with_fullmove(initial_board, initial_side, record.fullmove_number_at(0));
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    headers
}

pub fn write_pgn(
    record: &GameRecord,
    initial_board: &Board,
    initial_side: Side,
    outcome: Option<GameOutcome>,
) -> String {
    let headers = pgn_headers(record, initial_board, initial_side, outcome);
    write_pgn_with_headers(record, &headers)
}

pub fn write_pgn_with_headers(record: &GameRecord, headers: &BTreeMap<String, String>) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let moves = record.moves();
    let mut movetext_parts = Vec::<String>::with_capacity(moves.len() + 1);
    for (index, recorded) in moves.iter().enumerate() {
        let mut text = move_to_long_algebraic(&recorded.mv, recorded.promotion);
        if recorded.gives_check {
            let mated = index + 1 == moves.len()
                && headers.get("Result").is_some_and(|r| r == "1-0" || r == "0-1");
            text.push(if mated { '#' } else { '+' });
        }

        match recorded.side {
            Side::White => {
                movetext_parts.push(format!("{}. {}", record.fullmove_number_at(index), text));
            }
            Side::Black if index == 0 => {
                movetext_parts.push(format!("{}... {}", record.fullmove_number_at(index), text));
            }
            Side::Black => movetext_parts.push(text),
        }
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::write_pgn;
    use crate::game::game_record::GameRecord;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::Side;
    use crate::game_state::game_state::GameOutcome;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::move_generation::legal_move_checks::is_in_check;
    use crate::utils::long_algebraic::resolve_long_algebraic;

    #[test]
    fn fools_mate_exports_with_date_and_result() {
        let started = Utc
            .with_ymd_and_hms(2024, 3, 9, 12, 0, 0)
            .single()
            .expect("timestamp should be valid");
        let mut record = GameRecord::starting_at(started);
        let mut board = Board::new_game();
        let mut side = Side::White;
        for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let resolved = resolve_long_algebraic(&board, side, text).expect("move should resolve");
            board = apply_move(&board, &resolved.mv);
            side = side.opposite();
            record.push(resolved.mv, None, is_in_check(&board, side));
        }

        let pgn = write_pgn(
            &record,
            &Board::new_game(),
            Side::White,
            Some(GameOutcome::Checkmate { winner: Side::Black }),
        );

        assert!(pgn.contains("[Date \"2024.03.09\"]"));
        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(!pgn.contains("SetUp"));
        assert!(pgn.ends_with("1. f2f3 e7e5 2. g2g4 d8h4# 0-1\n"));
    }

    #[test]
    fn custom_start_adds_fen_header() {
        let (board, side) = crate::utils::fen_parser::parse_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1")
            .expect("FEN should parse");
        let pgn = write_pgn(&GameRecord::new(), &board, side, None);
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains("[FEN \"4k3/8/8/8/8/8/4P3/4K3 b - - 0 1\"]"));
        assert!(pgn.ends_with("\n*\n"));
    }

    #[test]
    fn numbering_continues_from_a_black_start() {
        let (board, side) = crate::utils::fen_parser::parse_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 20")
            .expect("FEN should parse");
        let mut record = GameRecord::from_position(side, 20);
        let mut current = board.clone();
        let mut to_move = side;
        for text in ["e8d7", "e2e4"] {
            let resolved = resolve_long_algebraic(&current, to_move, text).expect("move should resolve");
            current = apply_move(&current, &resolved.mv);
            to_move = to_move.opposite();
            record.push(resolved.mv, None, false);
        }

        let pgn = write_pgn(&record, &board, side, None);
        assert!(pgn.contains("[FEN \"4k3/8/8/8/8/8/4P3/4K3 b - - 0 20\"]"));
        assert!(pgn.ends_with("20... e8d7 21. e2e4 *\n"));
    }
}
