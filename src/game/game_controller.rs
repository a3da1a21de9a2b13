//! The game state machine.
//!
//! `ChessGame` is the single entry point for a front end. It owns the live
//! board, turn order and the selection workflow, executes moves with all
//! their side effects, recomputes check/checkmate/stalemate after every
//! completed move and drives the automated opponent.
//!
//! Nothing here sleeps. Delayed work (the engine's "thinking" pause and the
//! switch from a finished game to the result screen) is stored as a
//! [`ScheduledTask`] and run by [`ChessGame::poll`] once due.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::engines::engine_minimax::{Difficulty, MinimaxEngine};
use crate::engines::engine_trait::Engine;
use crate::game::events::{EventBus, GameEvent, SubscriptionId};
use crate::game::game_errors::{GameError, GameResult};
use crate::game::game_record::{GameRecord, RecordedMove};
use crate::game::turn::{ScheduledKind, ScheduledTask, TurnPhase};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::{GameOutcome, GameState};
use crate::move_generation::legal_move_apply::{apply_move_in_place, promote_in_place};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_moves_for};
use crate::moves::move_descriptions::Move;
use crate::utils::fen_generator::generate_fen_with_fullmove;
use crate::utils::fen_parser::{parse_fen_position, validate_position};
use crate::utils::notation_errors::NotationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Side played by the engine; `None` for two human players.
    pub automated_side: Option<Side>,
    pub difficulty: Difficulty,
    /// Pause before the engine's move is applied.
    pub engine_delay: Duration,
    /// Pause between checkmate/stalemate and the result screen.
    pub result_delay: Duration,
}

impl GameConfig {
    pub fn two_players() -> Self {
        Self {
            automated_side: None,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            automated_side: Some(Side::Black),
            difficulty: Difficulty::Medium,
            engine_delay: Duration::from_millis(500),
            result_delay: Duration::from_millis(1500),
        }
    }
}

pub struct ChessGame {
    config: GameConfig,
    board: Board,
    side_to_move: Side,
    state: GameState,
    outcome: Option<GameOutcome>,
    phase: TurnPhase,
    record: GameRecord,
    scheduled: Option<ScheduledTask>,
    engine: Box<dyn Engine>,
    events: EventBus,
}

impl ChessGame {
    pub fn new(config: GameConfig) -> Self {
        let engine = Box::new(MinimaxEngine::with_difficulty(config.difficulty));
        Self::with_engine(config, engine)
    }

    pub fn with_engine(config: GameConfig, engine: Box<dyn Engine>) -> Self {
        Self {
            config,
            board: Board::new_game(),
            side_to_move: Side::White,
            state: GameState::Menu,
            outcome: None,
            phase: TurnPhase::AwaitingMove,
            record: GameRecord::new(),
            scheduled: None,
            engine,
            events: EventBus::new(),
        }
    }

    /// Start a new game from the standard position. Any pending task is
    /// cancelled.
    pub fn start_game(&mut self) {
        self.begin(Board::new_game(), Side::White, 1);
    }

    /// Start from a FEN position, keeping its fullmove number. A rejected
    /// FEN leaves the current game untouched.
    pub fn start_from_fen(&mut self, fen: &str) -> NotationResult<()> {
        let position = parse_fen_position(fen)?;
        self.begin(position.board, position.side_to_move, position.fullmove_number);
        Ok(())
    }

    /// Start from an arbitrary board. It must hold one king per side and the
    /// side not to move must not be in check.
    pub fn start_from_position(&mut self, board: Board, side_to_move: Side) -> NotationResult<()> {
        validate_position(&board, side_to_move)?;
        self.begin(board, side_to_move, 1);
        Ok(())
    }

    fn begin(&mut self, board: Board, side_to_move: Side, fullmove_number: u32) {
        self.cancel_scheduled();
        self.board = board;
        self.side_to_move = side_to_move;
        self.phase = TurnPhase::AwaitingMove;
        self.record = GameRecord::from_position(side_to_move, fullmove_number);
        self.outcome = None;
        self.engine.new_game();

        info!(%side_to_move, automated = ?self.config.automated_side, "game started");
        self.events.publish(&GameEvent::BoardUpdated);

        // A custom position may already be decided.
        let next = self.evaluate_position();
        self.enter_state(next, Instant::now());
    }

    pub fn restart_to_menu(&mut self) {
        self.cancel_scheduled();
        self.board = Board::new_game();
        self.side_to_move = Side::White;
        self.phase = TurnPhase::AwaitingMove;
        self.record = GameRecord::new();
        self.outcome = None;

        info!("returned to menu");
        self.set_state(GameState::Menu);
        self.events.publish(&GameEvent::BoardUpdated);
    }

    /// Replace the engine with one of the given strength. Applies from the
    /// engine's next move.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        self.engine = Box::new(MinimaxEngine::with_difficulty(difficulty));
    }

    pub fn try_select(&mut self, square: Square) -> bool {
        match self.select(square) {
            Ok(_) => true,
            Err(err) => {
                debug!(%square, %err, "selection rejected");
                false
            }
        }
    }

    pub fn try_move(&mut self, to: Square) -> bool {
        match self.move_selected_to(to) {
            Ok(()) => true,
            Err(err) => {
                debug!(%to, %err, "move rejected");
                false
            }
        }
    }

    pub fn promote_pawn(&mut self, kind: PieceKind) -> bool {
        match self.promote(kind) {
            Ok(()) => true,
            Err(err) => {
                debug!(?kind, %err, "promotion rejected");
                false
            }
        }
    }

    /// Select the piece on `square` and return its legal moves. A rejected
    /// selection clears any current one.
    pub fn select(&mut self, square: Square) -> GameResult<&[Move]> {
        if let Err(err) = self.check_selection(square) {
            self.clear_selection();
            return Err(err);
        }

        let legal_moves = legal_moves_for(&self.board, square);
        debug!(%square, count = legal_moves.len(), "piece selected");
        self.phase = TurnPhase::PieceSelected {
            square,
            legal_moves,
        };
        Ok(self.phase.legal_moves())
    }

    /// Move the selected piece to `to`. A rejected move clears the selection.
    pub fn move_selected_to(&mut self, to: Square) -> GameResult<()> {
        match self.resolve_selected_move(to) {
            Ok(mv) => {
                self.execute_move(mv, None, Instant::now());
                Ok(())
            }
            Err(err) => {
                self.clear_selection();
                Err(err)
            }
        }
    }

    /// Select `from` and move it to `to` in one call.
    pub fn play(&mut self, from: Square, to: Square) -> GameResult<()> {
        self.select(from)?;
        self.move_selected_to(to)
    }

    /// Finish a turn left waiting on the last rank.
    pub fn promote(&mut self, kind: PieceKind) -> GameResult<()> {
        if !self.state.is_in_play() {
            return Err(GameError::NotInPlay);
        }
        let TurnPhase::AwaitingPromotion {
            square,
            pending_move,
        } = &self.phase
        else {
            return Err(GameError::NoPromotionPending);
        };
        let (square, pending_move) = (*square, *pending_move);
        if !kind.is_promotion_target() {
            return Err(GameError::InvalidPromotionPiece(kind));
        }

        let promoted = promote_in_place(&mut self.board, square, kind);
        assert!(promoted, "board invariant violated: no pawn waiting on {square}");
        self.complete_turn(pending_move, Some(kind), Instant::now());
        Ok(())
    }

    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// Run the pending task if it is due at `now`. Returns whether it ran.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        let Some(task) = self.scheduled else {
            return false;
        };
        if !task.is_due(now) {
            return false;
        }
        self.scheduled = None;

        match task.kind {
            ScheduledKind::EngineMove => self.run_engine_turn(now),
            ScheduledKind::ShowResult => self.set_state(GameState::Result),
        }
        true
    }

    /// True while the automated side's move is pending. Player input is
    /// rejected in this window.
    pub fn is_thinking(&self) -> bool {
        matches!(
            self.scheduled,
            Some(ScheduledTask {
                kind: ScheduledKind::EngineMove,
                ..
            })
        )
    }

    pub fn scheduled_task(&self) -> Option<ScheduledTask> {
        self.scheduled
    }

    pub fn time_until_next_task(&self, now: Instant) -> Option<Duration> {
        self.scheduled
            .map(|task| task.due.saturating_duration_since(now))
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn subscribe_channel(&mut self) -> (SubscriptionId, std::sync::mpsc::Receiver<GameEvent>) {
        self.events.subscribe_channel()
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn selected_square(&self) -> Option<Square> {
        self.phase.selected_square()
    }

    pub fn selected_piece(&self) -> Option<Piece> {
        self.selected_square()
            .and_then(|square| self.board.piece_at(square))
    }

    pub fn legal_moves_for_selection(&self) -> &[Move] {
        self.phase.legal_moves()
    }

    pub fn legal_destinations(&self) -> Vec<Square> {
        self.phase.legal_moves().iter().map(|mv| mv.to).collect()
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        self.phase.pending_promotion()
    }

    pub fn move_count(&self) -> usize {
        self.record.len()
    }

    pub fn last_move(&self) -> Option<&RecordedMove> {
        self.record.last()
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// The checkmating side, i.e. the side not to move at the terminal state.
    pub fn winner(&self) -> Option<Side> {
        self.outcome.and_then(GameOutcome::winner)
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn fen(&self) -> String {
        generate_fen_with_fullmove(&self.board, self.side_to_move, self.record.fullmove_number())
    }

    fn ensure_human_turn(&self) -> GameResult<()> {
        if !self.state.is_in_play() {
            return Err(GameError::NotInPlay);
        }
        if self.is_thinking() {
            return Err(GameError::EngineThinking);
        }
        if self.phase.pending_promotion().is_some() {
            return Err(GameError::PromotionPending);
        }
        if self.config.automated_side == Some(self.side_to_move) {
            return Err(GameError::NotYourTurn(self.side_to_move));
        }
        Ok(())
    }

    fn check_selection(&self, square: Square) -> GameResult<()> {
        self.ensure_human_turn()?;
        match self.board.piece_at(square) {
            None => Err(GameError::EmptySquare(square)),
            Some(piece) if piece.side != self.side_to_move => Err(GameError::EnemyPiece {
                square,
                owner: piece.side,
            }),
            Some(_) => Ok(()),
        }
    }

    fn resolve_selected_move(&self, to: Square) -> GameResult<Move> {
        self.ensure_human_turn()?;
        let TurnPhase::PieceSelected {
            square,
            legal_moves,
        } = &self.phase
        else {
            return Err(GameError::NothingSelected);
        };
        legal_moves
            .iter()
            .find(|mv| mv.to == to)
            .copied()
            .ok_or(GameError::IllegalDestination { from: *square, to })
    }

    fn clear_selection(&mut self) {
        if matches!(self.phase, TurnPhase::PieceSelected { .. }) {
            self.phase = TurnPhase::AwaitingMove;
        }
    }

    /// With `promotion == None` a promoting pawn stops the turn half way.
    fn execute_move(&mut self, mv: Move, promotion: Option<PieceKind>, now: Instant) {
        if mv.is_promotion() && promotion.is_none() {
            apply_move_in_place(&mut self.board, &mv, None);
            self.phase = TurnPhase::AwaitingPromotion {
                square: mv.to,
                pending_move: mv,
            };
            debug!(%mv, "promotion pending");
            self.events.publish(&GameEvent::BoardUpdated);
            self.events.publish(&GameEvent::PromotionRequired {
                square: mv.to,
                side: mv.piece.side,
            });
            return;
        }

        apply_move_in_place(&mut self.board, &mv, promotion);
        let promotion = promotion.filter(|_| mv.is_promotion());
        self.complete_turn(mv, promotion, now);
    }

    fn complete_turn(&mut self, mv: Move, promotion: Option<PieceKind>, now: Instant) {
        let mover = mv.piece.side;
        self.side_to_move = mover.opposite();
        self.phase = TurnPhase::AwaitingMove;

        let gives_check = is_in_check(&self.board, self.side_to_move);
        self.record.push(mv, promotion, gives_check);
        debug!(%mover, %mv, ?promotion, gives_check, "move executed");

        self.events.publish(&GameEvent::MoveExecuted {
            mv,
            side: mover,
            promotion,
        });
        self.events.publish(&GameEvent::BoardUpdated);

        let next = self.evaluate_position();
        self.enter_state(next, now);
    }

    fn evaluate_position(&self) -> GameState {
        let side = self.side_to_move;
        let in_check = is_in_check(&self.board, side);
        let can_move = has_any_legal_move(&self.board, side);
        match (in_check, can_move) {
            (true, false) => GameState::Checkmate,
            (true, true) => GameState::Check,
            (false, false) => GameState::Stalemate,
            (false, true) => GameState::Playing,
        }
    }

    fn enter_state(&mut self, next: GameState, now: Instant) {
        match next {
            GameState::Checkmate => {
                self.outcome = Some(GameOutcome::Checkmate {
                    winner: self.side_to_move.opposite(),
                });
            }
            GameState::Stalemate => self.outcome = Some(GameOutcome::Stalemate),
            _ => {}
        }
        self.set_state(next);

        match next {
            GameState::Checkmate | GameState::Stalemate => {
                self.schedule(ScheduledKind::ShowResult, now);
            }
            GameState::Playing | GameState::Check
                if self.config.automated_side == Some(self.side_to_move) =>
            {
                self.schedule(ScheduledKind::EngineMove, now);
            }
            _ => {}
        }
    }

    fn set_state(&mut self, next: GameState) {
        if self.state == next {
            return;
        }
        let from = self.state;
        self.state = next;
        info!(?from, to = ?next, "game state changed");
        self.events.publish(&GameEvent::StateChanged { from, to: next });
    }

    fn schedule(&mut self, kind: ScheduledKind, now: Instant) {
        if self.scheduled.is_some_and(|task| task.kind == kind) {
            debug!(?kind, "task already scheduled");
            return;
        }
        let delay = match kind {
            ScheduledKind::EngineMove => self.config.engine_delay,
            ScheduledKind::ShowResult => self.config.result_delay,
        };
        debug!(?kind, ?delay, "task scheduled");
        self.scheduled = Some(ScheduledTask::after(kind, now, delay));
    }

    fn cancel_scheduled(&mut self) {
        if let Some(task) = self.scheduled.take() {
            debug!(kind = ?task.kind, "scheduled task cancelled");
        }
    }

    /// The engine always promotes to a queen.
    fn run_engine_turn(&mut self, now: Instant) {
        let side = self.side_to_move;
        if !self.state.is_in_play() || self.config.automated_side != Some(side) {
            debug!(%side, "stale engine turn dropped");
            return;
        }

        match self.engine.choose_move(&self.board, side) {
            Some(mv) => self.execute_move(mv, Some(PieceKind::Queen), now),
            None => debug!(%side, "engine found no legal move"),
        }
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
