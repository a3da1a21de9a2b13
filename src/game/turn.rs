//! Turn phases and delayed work.

use std::time::{Duration, Instant};

use crate::game_state::chess_types::Square;
use crate::moves::move_descriptions::Move;

/// Where the side to move is within its turn.
///
/// `AwaitingPromotion` is the first half of a two-phase commit: the pawn has
/// reached the last rank but the side to move has not switched, nothing is
/// recorded and check is not recomputed until a piece is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TurnPhase {
    #[default]
    AwaitingMove,
    PieceSelected {
        square: Square,
        legal_moves: Vec<Move>,
    },
    AwaitingPromotion {
        square: Square,
        pending_move: Move,
    },
}

impl TurnPhase {
    pub fn selected_square(&self) -> Option<Square> {
        match self {
            TurnPhase::PieceSelected { square, .. } => Some(*square),
            _ => None,
        }
    }

    pub fn legal_moves(&self) -> &[Move] {
        match self {
            TurnPhase::PieceSelected { legal_moves, .. } => legal_moves.as_slice(),
            _ => &[],
        }
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        match self {
            TurnPhase::AwaitingPromotion { square, .. } => Some(*square),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledKind {
    /// The automated side plays its move.
    EngineMove,
    /// A finished game moves on to the result screen.
    ShowResult,
}

/// A cancellable callback due at a fixed instant. Only one is ever pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub kind: ScheduledKind,
    pub due: Instant,
}

impl ScheduledTask {
    pub fn after(kind: ScheduledKind, now: Instant, delay: Duration) -> Self {
        Self {
            kind,
            due: now + delay,
        }
    }

    #[inline]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{ScheduledKind, ScheduledTask, TurnPhase};

    #[test]
    fn task_becomes_due_after_its_delay() {
        let now = Instant::now();
        let task = ScheduledTask::after(ScheduledKind::EngineMove, now, Duration::from_millis(500));
        assert!(!task.is_due(now));
        assert!(task.is_due(now + Duration::from_millis(500)));
    }

    #[test]
    fn idle_phase_has_no_selection() {
        let phase = TurnPhase::default();
        assert!(phase.selected_square().is_none());
        assert!(phase.legal_moves().is_empty());
        assert!(phase.pending_promotion().is_none());
    }
}
