//! Game lifecycle states.
//!
//! `Menu → Playing ⇄ Check → Checkmate → Result`, or
//! `Playing → Stalemate → Result`. The controller recomputes the state after
//! every completed move.

use crate::game_state::chess_types::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Check,
    Checkmate,
    Stalemate,
    Result,
}

impl GameState {
    /// States in which the side to move may select and move pieces.
    #[inline]
    pub const fn is_in_play(self) -> bool {
        matches!(self, GameState::Playing | GameState::Check)
    }

    /// Terminal positions waiting for the delayed switch to `Result`.
    #[inline]
    pub const fn is_game_over(self) -> bool {
        matches!(
            self,
            GameState::Checkmate | GameState::Stalemate | GameState::Result
        )
    }
}

/// How a finished game ended. Kept after the switch to `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Checkmate { winner: Side },
    Stalemate,
}

impl GameOutcome {
    #[inline]
    pub const fn winner(self) -> Option<Side> {
        match self {
            GameOutcome::Checkmate { winner } => Some(winner),
            GameOutcome::Stalemate => None,
        }
    }

    /// PGN result token.
    pub const fn result_token(self) -> &'static str {
        match self {
            GameOutcome::Checkmate { winner: Side::White } => "1-0",
            GameOutcome::Checkmate { winner: Side::Black } => "0-1",
            GameOutcome::Stalemate => "1/2-1/2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GameOutcome, GameState};
    use crate::game_state::chess_types::Side;

    #[test]
    fn only_playing_and_check_accept_moves() {
        assert!(GameState::Playing.is_in_play());
        assert!(GameState::Check.is_in_play());
        assert!(!GameState::Menu.is_in_play());
        assert!(!GameState::Stalemate.is_in_play());
        assert!(GameState::Result.is_game_over());
        assert_eq!(GameState::default(), GameState::Menu);
    }

    #[test]
    fn outcome_names_the_winner() {
        let mate = GameOutcome::Checkmate { winner: Side::Black };
        assert_eq!(mate.winner(), Some(Side::Black));
        assert_eq!(mate.result_token(), "0-1");
        assert_eq!(GameOutcome::Stalemate.winner(), None);
    }
}
