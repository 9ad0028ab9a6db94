//! Read-only view of engine state handed to adapters between tics.

use arrayvec::ArrayVec;

use crate::image::Matrix;
use crate::pieces::Tetromino;
use crate::scoring::ScoreMessage;
use crate::types::{Phase, PieceKind, MESSAGE_LOG_CAPACITY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub matrix: Matrix,
    /// Falling piece; only present during play.
    pub active: Option<Tetromino>,
    pub ghost: Option<Tetromino>,
    pub next: Option<PieceKind>,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub back_to_back: u32,
    /// Most recent first.
    pub messages: ArrayVec<ScoreMessage, MESSAGE_LOG_CAPACITY>,
    pub phase: Phase,
    pub frame: i64,
    pub alive: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            matrix: Matrix::new(),
            active: None,
            ghost: None,
            next: None,
            held: None,
            can_hold: true,
            score: 0,
            level: 1,
            lines: 0,
            back_to_back: 0,
            messages: ArrayVec::new(),
            phase: Phase::Welcome,
            frame: 0,
            alive: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameState;

    #[test]
    fn test_default_is_welcome_screen() {
        let snapshot = GameSnapshot::default();
        assert_eq!(snapshot.phase, Phase::Welcome);
        assert!(snapshot.active.is_none());
        assert!(snapshot.next.is_none());
        assert_eq!(snapshot, GameState::new(0).snapshot());
    }

    #[test]
    fn test_snapshot_into_overwrites_previous_frame() {
        let mut game = GameState::new(1);
        game.new_game(2);
        let mut snapshot = GameSnapshot::default();
        snapshot.score = 77;
        game.snapshot_into(&mut snapshot);
        assert_eq!(snapshot.phase, Phase::Play);
        assert_eq!(snapshot.level, 2);
        assert_eq!(snapshot.score, 0);
        assert!(snapshot.next.is_some());
        assert_eq!(snapshot, game.snapshot());
    }
}
