//! Scoring module - line-clear awards, back-to-back streaks and leveling
//!
//! Awards are keyed by how the piece got into place (plain move, mini T-spin or
//! T-spin) and how many rows the lock cleared:
//!
//! | kind | 0 | 1 | 2 | 3 | 4 |
//! |------|---|---|---|---|---|
//! | normal | - | 100 | 300 | 500 | 800 |
//! | mini T-spin | 100 | 200 | - | - | - |
//! | T-spin | 400 | 800 | 1200 | 1600 | - |
//!
//! Points are multiplied by the level, then a 3/2 back-to-back bonus applies when
//! a difficult clear extends an already running streak.

use std::fmt;

use crate::types::{Micros, TSpinKind, MAX_LEVEL, SOFT_FALL_DIVISOR};

/// How a clear affects the back-to-back streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakEffect {
    Keep,
    Reset,
    Extend,
}

/// Table entry for one (move kind, rows cleared) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearAward {
    pub label: &'static str,
    pub base_points: u32,
    pub streak: StreakEffect,
}

const fn award(label: &'static str, base_points: u32, streak: StreakEffect) -> Option<ClearAward> {
    Some(ClearAward {
        label,
        base_points,
        streak,
    })
}

/// Look up the award for clearing `rows` rows after a move classified as `tspin`.
///
/// Returns `None` for a plain lock that cleared nothing. Combinations that the
/// rules define as impossible (a four-row T-spin, a mini T-spin double or more)
/// mean the classification logic is broken, so they panic.
pub fn clear_award(tspin: TSpinKind, rows: usize) -> Option<ClearAward> {
    use StreakEffect::*;
    match (tspin, rows) {
        (TSpinKind::None, 0) => None,
        (TSpinKind::None, 1) => award("Single", 100, Reset),
        (TSpinKind::None, 2) => award("Double", 300, Reset),
        (TSpinKind::None, 3) => award("Triple", 500, Reset),
        (TSpinKind::None, 4) => award("Tetris", 800, Extend),
        (TSpinKind::Mini, 0) => award("Mini T-Spin", 100, Keep),
        (TSpinKind::Mini, 1) => award("Mini T-Spin Single", 200, Extend),
        (TSpinKind::Full, 0) => award("T-Spin", 400, Keep),
        (TSpinKind::Full, 1) => award("T-Spin Single", 800, Extend),
        (TSpinKind::Full, 2) => award("T-Spin Double", 1200, Extend),
        (TSpinKind::Full, 3) => award("T-Spin Triple", 1600, Extend),
        (kind, rows) => panic!("impossible line clear: {kind:?} with {rows} rows"),
    }
}

/// A line in the recent-messages log, e.g. `Tetris B2B 1200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreMessage {
    pub label: &'static str,
    pub back_to_back: bool,
    pub points: u32,
}

impl fmt::Display for ScoreMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)?;
        if self.back_to_back {
            f.write_str(" B2B")?;
        }
        write!(f, " {}", self.points)
    }
}

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points to add, level multiplier and back-to-back bonus included.
    pub points: u32,
    /// Streak counter after this clear.
    pub back_to_back: u32,
    /// Whether the 3/2 back-to-back bonus was applied.
    pub b2b_applied: bool,
    /// Log line, present whenever `points > 0`.
    pub message: Option<ScoreMessage>,
}

/// Calculate the outcome of a lock that cleared `rows` rows.
///
/// `back_to_back` is the streak before this clear.
pub fn calculate_score(
    tspin: TSpinKind,
    rows: usize,
    level: u32,
    back_to_back: u32,
) -> ScoreResult {
    let Some(award) = clear_award(tspin, rows) else {
        return ScoreResult {
            back_to_back,
            ..ScoreResult::default()
        };
    };

    let streak = match award.streak {
        StreakEffect::Keep => back_to_back,
        StreakEffect::Reset => 0,
        StreakEffect::Extend => back_to_back.saturating_add(1),
    };

    let mut points = award.base_points.saturating_mul(level);
    let b2b_applied = streak > back_to_back && back_to_back >= 1;
    if b2b_applied {
        points = points.saturating_add(points / 2);
    }

    ScoreResult {
        points,
        back_to_back: streak,
        b2b_applied,
        message: (points > 0).then_some(ScoreMessage {
            label: award.label,
            back_to_back: b2b_applied,
            points,
        }),
    }
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(2)
    } else {
        cells
    }
}

/// Level reached after clearing `total_lines` lines.
///
/// One level per ten lines starting from 1, capped at [`MAX_LEVEL`] and never
/// below `start_level`.
pub fn calculate_level(total_lines: u32, start_level: u32) -> u32 {
    (1 + total_lines / 10).min(MAX_LEVEL).max(start_level)
}

/// Gravity interval at `level`, as `(normal, short)` in microseconds
///
/// `normal = 1s * (0.8 - (level - 1) * 0.0007) ^ (level - 1)` and `short` is the
/// soft-drop interval, 20x faster.
pub fn fall_periods(level: u32) -> (Micros, Micros) {
    let steps = level.saturating_sub(1) as i32;
    let normal = (1e6 * (0.8 - steps as f64 * 0.0007).powi(steps)) as Micros;
    (normal, normal / SOFT_FALL_DIVISOR)
}
