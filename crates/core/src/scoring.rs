//! Scoring module - line-clear points and score-threshold rules
//!
//! Points come straight from [`LINE_SCORES`]; there is no level multiplier.
//! The special rules key off score boundaries: a rule fires when a single
//! lock moves the score across a multiple of its step, at most once per lock
//! even if several multiples are skipped.

use crate::types::{
    FUNNY_PIECE_SCORE_STEP, GIFT_LINES, LINE_SCORES, SOFT_PAUSE_DENOMINATOR,
    SOFT_PAUSE_NUMERATOR, SOFT_PAUSE_SCORE_STEP,
};

/// Score calculation result for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    pub score_before: u32,
    pub score_after: u32,
    /// Score crossed a multiple of 1000.
    pub soft_pause: bool,
    /// Score crossed a multiple of 3000.
    pub funny_piece: bool,
    /// Exactly two lines were cleared.
    pub gift: bool,
}

/// Points for clearing `lines` rows in one lock. Anything past 4 scores 0.
pub fn line_clear_points(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Whether `before -> after` crosses a multiple of `step`.
pub fn crossed_threshold(before: u32, after: u32, step: u32) -> bool {
    step != 0 && after / step > before / step
}

pub fn triggers_soft_pause(before: u32, after: u32) -> bool {
    crossed_threshold(before, after, SOFT_PAUSE_SCORE_STEP)
}

pub fn triggers_funny_piece(before: u32, after: u32) -> bool {
    crossed_threshold(before, after, FUNNY_PIECE_SCORE_STEP)
}

pub fn triggers_gift(lines: usize) -> bool {
    lines == GIFT_LINES
}

/// Step interval while a soft pause is active (integer 1.2x).
pub fn slowed_interval_ms(base_ms: u32) -> u32 {
    base_ms.saturating_mul(SOFT_PAUSE_NUMERATOR) / SOFT_PAUSE_DENOMINATOR
}

/// Calculate the full outcome of clearing `lines` at `score_before`.
pub fn calculate_score(lines: usize, score_before: u32) -> ScoreResult {
    let points = line_clear_points(lines);
    let score_after = score_before.saturating_add(points);

    ScoreResult {
        points,
        score_before,
        score_after,
        soft_pause: triggers_soft_pause(score_before, score_after),
        funny_piece: triggers_funny_piece(score_before, score_after),
        gift: triggers_gift(lines),
    }
}
