//! Scoring module - points, levels and fall speed
//!
//! - Line clears pay `LINE_SCORES[rows] * level`
//! - Hard drops pay 2 points per row travelled, on top of any clear
//! - Level is `total_lines / 10 + 1` and never goes down
//! - Fall interval shrinks by 100ms per level down to a 100ms floor

use crate::types::{
    BASE_FALL_MS, FALL_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_SCORES,
    MIN_FALL_MS,
};

/// Points for clearing `rows` rows in one lock at `level`
pub fn line_clear_score(rows: usize, level: u32) -> u32 {
    let base = LINE_SCORES[rows.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level)
}

/// Hard drop bonus for `rows` rows travelled
pub fn hard_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level reached after `total_lines` cleared lines
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Milliseconds between automatic drops at `level`
pub fn fall_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(FALL_STEP_MS);
    BASE_FALL_MS.saturating_sub(reduction).max(MIN_FALL_MS)
}
