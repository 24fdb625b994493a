//! Scoring and progression rules
//!
//! - Line clears score from a fixed table, independent of level.
//! - Level is `1 + lines / 10`.
//! - The fall interval shrinks by 50ms per level from 500ms, floored at 80ms.

use std::time::Duration;

use crate::types::{BASE_FALL_MS, FALL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES, MIN_FALL_MS};

/// Points for clearing `cleared` rows with one lock.
///
/// Counts outside 1-4 score `100 * cleared`.
pub fn line_clear_score(cleared: u32) -> u32 {
    match cleared {
        0 => 0,
        1..=4 => LINE_SCORES[cleared as usize],
        n => 100u32.saturating_mul(n),
    }
}

/// Level reached after `total_lines` cleared lines (starts at 1)
pub fn level_for_lines(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Fall interval in milliseconds for a level
pub fn fall_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(FALL_STEP_MS);
    BASE_FALL_MS.saturating_sub(reduction).max(MIN_FALL_MS)
}

pub fn fall_interval(level: u32) -> Duration {
    Duration::from_millis(fall_interval_ms(level) as u64)
}
