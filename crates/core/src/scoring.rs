//! Scoring module - flat line scoring and the score-derived speed policy
//!
//! Every cleared row is worth [`LINE_SCORE`] points with no multi-line or
//! combo bonus. Gravity speeds up in steps of [`SPEED_STEP_SCORE`] points:
//!
//! | Score | Interval |
//! |-------|----------|
//! | 0-499 | 1200ms |
//! | 500-999 | 700ms |
//! | 1000-1499 | 533ms |
//! | 1500-1999 | 450ms |
//! | ... | approaches 200ms |

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_OFFSET_MS, LINE_SCORE, SOFT_DROP_INTERVAL_MS, SPEED_STEP_SCORE,
};

/// Points awarded for clearing `lines` rows in one lock
pub fn calculate_line_score(lines: usize) -> u32 {
    LINE_SCORE.saturating_mul(lines as u32)
}

/// Speed step reached at `score` (0-based)
pub fn calculate_speed_level(score: u32) -> u32 {
    score / SPEED_STEP_SCORE
}

/// Gravity interval for a score, ignoring soft drop
///
/// Monotonically non-increasing in `score`.
pub fn get_drop_interval_ms(score: u32) -> u32 {
    BASE_DROP_MS / (calculate_speed_level(score) + 1) + DROP_INTERVAL_OFFSET_MS
}

/// Gravity interval while the soft drop key is held
pub fn get_soft_drop_interval_ms() -> u32 {
    SOFT_DROP_INTERVAL_MS
}
