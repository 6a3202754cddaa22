//! Engine configuration.
//!
//! One explicitly-owned value threaded into the session; no ambient
//! globals. Defaults match the standard ruleset (10x20 board, 5-piece
//! preview, NES-ish gravity curve).

use crate::core::scoring::LINE_SCORES;
use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// Gravity interval per level in milliseconds, starting at level 1.
/// Levels past the end stay at the final (fastest) entry.
pub const GRAVITY_TABLE_MS: [u32; 15] = [
    800, 720, 630, 550, 470, 380, 300, 220, 130, 100, 90, 80, 70, 60, 50,
];

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    /// Next-queue lookahead length.
    pub lookahead: usize,
    /// Lines required per level step.
    pub lines_per_level: u32,
    /// Line-clear base points by cleared-row count.
    pub line_scores: [u32; 5],
    /// Per-cell score for a soft-drop step.
    pub soft_drop_per_cell: u32,
    /// Per-cell score for a hard drop.
    pub hard_drop_per_cell: u32,
    pub gravity_table_ms: Vec<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            lookahead: 5,
            lines_per_level: 10,
            line_scores: LINE_SCORES,
            soft_drop_per_cell: 1,
            hard_drop_per_cell: 2,
            gravity_table_ms: GRAVITY_TABLE_MS.to_vec(),
        }
    }
}

impl GameConfig {
    /// Gravity interval for a 1-based level.
    pub fn gravity_interval_ms(&self, level: u32) -> u32 {
        if self.gravity_table_ms.is_empty() {
            return GRAVITY_TABLE_MS[0];
        }
        let idx = (level.saturating_sub(1) as usize).min(self.gravity_table_ms.len() - 1);
        self.gravity_table_ms[idx]
    }
}
