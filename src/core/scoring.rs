//! Scoring and leveling rules.
//!
//! Line clears award a fixed per-count base multiplied by the current
//! level; soft and hard drops award a flat per-cell bonus at the moment of
//! the drop, independent of any clear that follows.

/// Base points indexed by cleared-row count (index 0 unused).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points for clearing `lines` rows at `level`.
pub fn line_clear_score(table: &[u32; 5], lines: u32, level: u32) -> u32 {
    match table.get(lines as usize) {
        Some(base) => base * level,
        None => 0,
    }
}

/// Per-cell reward for vertical travel during a drop.
pub fn drop_score(cells: u32, per_cell: u32) -> u32 {
    cells * per_cell
}

/// Level for a running line total; starts at 1 and steps every threshold.
pub fn level_for_lines(total_lines: u32, lines_per_level: u32) -> u32 {
    1 + total_lines / lines_per_level.max(1)
}
