use serde::{Deserialize, Serialize};

/// One row of the level table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    /// Cumulative XP at which this level starts.
    pub xp_required: u64,
    pub title: String,
}

/// Ascending XP thresholds, row 0 = level 1 (starts at 0 XP).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    pub levels: Vec<LevelDef>,
}

/// Level facts derived from a cumulative XP total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelInfo {
    pub level: u32,
    pub current_xp_in_level: u64,
    /// Width of the current level. At the last level this is the sentinel
    /// `MAX_LEVEL_XP_SENTINEL`.
    pub xp_to_next_level: u64,
    /// 0..=100
    pub progress_percent: u8,
    pub title: String,
    pub is_max_level: bool,
}
