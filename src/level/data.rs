//! Default XP threshold table.

use super::types::{LevelDef, LevelTable};
use crate::core::constants::LEVEL_THRESHOLDS;

/// Title shown next to each level, index 0 = level 1.
const LEVEL_TITLES: [&str; 11] = [
    "Seedling",
    "Sprout",
    "Sapling",
    "Blossom",
    "Grove Keeper",
    "Steady Oak",
    "Mindful Willow",
    "Evergreen",
    "Mountain Calm",
    "Serene Summit",
    "Inner Sky",
];

impl Default for LevelTable {
    fn default() -> Self {
        let levels = LEVEL_THRESHOLDS
            .iter()
            .zip(LEVEL_TITLES.iter())
            .map(|(&xp_required, &title)| LevelDef {
                xp_required,
                title: title.to_string(),
            })
            .collect();
        Self { levels }
    }
}
