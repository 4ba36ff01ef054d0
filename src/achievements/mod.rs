//! Achievement (badge) system.
//!
//! Definitions are static. The engine proposes unlocks from a snapshot; the
//! caller records them in the snapshot's id set and the timestamped ledger.

pub mod data;
pub mod types;
pub mod unlocks;

pub use data::{get_achievement_def, get_achievements_by_category, ALL_ACHIEVEMENTS};
pub use types::{AchievementCategory, AchievementDef, AchievementId, Achievements, Criterion};
pub use unlocks::{propose_unlocks, record_unlocks};
