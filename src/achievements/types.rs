//! Achievement (badge) types and the per-user unlock ledger.

use crate::core::UserProgressionState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Achievement categories for organization in the badge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCategory {
    Milestone,
    Streak,
    Level,
    Experience,
}

impl AchievementCategory {
    /// All categories in display order.
    pub const ALL: [AchievementCategory; 4] = [
        AchievementCategory::Milestone,
        AchievementCategory::Streak,
        AchievementCategory::Level,
        AchievementCategory::Experience,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AchievementCategory::Milestone => "Milestones",
            AchievementCategory::Streak => "Streaks",
            AchievementCategory::Level => "Levels",
            AchievementCategory::Experience => "Experience",
        }
    }
}

/// Unique identifier for each achievement.
///
/// Serialized as the snake_case string stored in
/// `UserProgressionState::unlocked_achievement_ids`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstCheckin,
    // Streak milestones
    StreakThree,
    StreakWeek,
    StreakFortnight,
    StreakMonth,
    StreakHundred,
    // Level milestones
    LevelFive,
    LevelTen,
    // XP milestones
    XpThousand,
    XpFiveThousand,
}

impl AchievementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstCheckin => "first_checkin",
            AchievementId::StreakThree => "streak_three",
            AchievementId::StreakWeek => "streak_week",
            AchievementId::StreakFortnight => "streak_fortnight",
            AchievementId::StreakMonth => "streak_month",
            AchievementId::StreakHundred => "streak_hundred",
            AchievementId::LevelFive => "level_five",
            AchievementId::LevelTen => "level_ten",
            AchievementId::XpThousand => "xp_thousand",
            AchievementId::XpFiveThousand => "xp_five_thousand",
        }
    }
}

/// What a user has to reach for an achievement to unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    FirstCheckin,
    StreakDays(u32),
    Level(u32),
    TotalXp(u64),
}

impl Criterion {
    pub fn is_met(&self, state: &UserProgressionState, level: u32) -> bool {
        match *self {
            Criterion::FirstCheckin => state.has_checked_in(),
            Criterion::StreakDays(days) => state.streak_days >= days,
            Criterion::Level(min) => level >= min,
            Criterion::TotalXp(xp) => state.total_xp >= xp,
        }
    }
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub icon: &'static str,
    pub criterion: Criterion,
}

/// Record of an unlocked achievement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub unlocked_at: i64,
}

/// Per-user unlock ledger with timestamps, kept beside the progression state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Achievements {
    pub unlocked: HashMap<AchievementId, UnlockedAchievement>,
}

impl Achievements {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains_key(&id)
    }

    /// Unlock an achievement. Returns true if newly unlocked.
    pub fn unlock(&mut self, id: AchievementId, unlocked_at: i64) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked.insert(id, UnlockedAchievement { unlocked_at });
        true
    }

    pub fn total_count(&self) -> usize {
        use super::data::ALL_ACHIEVEMENTS;
        ALL_ACHIEVEMENTS.len()
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Get unlock percentage (0.0 - 100.0).
    pub fn unlock_percentage(&self) -> f32 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        (self.unlocked_count() as f32 / total as f32) * 100.0
    }

    /// Get count of unlocked/total by category.
    pub fn count_by_category(&self, category: AchievementCategory) -> (usize, usize) {
        use super::data::ALL_ACHIEVEMENTS;

        let in_category: Vec<_> = ALL_ACHIEVEMENTS
            .iter()
            .filter(|a| a.category == category)
            .collect();
        let unlocked = in_category.iter().filter(|a| self.is_unlocked(a.id)).count();

        (unlocked, in_category.len())
    }
}
