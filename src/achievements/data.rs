//! Static achievement definitions.

use super::types::{AchievementCategory, AchievementDef, AchievementId, Criterion};

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // ═══════════════════════════════════════════════════════════════
    // MILESTONES
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::FirstCheckin,
        name: "First Step",
        description: "Complete your first check-in",
        category: AchievementCategory::Milestone,
        icon: "🌱",
        criterion: Criterion::FirstCheckin,
    },
    // ═══════════════════════════════════════════════════════════════
    // STREAKS
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::StreakThree,
        name: "Warming Up",
        description: "Check in 3 days in a row",
        category: AchievementCategory::Streak,
        icon: "🔥",
        criterion: Criterion::StreakDays(3),
    },
    AchievementDef {
        id: AchievementId::StreakWeek,
        name: "Week Strong",
        description: "Check in 7 days in a row",
        category: AchievementCategory::Streak,
        icon: "🔥",
        criterion: Criterion::StreakDays(7),
    },
    AchievementDef {
        id: AchievementId::StreakFortnight,
        name: "Fortnight Focus",
        description: "Check in 14 days in a row",
        category: AchievementCategory::Streak,
        icon: "💪",
        criterion: Criterion::StreakDays(14),
    },
    AchievementDef {
        id: AchievementId::StreakMonth,
        name: "Month of Mindfulness",
        description: "Check in 30 days in a row",
        category: AchievementCategory::Streak,
        icon: "🏅",
        criterion: Criterion::StreakDays(30),
    },
    AchievementDef {
        id: AchievementId::StreakHundred,
        name: "Centurion of Care",
        description: "Check in 100 days in a row",
        category: AchievementCategory::Streak,
        icon: "👑",
        criterion: Criterion::StreakDays(100),
    },
    // ═══════════════════════════════════════════════════════════════
    // LEVELS
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::LevelFive,
        name: "Growing Roots",
        description: "Reach level 5",
        category: AchievementCategory::Level,
        icon: "🌳",
        criterion: Criterion::Level(5),
    },
    AchievementDef {
        id: AchievementId::LevelTen,
        name: "Deep Roots",
        description: "Reach level 10",
        category: AchievementCategory::Level,
        icon: "🏔️",
        criterion: Criterion::Level(10),
    },
    // ═══════════════════════════════════════════════════════════════
    // EXPERIENCE
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::XpThousand,
        name: "Thousand Moments",
        description: "Earn 1,000 XP",
        category: AchievementCategory::Experience,
        icon: "✨",
        criterion: Criterion::TotalXp(1000),
    },
    AchievementDef {
        id: AchievementId::XpFiveThousand,
        name: "Radiant",
        description: "Earn 5,000 XP",
        category: AchievementCategory::Experience,
        icon: "🌟",
        criterion: Criterion::TotalXp(5000),
    },
];

/// Get achievement definition by ID.
pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Get all achievements in a category.
pub fn get_achievements_by_category(category: AchievementCategory) -> Vec<&'static AchievementDef> {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|a| a.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_has_exactly_one_def() {
        let ids = [
            AchievementId::FirstCheckin,
            AchievementId::StreakThree,
            AchievementId::StreakWeek,
            AchievementId::StreakFortnight,
            AchievementId::StreakMonth,
            AchievementId::StreakHundred,
            AchievementId::LevelFive,
            AchievementId::LevelTen,
            AchievementId::XpThousand,
            AchievementId::XpFiveThousand,
        ];
        for id in ids {
            let count = ALL_ACHIEVEMENTS.iter().filter(|a| a.id == id).count();
            assert_eq!(count, 1, "{:?} should be defined once", id);
        }
        assert_eq!(ALL_ACHIEVEMENTS.len(), ids.len());
    }

    #[test]
    fn test_get_achievement_def() {
        let def = get_achievement_def(AchievementId::StreakWeek).unwrap();
        assert_eq!(def.name, "Week Strong");
        assert_eq!(def.criterion, Criterion::StreakDays(7));
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in AchievementCategory::ALL {
            assert!(!get_achievements_by_category(category).is_empty());
        }
    }
}
