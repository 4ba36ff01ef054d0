//! Unlock proposals. The engine proposes; the storage layer persists.

use super::data::ALL_ACHIEVEMENTS;
use super::types::{AchievementId, Achievements};
use crate::core::UserProgressionState;

/// Achievements whose criterion now holds and that the user does not have yet,
/// in catalogue order.
pub fn propose_unlocks(state: &UserProgressionState, level: u32) -> Vec<AchievementId> {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|def| !state.has_achievement(def.id.as_str()))
        .filter(|def| def.criterion.is_met(state, level))
        .map(|def| def.id)
        .collect()
}

/// Records accepted proposals in both the snapshot's id set and the ledger.
/// Returns the ids that were new to the ledger.
pub fn record_unlocks(
    state: &mut UserProgressionState,
    ledger: &mut Achievements,
    ids: &[AchievementId],
    unlocked_at: i64,
) -> Vec<AchievementId> {
    let mut newly = Vec::new();
    for &id in ids {
        state.unlocked_achievement_ids.insert(id.as_str().to_string());
        if ledger.unlock(id, unlocked_at) {
            newly.push(id);
        }
    }
    newly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterId;
    use chrono::Utc;

    #[test]
    fn test_new_user_has_nothing_to_unlock() {
        let state = UserProgressionState::new("u", CharacterId::Luna);
        assert!(propose_unlocks(&state, 1).is_empty());
    }

    #[test]
    fn test_first_checkin_and_streak_proposals() {
        let mut state = UserProgressionState::new("u", CharacterId::Luna);
        state.last_checkin_at = Some(Utc::now());
        state.streak_days = 7;

        let proposed = propose_unlocks(&state, 1);
        assert_eq!(
            proposed,
            vec![
                AchievementId::FirstCheckin,
                AchievementId::StreakThree,
                AchievementId::StreakWeek
            ]
        );
    }

    #[test]
    fn test_already_unlocked_are_skipped() {
        let mut state = UserProgressionState::new("u", CharacterId::Luna);
        state.last_checkin_at = Some(Utc::now());
        state.streak_days = 3;
        state
            .unlocked_achievement_ids
            .insert("first_checkin".to_string());

        assert_eq!(propose_unlocks(&state, 1), vec![AchievementId::StreakThree]);
    }

    #[test]
    fn test_level_and_xp_proposals() {
        let mut state = UserProgressionState::new("u", CharacterId::Luna);
        state.total_xp = 1000;
        let proposed = propose_unlocks(&state, 6);
        assert!(proposed.contains(&AchievementId::LevelFive));
        assert!(proposed.contains(&AchievementId::XpThousand));
        assert!(!proposed.contains(&AchievementId::LevelTen));
    }

    #[test]
    fn test_record_unlocks_updates_state_and_ledger() {
        let mut state = UserProgressionState::new("u", CharacterId::Luna);
        let mut ledger = Achievements::default();
        ledger.unlock(AchievementId::FirstCheckin, 10);

        let newly = record_unlocks(
            &mut state,
            &mut ledger,
            &[AchievementId::FirstCheckin, AchievementId::StreakThree],
            20,
        );

        assert_eq!(newly, vec![AchievementId::StreakThree]);
        assert!(state.has_achievement("first_checkin"));
        assert!(state.has_achievement("streak_three"));
        assert!(ledger.is_unlocked(AchievementId::StreakThree));
    }
}
