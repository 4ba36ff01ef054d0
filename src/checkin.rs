//! Check-in planning and XP awards.
//!
//! Planning functions never mutate the snapshot. They return an outcome the
//! caller persists (`apply_to`) once the user action is confirmed.

use crate::achievements::{propose_unlocks, AchievementId};
use crate::core::constants::*;
use crate::core::UserProgressionState;
use crate::error::{ProgressionError, Result};
use crate::level::LevelTable;
use crate::streak::checkin_day_gap;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User actions that earn XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpAction {
    DailyCheckin,
    ChatSession,
    BreathingExercise,
    JournalEntry,
}

impl XpAction {
    pub fn base_xp(&self) -> u64 {
        match self {
            XpAction::DailyCheckin => XP_DAILY_CHECKIN,
            XpAction::ChatSession => XP_CHAT_SESSION,
            XpAction::BreathingExercise => XP_BREATHING_EXERCISE,
            XpAction::JournalEntry => XP_JOURNAL_ENTRY,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            XpAction::DailyCheckin => "daily_checkin",
            XpAction::ChatSession => "chat_session",
            XpAction::BreathingExercise => "breathing_exercise",
            XpAction::JournalEntry => "journal_entry",
        }
    }
}

impl FromStr for XpAction {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "daily_checkin" | "checkin" => Ok(XpAction::DailyCheckin),
            "chat_session" | "chat" => Ok(XpAction::ChatSession),
            "breathing_exercise" | "breathing" => Ok(XpAction::BreathingExercise),
            "journal_entry" | "journal" => Ok(XpAction::JournalEntry),
            other => Err(ProgressionError::invalid_input(format!("unknown XP action {}", other))),
        }
    }
}

/// Bonus XP on a check-in: 5 per streak day, capped at 50.
pub fn streak_bonus(streak_days: u32) -> u64 {
    (streak_days as u64 * STREAK_BONUS_PER_DAY).min(MAX_STREAK_BONUS)
}

/// Proposed result of a check-in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckinOutcome {
    /// The user already checked in on this local day; nothing is awarded.
    pub already_checked_in: bool,
    pub previous_streak: u32,
    pub new_streak_days: u32,
    /// A streak of one or more days was reset by this check-in.
    pub streak_broken: bool,
    pub xp_awarded: u64,
    pub new_total_xp: u64,
    pub level_before: u32,
    pub level_after: u32,
    pub checked_in_at: DateTime<Utc>,
    pub proposed_achievements: Vec<AchievementId>,
}

impl CheckinOutcome {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }

    /// Writes the outcome into a snapshot. For the storage collaborator.
    pub fn apply_to(&self, state: &mut UserProgressionState) {
        state.total_xp = self.new_total_xp;
        state.streak_days = self.new_streak_days;
        if !self.already_checked_in {
            state.last_checkin_at = Some(self.checked_in_at);
        }
        for id in &self.proposed_achievements {
            state.unlocked_achievement_ids.insert(id.as_str().to_string());
        }
    }
}

/// Proposed result of a non-check-in XP award.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardOutcome {
    pub action: XpAction,
    pub xp_awarded: u64,
    pub new_total_xp: u64,
    pub level_before: u32,
    pub level_after: u32,
    pub proposed_achievements: Vec<AchievementId>,
}

impl AwardOutcome {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }

    pub fn apply_to(&self, state: &mut UserProgressionState) {
        state.total_xp = self.new_total_xp;
        for id in &self.proposed_achievements {
            state.unlocked_achievement_ids.insert(id.as_str().to_string());
        }
    }
}

/// Plans a check-in at `now`. Streaks count local calendar days in `offset`:
/// same day keeps the streak, the next day extends it, any gap restarts at 1.
pub fn plan_checkin(
    state: &UserProgressionState,
    now: DateTime<Utc>,
    offset: FixedOffset,
    levels: &LevelTable,
) -> Result<CheckinOutcome> {
    let previous_streak = state.streak_days;
    let day_gap = checkin_day_gap(now, state.last_checkin_at, offset)?;

    let (already_checked_in, new_streak_days) = match day_gap {
        Some(0) => (true, previous_streak.max(1)),
        Some(1) => (false, previous_streak.saturating_add(1)),
        _ => (false, 1),
    };
    let streak_broken = !already_checked_in && new_streak_days == 1 && previous_streak > 0;

    let xp_awarded = if already_checked_in {
        0
    } else {
        XpAction::DailyCheckin.base_xp() + streak_bonus(new_streak_days)
    };
    let new_total_xp = state.total_xp.saturating_add(xp_awarded);
    let level_before = levels.level_for_xp(state.total_xp).level;
    let level_after = levels.level_for_xp(new_total_xp).level;

    let mut projected = state.clone();
    projected.total_xp = new_total_xp;
    projected.streak_days = new_streak_days;
    if !already_checked_in {
        projected.last_checkin_at = Some(now);
    }
    let proposed_achievements = propose_unlocks(&projected, level_after);

    Ok(CheckinOutcome {
        already_checked_in,
        previous_streak,
        new_streak_days,
        streak_broken,
        xp_awarded,
        new_total_xp,
        level_before,
        level_after,
        checked_in_at: now,
        proposed_achievements,
    })
}

/// Plans an XP award for a non-check-in action.
pub fn plan_award(
    state: &UserProgressionState,
    action: XpAction,
    levels: &LevelTable,
) -> Result<AwardOutcome> {
    if action == XpAction::DailyCheckin {
        return Err(ProgressionError::invalid_input(
            "daily check-ins are planned with plan_checkin",
        ));
    }
    let xp_awarded = action.base_xp();
    let new_total_xp = state.total_xp.saturating_add(xp_awarded);
    let level_before = levels.level_for_xp(state.total_xp).level;
    let level_after = levels.level_for_xp(new_total_xp).level;

    let mut projected = state.clone();
    projected.total_xp = new_total_xp;

    Ok(AwardOutcome {
        action,
        xp_awarded,
        new_total_xp,
        level_before,
        level_after,
        proposed_achievements: propose_unlocks(&projected, level_after),
    })
}
