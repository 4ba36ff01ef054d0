//! Progression engine facade.
//!
//! Owns the validated policy tables and evaluates a snapshot at an instant.
//! Evaluation is referentially transparent: the same snapshot, instant and
//! tables always give the same result (apart from message text under
//! `MessageSelection::Random`).

use crate::achievements::{propose_unlocks, AchievementId};
use crate::checkin::{plan_award, plan_checkin, AwardOutcome, CheckinOutcome, XpAction};
use crate::config::EngineConfig;
use crate::core::time_window::{local_hour, utc_offset};
use crate::core::UserProgressionState;
use crate::error::Result;
use crate::escalation::{EscalationDecision, EscalationTable};
use crate::level::{LevelInfo, LevelTable};
use crate::mood::{MoodDecision, MoodEngine, MoodFacts, MoodRuleTable};
use crate::notifications::NotificationPayload;
use crate::streak::{checkin_day_gap, missed_days, StreakPolicy, StreakStatus};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The static configuration tables. Swapping them changes behavior without code changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyTables {
    pub levels: LevelTable,
    pub streak: StreakPolicy,
    pub moods: MoodRuleTable,
    pub escalation: EscalationTable,
}

impl PolicyTables {
    pub fn validate(&self) -> Result<()> {
        self.levels.validate()?;
        self.streak.validate()?;
        self.moods.validate()?;
        self.escalation.validate()
    }
}

/// Everything the UI and dispatcher need for one poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub evaluated_at: DateTime<Utc>,
    pub local_hour: u32,
    pub level: LevelInfo,
    /// 24-hour window status. Only the warning tier is derived from it.
    pub streak: StreakStatus,
    /// The last check-in falls on today's local date.
    pub checked_in_today: bool,
    /// At least one whole local day passed without a check-in.
    pub streak_lapsed: bool,
    /// `streak_days` from the snapshot, or 0 once the streak has lapsed.
    pub effective_streak_days: u32,
    /// Whole local days without a check-in, as fed to mood and escalation.
    pub missed_days: u32,
    pub mood: MoodDecision,
    pub escalation: EscalationDecision,
    pub proposed_achievements: Vec<AchievementId>,
    /// Escalation reminder ready for a dispatcher, if one is due.
    pub notification: Option<NotificationPayload>,
    /// Streak-at-risk warning ready for a dispatcher, if one is due.
    pub streak_warning: Option<NotificationPayload>,
}

#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    tables: PolicyTables,
    mood: MoodEngine,
    offset: FixedOffset,
    config: EngineConfig,
}

impl ProgressionEngine {
    /// Validates every table once. The engine is immutable afterwards.
    pub fn new(tables: PolicyTables, config: EngineConfig) -> Result<Self> {
        tables.validate()?;
        let offset = utc_offset(config.utc_offset_minutes)?;
        let mood = MoodEngine::new(tables.moods.clone(), config.message_selection.clone())?;
        Ok(Self {
            tables,
            mood,
            offset,
            config,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(PolicyTables::default(), EngineConfig::default())
    }

    pub fn tables(&self) -> &PolicyTables {
        &self.tables
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn compute_level(&self, total_xp: i64) -> Result<LevelInfo> {
        self.tables.levels.compute_level(total_xp)
    }

    pub fn compute_streak_status(
        &self,
        now: DateTime<Utc>,
        last_checkin_at: Option<DateTime<Utc>>,
    ) -> Result<StreakStatus> {
        self.tables.streak.compute_streak_status(now, last_checkin_at)
    }

    pub fn select_mood(&self, facts: &MoodFacts) -> Result<MoodDecision> {
        self.mood.select_mood(facts)
    }

    pub fn compute_escalation(&self, days_since_last_checkin: i64, current_hour: u32) -> Result<EscalationDecision> {
        self.tables
            .escalation
            .compute_escalation(days_since_last_checkin, current_hour)
    }

    /// Evaluates the snapshot at `now`.
    ///
    /// Mood and reminders follow the same local calendar days as
    /// `plan_checkin`: a user who checked in today gets no check-in reminder,
    /// and one who last checked in yesterday has missed nothing yet.
    pub fn evaluate(&self, state: &UserProgressionState, now: DateTime<Utc>) -> Result<Evaluation> {
        let level = self.tables.levels.level_for_xp(state.total_xp);
        let streak = self.compute_streak_status(now, state.last_checkin_at)?;
        let day_gap = checkin_day_gap(now, state.last_checkin_at, self.offset)?;
        let hour = local_hour(now, self.offset);

        let checked_in_today = day_gap == Some(0);
        let streak_lapsed = day_gap.is_some_and(|gap| gap > 1);
        let missed_days = missed_days(day_gap);
        let effective_streak_days = if streak_lapsed { 0 } else { state.streak_days };

        let mood = self.select_mood(&MoodFacts {
            streak_days: effective_streak_days,
            missed_days,
            hour_of_day: hour,
            character: state.character_id,
        })?;
        let escalation = if checked_in_today {
            EscalationDecision::silent()
        } else {
            self.compute_escalation(missed_days as i64, hour)?
        };

        let notification = escalation.should_notify.then(|| {
            NotificationPayload::from_escalation(&escalation, missed_days, state.character_id)
        });
        let streak_warning = if checked_in_today {
            None
        } else {
            NotificationPayload::from_streak_warning(&streak, effective_streak_days, state.character_id)
        };
        let proposed_achievements = propose_unlocks(state, level.level);

        debug!(
            user = %state.user_id,
            level = level.level,
            tier = streak.warning_tier.name(),
            missed_days,
            mood = mood.mood.name(),
            notify = escalation.should_notify,
            "snapshot evaluated"
        );

        Ok(Evaluation {
            evaluated_at: now,
            local_hour: hour,
            level,
            streak,
            checked_in_today,
            streak_lapsed,
            effective_streak_days,
            missed_days,
            mood,
            escalation,
            proposed_achievements,
            notification,
            streak_warning,
        })
    }

    pub fn plan_checkin(&self, state: &UserProgressionState, now: DateTime<Utc>) -> Result<CheckinOutcome> {
        plan_checkin(state, now, self.offset, &self.tables.levels)
    }

    pub fn plan_award(&self, state: &UserProgressionState, action: XpAction) -> Result<AwardOutcome> {
        plan_award(state, action, &self.tables.levels)
    }
}
