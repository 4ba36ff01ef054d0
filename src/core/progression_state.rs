use crate::character::CharacterId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-user progression snapshot.
///
/// Owned by the storage layer. The engine only reads it; state changes are
/// proposed as outcomes (see `checkin`) and applied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgressionState {
    pub user_id: String,
    /// Cumulative experience, never decreases.
    pub total_xp: u64,
    /// Consecutive calendar days with at least one check-in.
    pub streak_days: u32,
    /// Most recent check-in. `None` when the user has never checked in.
    #[serde(default)]
    pub last_checkin_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub character_id: CharacterId,
    /// Accumulates only.
    #[serde(default)]
    pub unlocked_achievement_ids: BTreeSet<String>,
}

impl UserProgressionState {
    /// Fresh state for a user who has never checked in.
    pub fn new(user_id: impl Into<String>, character_id: CharacterId) -> Self {
        Self {
            user_id: user_id.into(),
            total_xp: 0,
            streak_days: 0,
            last_checkin_at: None,
            character_id,
            unlocked_achievement_ids: BTreeSet::new(),
        }
    }

    pub fn has_checked_in(&self) -> bool {
        self.last_checkin_at.is_some()
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.unlocked_achievement_ids.contains(id)
    }
}
