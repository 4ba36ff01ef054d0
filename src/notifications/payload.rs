//! Notification payloads handed to a dispatcher.

use crate::character::CharacterId;
use crate::escalation::{EscalationDecision, Urgency};
use crate::streak::{StreakStatus, WarningTier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub urgency: Urgency,
    /// Stable per reminder kind so a client can replace rather than stack.
    pub tag: String,
    pub require_interaction: bool,
    pub silent: bool,
    pub character: CharacterId,
}

impl NotificationPayload {
    pub fn from_escalation(
        decision: &EscalationDecision,
        missed_days: u32,
        character: CharacterId,
    ) -> Self {
        let title = match decision.urgency {
            Urgency::Low => "A gentle reminder".to_string(),
            Urgency::Medium => "Time to check in".to_string(),
            Urgency::High => format!("{} misses you", character.display_name()),
            Urgency::Critical => format!("{} is worried about you", character.display_name()),
        };
        Self {
            title: format!("{} {}", character.icon(), title),
            body: decision.message.clone(),
            urgency: decision.urgency,
            tag: format!("checkin-{}d-{}", missed_days, decision.urgency.name()),
            require_interaction: decision.urgency >= Urgency::High,
            silent: decision.urgency == Urgency::Low,
            character,
        }
    }

    /// Only the Danger and Critical tiers warn; milder tiers are left to the UI.
    pub fn from_streak_warning(
        status: &StreakStatus,
        streak_days: u32,
        character: CharacterId,
    ) -> Option<Self> {
        if status.streak_lost || streak_days == 0 || status.warning_tier < WarningTier::Danger {
            return None;
        }
        let urgency = match status.warning_tier {
            WarningTier::Critical => Urgency::Critical,
            _ => Urgency::High,
        };
        let hours = status.hours_remaining.ceil().max(1.0) as u32;
        let unit = if hours == 1 { "hour" } else { "hours" };
        Some(Self {
            title: format!("{} Your streak is at risk", character.icon()),
            body: format!(
                "Your {}-day streak ends in under {} {}. Check in to keep it going.",
                streak_days, hours, unit
            ),
            urgency,
            tag: format!("streak-{}", status.warning_tier.name()),
            require_interaction: urgency == Urgency::Critical,
            silent: false,
            character,
        })
    }
}
