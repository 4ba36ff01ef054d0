use serde::{Deserialize, Serialize};

/// Streak warning severity, declared in ascending urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningTier {
    None,
    Info,
    Warning,
    Danger,
    Critical,
}

impl WarningTier {
    pub fn name(&self) -> &'static str {
        match self {
            WarningTier::None => "none",
            WarningTier::Info => "info",
            WarningTier::Warning => "warning",
            WarningTier::Danger => "danger",
            WarningTier::Critical => "critical",
        }
    }
}

/// Tier applied when hours remaining is at or below `max_hours_remaining`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakTierRow {
    pub max_hours_remaining: f64,
    pub tier: WarningTier,
}

/// Streak window plus the tier table, most urgent row first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakPolicy {
    pub window_hours: f64,
    pub tiers: Vec<StreakTierRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreakStatus {
    pub hours_remaining: f64,
    pub warning_tier: WarningTier,
    /// The window has fully elapsed. Resetting `streak_days` is left to the
    /// storage collaborator.
    pub streak_lost: bool,
}

impl StreakStatus {
    pub const INACTIVE: StreakStatus = StreakStatus {
        hours_remaining: 0.0,
        warning_tier: WarningTier::None,
        streak_lost: false,
    };
}
