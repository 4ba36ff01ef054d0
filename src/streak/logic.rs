use super::types::{StreakPolicy, StreakStatus, StreakTierRow, WarningTier};
use crate::core::constants::*;
use crate::core::time_window::local_date;
use crate::error::{ProgressionError, Result};
use chrono::{DateTime, FixedOffset, Utc};

impl Default for StreakPolicy {
    fn default() -> Self {
        Self {
            window_hours: STREAK_WINDOW_HOURS,
            tiers: vec![
                StreakTierRow {
                    max_hours_remaining: STREAK_CRITICAL_HOURS,
                    tier: WarningTier::Critical,
                },
                StreakTierRow {
                    max_hours_remaining: STREAK_DANGER_HOURS,
                    tier: WarningTier::Danger,
                },
                StreakTierRow {
                    max_hours_remaining: STREAK_WARNING_HOURS,
                    tier: WarningTier::Warning,
                },
                StreakTierRow {
                    max_hours_remaining: STREAK_INFO_HOURS,
                    tier: WarningTier::Info,
                },
            ],
        }
    }
}

impl StreakPolicy {
    /// Rows must be ordered most urgent first with strictly growing thresholds,
    /// so each tier's hour range nests inside the next less urgent one.
    pub fn validate(&self) -> Result<()> {
        if !(self.window_hours > 0.0) {
            return Err(ProgressionError::invalid_table(format!(
                "streak window must be positive, got {}",
                self.window_hours
            )));
        }
        for row in &self.tiers {
            if row.tier == WarningTier::None || !(row.max_hours_remaining > 0.0) {
                return Err(ProgressionError::invalid_table(format!(
                    "invalid streak tier row {:?}",
                    row
                )));
            }
        }
        for pair in self.tiers.windows(2) {
            if pair[1].max_hours_remaining <= pair[0].max_hours_remaining
                || pair[1].tier >= pair[0].tier
            {
                return Err(ProgressionError::invalid_table(format!(
                    "streak tier {} must follow a more urgent tier with a smaller threshold",
                    pair[1].tier.name()
                )));
            }
        }
        Ok(())
    }

    /// First row whose threshold covers `hours_remaining`; a lost streak has no tier.
    pub fn tier_for_hours(&self, hours_remaining: f64) -> WarningTier {
        if hours_remaining <= 0.0 {
            return WarningTier::None;
        }
        self.tiers
            .iter()
            .find(|row| hours_remaining <= row.max_hours_remaining)
            .map(|row| row.tier)
            .unwrap_or(WarningTier::None)
    }

    pub fn compute_streak_status(
        &self,
        now: DateTime<Utc>,
        last_checkin_at: Option<DateTime<Utc>>,
    ) -> Result<StreakStatus> {
        let last = match last_checkin_at {
            Some(last) => last,
            None => return Ok(StreakStatus::INACTIVE),
        };

        let hours_since = hours_between(last, now)?;
        let hours_remaining = (self.window_hours - hours_since).max(0.0);
        let warning_tier = self.tier_for_hours(hours_remaining);

        Ok(StreakStatus {
            hours_remaining,
            warning_tier,
            streak_lost: hours_remaining <= 0.0,
        })
    }

}

/// Local calendar days from the last check-in to `now` in `offset`.
///
/// `Some(0)` means the user checked in today, `Some(1)` yesterday, and `None`
/// that they never have. Streak extension and missed-day counting both use
/// this; the 24-hour window above only drives the warning tier.
pub fn checkin_day_gap(
    now: DateTime<Utc>,
    last_checkin_at: Option<DateTime<Utc>>,
    offset: FixedOffset,
) -> Result<Option<u32>> {
    let last = match last_checkin_at {
        Some(last) => last,
        None => return Ok(None),
    };
    ensure_not_after(last, now)?;
    let gap = (local_date(now, offset) - local_date(last, offset)).num_days();
    Ok(Some(u32::try_from(gap).unwrap_or(u32::MAX)))
}

/// Whole calendar days without a check-in: yesterday's check-in misses none,
/// one two days ago misses one. Users who never checked in have missed none.
pub fn missed_days(day_gap: Option<u32>) -> u32 {
    day_gap.map_or(0, |gap| gap.saturating_sub(1))
}

fn ensure_not_after(last: DateTime<Utc>, now: DateTime<Utc>) -> Result<()> {
    if last > now {
        return Err(ProgressionError::invalid_input(format!(
            "last check-in {} is after now {}",
            last.to_rfc3339(),
            now.to_rfc3339()
        )));
    }
    Ok(())
}

/// Fractional hours from `earlier` to `later`; a reversed pair is malformed input.
fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> Result<f64> {
    ensure_not_after(earlier, later)?;
    let elapsed = later - earlier;
    Ok(elapsed.num_milliseconds() as f64 / 1000.0 / SECONDS_PER_HOUR)
}

/// `StreakPolicy::compute_streak_status` with the default tiers.
pub fn compute_streak_status(
    now: DateTime<Utc>,
    last_checkin_at: Option<DateTime<Utc>>,
) -> Result<StreakStatus> {
    StreakPolicy::default().compute_streak_status(now, last_checkin_at)
}
