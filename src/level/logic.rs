use super::types::{LevelInfo, LevelTable};
use crate::core::constants::MAX_LEVEL_XP_SENTINEL;
use crate::error::{ProgressionError, Result};

impl LevelTable {
    /// Rejects tables that are empty, do not start at 0, or are not strictly ascending.
    pub fn validate(&self) -> Result<()> {
        let first = self
            .levels
            .first()
            .ok_or_else(|| ProgressionError::invalid_table("level table is empty"))?;
        if first.xp_required != 0 {
            return Err(ProgressionError::invalid_table(format!(
                "level 1 must start at 0 XP, found {}",
                first.xp_required
            )));
        }
        for (i, pair) in self.levels.windows(2).enumerate() {
            if pair[1].xp_required <= pair[0].xp_required {
                return Err(ProgressionError::invalid_table(format!(
                    "level {} threshold {} is not above level {} threshold {}",
                    i + 2,
                    pair[1].xp_required,
                    i + 1,
                    pair[0].xp_required
                )));
            }
        }
        Ok(())
    }

    pub fn max_level(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Level info for an XP total.
    ///
    /// Never panics, but the result is only meaningful for a table that
    /// passed `validate`. An empty table reads as a max-level level 1 with no
    /// title, and XP below the first threshold counts as level 1 with 0 XP in it.
    pub fn level_for_xp(&self, total_xp: u64) -> LevelInfo {
        let reached = self
            .levels
            .partition_point(|def| def.xp_required <= total_xp)
            .max(1);
        let index = reached - 1;
        let Some(current) = self.levels.get(index) else {
            return LevelInfo {
                level: 1,
                current_xp_in_level: 0,
                xp_to_next_level: MAX_LEVEL_XP_SENTINEL,
                progress_percent: 0,
                title: String::new(),
                is_max_level: true,
            };
        };
        let current_xp_in_level = total_xp.saturating_sub(current.xp_required);

        let (xp_to_next_level, is_max_level) = match self.levels.get(index + 1) {
            Some(next) => (next.xp_required.saturating_sub(current.xp_required), false),
            None => (MAX_LEVEL_XP_SENTINEL, true),
        };

        let progress_percent = if xp_to_next_level == 0 {
            100
        } else {
            let ratio = current_xp_in_level as f64 / xp_to_next_level as f64;
            (ratio * 100.0).round().clamp(0.0, 100.0) as u8
        };

        LevelInfo {
            level: reached as u32,
            current_xp_in_level,
            xp_to_next_level,
            progress_percent,
            title: current.title.clone(),
            is_max_level,
        }
    }

    /// Level info for an XP total coming from an untrusted boundary.
    ///
    /// Negative totals are a caller bug and are rejected rather than clamped.
    /// The table itself is validated first.
    pub fn compute_level(&self, total_xp: i64) -> Result<LevelInfo> {
        let xp = u64::try_from(total_xp).map_err(|_| {
            ProgressionError::invalid_input(format!("total XP must be non-negative, got {}", total_xp))
        })?;
        self.validate()?;
        Ok(self.level_for_xp(xp))
    }

    /// Number of levels crossed going from `before` to `after` XP.
    pub fn levels_gained(&self, before: u64, after: u64) -> u32 {
        if after <= before {
            return 0;
        }
        self.level_for_xp(after).level - self.level_for_xp(before).level
    }
}

/// `LevelTable::compute_level` against the default table.
pub fn compute_level(total_xp: i64) -> Result<LevelInfo> {
    LevelTable::default().compute_level(total_xp)
}
