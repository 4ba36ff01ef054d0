use crate::error::{ProgressionError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive range of clock hours. `start > end` wraps past midnight
/// (22..=4 covers 22, 23, 0, ..., 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
}

impl HourWindow {
    pub const ALL_DAY: HourWindow = HourWindow { start: 0, end: 23 };

    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, hour: u32) -> bool {
        if self.start <= self.end {
            hour >= self.start && hour <= self.end
        } else {
            hour >= self.start || hour <= self.end
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.start > 23 || self.end > 23 {
            return Err(ProgressionError::invalid_table(format!(
                "hour window {}..={} is outside 0..=23",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

pub fn check_hour(hour: u32) -> Result<u32> {
    if hour > 23 {
        return Err(ProgressionError::invalid_input(format!(
            "hour of day must be 0..=23, got {}",
            hour
        )));
    }
    Ok(hour)
}

/// Builds the user's fixed offset from minutes east of UTC.
pub fn utc_offset(minutes: i32) -> Result<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| ProgressionError::invalid_input(format!("invalid UTC offset {} minutes", minutes)))
}

pub fn local_hour(now: DateTime<Utc>, offset: FixedOffset) -> u32 {
    now.with_timezone(&offset).hour()
}

pub fn local_date(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}
