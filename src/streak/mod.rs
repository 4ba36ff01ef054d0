//! Streak tracker: hours left before a streak lapses and the matching warning tier.
//!
//! Holds no timers. Callers poll (typically once a minute) and get a fresh status.
//! Streak length itself is counted in local calendar days (`checkin_day_gap`).

pub mod logic;
pub mod types;

pub use logic::{checkin_day_gap, compute_streak_status, missed_days};
pub use types::{StreakPolicy, StreakStatus, StreakTierRow, WarningTier};
