//! MindCare - Progression Engine Library
//!
//! Levels, streaks, companion moods and check-in reminder escalation for the
//! MindCare companion. The engine is pure: it reads a `UserProgressionState`
//! snapshot plus the current instant and returns decisions. Persistence and
//! notification delivery sit behind the `storage` and `notifications` seams.

pub mod achievements;
pub mod build_info;
pub mod character;
pub mod checkin;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod escalation;
pub mod level;
pub mod mood;
pub mod notifications;
pub mod storage;
pub mod streak;

pub use achievements::AchievementId;
pub use character::CharacterId;
pub use checkin::{AwardOutcome, CheckinOutcome, XpAction};
pub use config::EngineConfig;
pub use crate::core::UserProgressionState;
pub use engine::{Evaluation, PolicyTables, ProgressionEngine};
pub use error::{ProgressionError, Result};
pub use escalation::{compute_escalation, EscalationDecision, Urgency};
pub use level::{compute_level, LevelInfo};
pub use mood::{select_mood, Mood, MoodDecision, MoodFacts};
pub use streak::{compute_streak_status, StreakStatus, WarningTier};
