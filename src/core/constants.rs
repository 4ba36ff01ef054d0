// Streak window
pub const STREAK_WINDOW_HOURS: f64 = 24.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// Leveling
pub const LEVEL_THRESHOLDS: [u64; 11] = [0, 100, 250, 450, 700, 1000, 1400, 1900, 2500, 3200, 4000];
pub const MAX_LEVEL_XP_SENTINEL: u64 = 9999;

// Streak warning tiers (hours remaining, inclusive)
pub const STREAK_CRITICAL_HOURS: f64 = 1.0;
pub const STREAK_DANGER_HOURS: f64 = 3.0;
pub const STREAK_WARNING_HOURS: f64 = 6.0;
pub const STREAK_INFO_HOURS: f64 = 12.0;

// XP awards
pub const XP_DAILY_CHECKIN: u64 = 50;
pub const XP_CHAT_SESSION: u64 = 10;
pub const XP_BREATHING_EXERCISE: u64 = 15;
pub const XP_JOURNAL_ENTRY: u64 = 20;
pub const STREAK_BONUS_PER_DAY: u64 = 5;
pub const MAX_STREAK_BONUS: u64 = 50;

// Reminder polling
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

// Storage keys
pub const PROGRESSION_KEY_PREFIX: &str = "progression";
pub const CONFIG_FILENAME: &str = "config.json";
pub const POLICY_FILENAME: &str = "policy.json";
