//! Integration test: Progression rule properties
//!
//! Sweeps the default level, streak, mood and escalation tables with seeded
//! random inputs and checks the worked scenarios end to end through the
//! public API.

use chrono::{Duration, TimeZone, Utc};
use mindcare::core::LEVEL_THRESHOLDS;
use mindcare::escalation::EscalationTable;
use mindcare::mood::{MessageSelection, MoodEngine, MoodRuleTable};
use mindcare::{
    compute_escalation, compute_level, compute_streak_status, select_mood, CharacterId, MoodFacts,
    ProgressionError, Urgency, WarningTier,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[test]
fn test_level_is_monotonic_in_xp() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..2000 {
        let a: i64 = rng.gen_range(0..10_000);
        let b: i64 = rng.gen_range(0..10_000);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_level = compute_level(lo).unwrap().level;
        let hi_level = compute_level(hi).unwrap().level;
        assert!(lo_level <= hi_level, "level({}) > level({})", lo, hi);
    }
}

#[test]
fn test_progress_percent_is_bounded() {
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    for _ in 0..2000 {
        let xp: i64 = rng.gen_range(0..1_000_000);
        let info = compute_level(xp).unwrap();
        assert!(info.progress_percent <= 100, "xp {} gave {}%", xp, info.progress_percent);
        assert!(info.level >= 1);
    }
}

#[test]
fn test_every_threshold_starts_a_level_at_zero() {
    for (i, &threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
        let info = compute_level(threshold as i64).unwrap();
        assert_eq!(info.level, i as u32 + 1);
        assert_eq!(info.current_xp_in_level, 0, "threshold {}", threshold);
    }
}

#[test]
fn test_level_scenarios() {
    let at_threshold = compute_level(450).unwrap();
    assert_eq!(at_threshold.level, 4);
    assert_eq!(at_threshold.current_xp_in_level, 0);
    assert_eq!(at_threshold.progress_percent, 0);

    let mid_level = compute_level(300).unwrap();
    assert_eq!(mid_level.level, 3);
    assert_eq!(mid_level.current_xp_in_level, 50);
    assert_eq!(mid_level.xp_to_next_level, 200);
    assert_eq!(mid_level.progress_percent, 25);

    assert!(matches!(compute_level(-5), Err(ProgressionError::InvalidInput(_))));
}

#[test]
fn test_streak_scenarios() {
    let now = Utc.with_ymd_and_hms(2024, 9, 10, 18, 0, 0).unwrap();

    let never = compute_streak_status(now, None).unwrap();
    assert_eq!(never.hours_remaining, 0.0);
    assert_eq!(never.warning_tier, WarningTier::None);
    assert!(!never.streak_lost);

    let at_risk = compute_streak_status(now, Some(now - Duration::hours(23))).unwrap();
    assert_eq!(at_risk.hours_remaining, 1.0);
    assert_eq!(at_risk.warning_tier, WarningTier::Critical);

    let lapsed = compute_streak_status(now, Some(now - Duration::hours(25))).unwrap();
    assert_eq!(lapsed.hours_remaining, 0.0);
    assert!(lapsed.streak_lost);
}

#[test]
fn test_streak_urgency_never_rises_with_more_time_left() {
    let now = Utc.with_ymd_and_hms(2024, 9, 10, 18, 0, 0).unwrap();
    let tiers: Vec<WarningTier> = [0.5, 2.0, 5.0, 10.0]
        .iter()
        .map(|&remaining| {
            let elapsed = Duration::minutes(((24.0 - remaining) * 60.0) as i64);
            compute_streak_status(now, Some(now - elapsed))
                .unwrap()
                .warning_tier
        })
        .collect();

    assert!(tiers.windows(2).all(|w| w[0] >= w[1]), "tiers: {:?}", tiers);
    assert_eq!(tiers[0], WarningTier::Critical);
    assert_eq!(tiers[3], WarningTier::Info);
}

#[test]
fn test_mood_scenario_streak_beats_defaults() {
    let decision = select_mood(&MoodFacts {
        streak_days: 5,
        missed_days: 0,
        hour_of_day: 14,
        character: CharacterId::Max,
    })
    .unwrap();
    assert_eq!(decision.rule_id, "streak_3");
    assert_eq!(decision.priority, 5);
}

#[test]
fn test_mood_is_total_and_deterministic() {
    let engine = MoodEngine::new(MoodRuleTable::default(), MessageSelection::default()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..1000 {
        let facts = MoodFacts {
            streak_days: rng.gen_range(0..60),
            missed_days: rng.gen_range(0..10),
            hour_of_day: rng.gen_range(0..24),
            character: CharacterId::ALL[rng.gen_range(0..CharacterId::ALL.len())],
        };
        let first = engine.select_mood(&facts).unwrap();
        let second = engine.select_mood(&facts).unwrap();
        assert_eq!(first, second);
        assert!(!first.message.is_empty());
    }
}

#[test]
fn test_random_selection_keeps_mood_and_priority() {
    let engine = MoodEngine::new(MoodRuleTable::default(), MessageSelection::Random).unwrap();
    let facts = MoodFacts {
        streak_days: 8,
        missed_days: 0,
        hour_of_day: 15,
        character: CharacterId::Luna,
    };
    let first = engine.select_mood(&facts).unwrap();
    for _ in 0..20 {
        let next = engine.select_mood(&facts).unwrap();
        assert_eq!(next.mood, first.mood);
        assert_eq!(next.priority, first.priority);
        assert_eq!(next.rule_id, first.rule_id);
    }
}

#[test]
fn test_escalation_terminal_row_covers_long_absences() {
    let terminal = compute_escalation(100, 20).unwrap();
    assert!(terminal.should_notify);

    let highest = EscalationTable::default()
        .rows
        .iter()
        .map(|row| row.urgency)
        .max()
        .unwrap();
    assert_eq!(terminal.urgency, highest);
    assert_eq!(terminal.urgency, Urgency::Critical);

    for days in 7..400 {
        assert!(compute_escalation(days, 12).unwrap().should_notify, "day {}", days);
    }
}

#[test]
fn test_escalation_rejects_bad_inputs() {
    assert!(matches!(compute_escalation(-1, 10), Err(ProgressionError::InvalidInput(_))));
    assert!(matches!(compute_escalation(2, 24), Err(ProgressionError::InvalidInput(_))));
}

#[test]
fn test_escalation_urgency_grows_with_absence() {
    let at_evening = |days| compute_escalation(days, 19).unwrap().urgency;
    assert_eq!(at_evening(0), Urgency::Low);
    assert_eq!(at_evening(1), Urgency::Medium);
    assert_eq!(at_evening(2), Urgency::High);
    assert_eq!(at_evening(3), Urgency::Critical);
    assert_eq!(at_evening(10), Urgency::Critical);
}
