//! Default mood rule table.

use super::types::{Mood, MoodCondition, MoodRule, MoodRuleTable, PersonaMessages};
use crate::core::time_window::HourWindow;

fn lines(src: &[&str]) -> Vec<String> {
    src.iter().map(|s| s.to_string()).collect()
}

fn rule(
    id: &str,
    condition: MoodCondition,
    mood: Mood,
    priority: i32,
    luna: &[&str],
    max: &[&str],
    sage: &[&str],
) -> MoodRule {
    MoodRule {
        id: id.to_string(),
        condition,
        mood,
        priority,
        messages: PersonaMessages {
            luna: lines(luna),
            max: lines(max),
            sage: lines(sage),
        },
    }
}

impl Default for MoodRuleTable {
    fn default() -> Self {
        let rules = vec![
            rule(
                "long_absence",
                MoodCondition {
                    min_missed: Some(3),
                    ..Default::default()
                },
                Mood::Sad,
                10,
                &[
                    "I've missed you these past few days. Whenever you're ready, I'm here.",
                    "It's been quiet without you. No pressure, just a gentle hello.",
                ],
                &[
                    "Hey, it's been a few days! Let's get back in the game together.",
                    "I kept your spot warm. One check-in and we're rolling again!",
                ],
                &[
                    "Every path has pauses. Returning is its own kind of strength.",
                    "A few days away changes nothing about where you can go next.",
                ],
            ),
            rule(
                "missed_yesterday",
                MoodCondition {
                    min_missed: Some(1),
                    ..Default::default()
                },
                Mood::Worried,
                8,
                &[
                    "I didn't hear from you yesterday. How are you holding up?",
                    "Just checking on you. A small note about today is enough.",
                ],
                &[
                    "Missed you yesterday! Quick check-in to get the momentum back?",
                    "One day off is fine. Two is a habit. Let's check in!",
                ],
                &[
                    "Yesterday slipped by. Today is still yours to notice.",
                    "Consistency is built in the returning, not the never-missing.",
                ],
            ),
            rule(
                "streak_30",
                MoodCondition {
                    min_streak: Some(30),
                    max_missed: Some(0),
                    ..Default::default()
                },
                Mood::Proud,
                7,
                &[
                    "A whole month of showing up for yourself. I'm so proud of you.",
                    "Thirty days and counting. You've built something real.",
                ],
                &[
                    "30+ days! You're an absolute machine!",
                    "A month-long streak! Legendary stuff!",
                ],
                &[
                    "A month of care becomes a way of living.",
                    "What you repeat, you become. Thirty days of it.",
                ],
            ),
            rule(
                "streak_7",
                MoodCondition {
                    min_streak: Some(7),
                    max_missed: Some(0),
                    ..Default::default()
                },
                Mood::Excited,
                6,
                &[
                    "A full week of check-ins. That's lovely to see.",
                    "Seven days in a row. You're finding your rhythm.",
                ],
                &[
                    "One week streak! Let's keep this fire going!",
                    "7 days strong! You're on a roll!",
                ],
                &[
                    "A week of attention. Patterns are beginning to show.",
                    "Seven small steps make a path.",
                ],
            ),
            rule(
                "streak_3",
                MoodCondition {
                    min_streak: Some(3),
                    max_missed: Some(0),
                    ..Default::default()
                },
                Mood::Happy,
                5,
                &[
                    "Three days in a row. It's nice talking with you every day.",
                    "You keep coming back. That matters.",
                ],
                &[
                    "3+ day streak! Nice work, keep it up!",
                    "Streak's heating up! Don't stop now!",
                ],
                &[
                    "Three days. A habit is taking root.",
                    "Small, steady, repeated. That is how change happens.",
                ],
            ),
            rule(
                "late_night",
                MoodCondition {
                    hours: Some(HourWindow::new(22, 4)),
                    ..Default::default()
                },
                Mood::Sleepy,
                3,
                &[
                    "It's getting late. Rest is part of taking care of yourself.",
                    "Yawn... maybe a quick check-in, then some sleep?",
                ],
                &[
                    "Late night! Recharge those batteries, champ.",
                    "Even coaches need sleep. Wind down soon!",
                ],
                &[
                    "The night asks for stillness. Let the day settle.",
                    "Sleep is the quiet work that makes tomorrow possible.",
                ],
            ),
            rule(
                "morning",
                MoodCondition {
                    hours: Some(HourWindow::new(5, 11)),
                    ..Default::default()
                },
                Mood::Cheerful,
                2,
                &[
                    "Good morning. How did you sleep?",
                    "Morning! Let's start the day gently.",
                ],
                &[
                    "Rise and shine! Big day ahead!",
                    "Morning! Let's set the tone for today!",
                ],
                &[
                    "A new morning, a clean page.",
                    "How you begin often shapes how you continue.",
                ],
            ),
            rule(
                "new_friend",
                MoodCondition {
                    max_streak: Some(0),
                    max_missed: Some(0),
                    ..Default::default()
                },
                Mood::Curious,
                1,
                &[
                    "Hi there. I'd love to hear how you're feeling today.",
                    "Nice to meet you. Shall we start with a small check-in?",
                ],
                &[
                    "New teammate! Let's kick things off with your first check-in!",
                    "Welcome aboard! Ready to start a streak?",
                ],
                &[
                    "Every practice begins with a first step.",
                    "Let's begin by simply noticing how today feels.",
                ],
            ),
            rule(
                "normal",
                MoodCondition::default(),
                Mood::Calm,
                0,
                &[
                    "I'm here whenever you want to talk.",
                    "How's your day going so far?",
                ],
                &[
                    "Ready when you are!",
                    "What's the plan for today?",
                ],
                &[
                    "Take a breath. What is present for you right now?",
                    "There's no rush. Notice, then choose.",
                ],
            ),
        ];
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterId;

    #[test]
    fn test_default_table_ends_with_catch_all() {
        let table = MoodRuleTable::default();
        let last = table.rules.last().unwrap();
        assert_eq!(last.id, "normal");
        assert!(last.condition.is_catch_all());
        assert_eq!(last.priority, 0);
    }

    #[test]
    fn test_every_rule_has_lines_for_every_persona() {
        let table = MoodRuleTable::default();
        for rule in &table.rules {
            for character in CharacterId::ALL {
                assert!(
                    !rule.messages.for_character(character).is_empty(),
                    "rule {} has no lines for {}",
                    rule.id,
                    character
                );
            }
        }
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let table = MoodRuleTable::default();
        let mut ids: Vec<&str> = table.rules.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), table.rules.len());
    }
}
