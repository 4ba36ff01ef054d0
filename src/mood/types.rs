use crate::character::CharacterId;
use crate::core::time_window::{check_hour, HourWindow};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Emotional state shown on the companion's avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Calm,
    Curious,
    Cheerful,
    Sleepy,
    Happy,
    Excited,
    Proud,
    Worried,
    Sad,
}

impl Mood {
    pub fn name(&self) -> &'static str {
        match self {
            Mood::Calm => "Calm",
            Mood::Curious => "Curious",
            Mood::Cheerful => "Cheerful",
            Mood::Sleepy => "Sleepy",
            Mood::Happy => "Happy",
            Mood::Excited => "Excited",
            Mood::Proud => "Proud",
            Mood::Worried => "Worried",
            Mood::Sad => "Sad",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Calm => "😌",
            Mood::Curious => "🤔",
            Mood::Cheerful => "☀️",
            Mood::Sleepy => "😴",
            Mood::Happy => "😊",
            Mood::Excited => "🤩",
            Mood::Proud => "🥹",
            Mood::Worried => "😟",
            Mood::Sad => "😢",
        }
    }
}

/// Inputs the mood rules are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodFacts {
    pub streak_days: u32,
    pub missed_days: u32,
    pub hour_of_day: u32,
    pub character: CharacterId,
}

impl MoodFacts {
    /// Validates raw boundary values (hour range, character id).
    pub fn parse(streak_days: u32, missed_days: u32, hour_of_day: u32, character: &str) -> Result<Self> {
        Ok(Self {
            streak_days,
            missed_days,
            hour_of_day: check_hour(hour_of_day)?,
            character: character.parse()?,
        })
    }
}

/// Conjunction of optional bounds. A condition with no bounds always matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_streak: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_streak: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_missed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_missed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<HourWindow>,
}

impl MoodCondition {
    pub fn matches(&self, facts: &MoodFacts) -> bool {
        self.min_streak.map_or(true, |min| facts.streak_days >= min)
            && self.max_streak.map_or(true, |max| facts.streak_days <= max)
            && self.min_missed.map_or(true, |min| facts.missed_days >= min)
            && self.max_missed.map_or(true, |max| facts.missed_days <= max)
            && self.hours.map_or(true, |w| w.contains(facts.hour_of_day))
    }

    pub fn is_catch_all(&self) -> bool {
        self == &MoodCondition::default()
    }
}

/// Candidate lines for each persona.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonaMessages {
    pub luna: Vec<String>,
    pub max: Vec<String>,
    pub sage: Vec<String>,
}

impl PersonaMessages {
    pub fn for_character(&self, character: CharacterId) -> &[String] {
        match character {
            CharacterId::Luna => &self.luna,
            CharacterId::Max => &self.max,
            CharacterId::Sage => &self.sage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRule {
    pub id: String,
    #[serde(default)]
    pub condition: MoodCondition,
    pub mood: Mood,
    /// Higher wins. Equal priorities fall back to declaration order.
    pub priority: i32,
    pub messages: PersonaMessages,
}

/// Ordered rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRuleTable {
    pub rules: Vec<MoodRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodDecision {
    pub mood: Mood,
    pub message: String,
    pub priority: i32,
    pub rule_id: String,
}

/// How one line is picked from the winning rule's candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum MessageSelection {
    /// Always the first candidate.
    First,
    /// SHA-256 of salt, rule id and facts. Stable for identical inputs; a
    /// salt such as `user_id + date` rotates the line daily.
    Hashed { salt: String },
    /// Thread RNG. Only the text varies; mood and priority stay deterministic.
    Random,
}

impl Default for MessageSelection {
    fn default() -> Self {
        MessageSelection::Hashed {
            salt: String::new(),
        }
    }
}
