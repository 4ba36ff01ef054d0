//! Mood rule engine: picks the companion's mood and line from an ordered rule table.

pub mod data;
pub mod logic;
pub mod types;

pub use logic::{select_mood, MoodEngine};
pub use types::{
    MessageSelection, Mood, MoodCondition, MoodDecision, MoodFacts, MoodRule, MoodRuleTable,
    PersonaMessages,
};
