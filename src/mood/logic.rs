use super::types::{MessageSelection, MoodDecision, MoodFacts, MoodRule, MoodRuleTable};
use crate::character::CharacterId;
use crate::core::time_window::check_hour;
use crate::error::{ProgressionError, Result};
use rand::Rng;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::debug;

impl MoodRuleTable {
    /// Every rule needs a line per persona, ids must be unique, and at least
    /// one unconditional rule must exist so selection is total.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(ProgressionError::invalid_table(format!(
                    "duplicate mood rule id {}",
                    rule.id
                )));
            }
            if let Some(window) = rule.condition.hours {
                window.validate()?;
            }
            for character in CharacterId::ALL {
                if rule.messages.for_character(character).is_empty() {
                    return Err(ProgressionError::invalid_table(format!(
                        "mood rule {} has no messages for {}",
                        rule.id,
                        character.as_str()
                    )));
                }
            }
        }
        if !self.rules.iter().any(|r| r.condition.is_catch_all()) {
            return Err(ProgressionError::NoApplicableRule);
        }
        Ok(())
    }
}

/// Picks the companion's mood from a validated rule table.
#[derive(Debug, Clone)]
pub struct MoodEngine {
    rules: Vec<MoodRule>,
    selection: MessageSelection,
}

impl MoodEngine {
    pub fn new(table: MoodRuleTable, selection: MessageSelection) -> Result<Self> {
        table.validate()?;
        Ok(Self {
            rules: table.rules,
            selection,
        })
    }

    pub fn rules(&self) -> &[MoodRule] {
        &self.rules
    }

    /// Highest-priority matching rule; ties go to the earliest declared rule.
    pub fn select_mood(&self, facts: &MoodFacts) -> Result<MoodDecision> {
        check_hour(facts.hour_of_day)?;

        let mut best: Option<&MoodRule> = None;
        for rule in &self.rules {
            if !rule.condition.matches(facts) {
                continue;
            }
            if best.map_or(true, |b| rule.priority > b.priority) {
                best = Some(rule);
            }
        }
        let rule = best.ok_or(ProgressionError::NoApplicableRule)?;

        let candidates = rule.messages.for_character(facts.character);
        let message = candidates
            .get(self.message_index(rule, facts, candidates.len()))
            .cloned()
            .ok_or_else(|| {
                ProgressionError::invalid_table(format!("mood rule {} has no messages", rule.id))
            })?;

        debug!(
            rule = %rule.id,
            priority = rule.priority,
            streak_days = facts.streak_days,
            missed_days = facts.missed_days,
            hour = facts.hour_of_day,
            "mood rule selected"
        );

        Ok(MoodDecision {
            mood: rule.mood,
            message,
            priority: rule.priority,
            rule_id: rule.id.clone(),
        })
    }

    fn message_index(&self, rule: &MoodRule, facts: &MoodFacts, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        match &self.selection {
            MessageSelection::First => 0,
            MessageSelection::Hashed { salt } => {
                let mut hasher = Sha256::new();
                hasher.update(salt.as_bytes());
                hasher.update(rule.id.as_bytes());
                hasher.update(facts.character.as_str().as_bytes());
                hasher.update(facts.streak_days.to_le_bytes());
                hasher.update(facts.missed_days.to_le_bytes());
                let digest = hasher.finalize();
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&digest[..8]);
                (u64::from_le_bytes(bytes) % len as u64) as usize
            }
            MessageSelection::Random => rand::thread_rng().gen_range(0..len),
        }
    }
}

impl Default for MoodEngine {
    fn default() -> Self {
        Self {
            rules: MoodRuleTable::default().rules,
            selection: MessageSelection::default(),
        }
    }
}

/// `MoodEngine::select_mood` with the default table and hashed selection.
pub fn select_mood(facts: &MoodFacts) -> Result<MoodDecision> {
    MoodEngine::default().select_mood(facts)
}
