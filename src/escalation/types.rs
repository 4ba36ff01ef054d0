use crate::core::time_window::HourWindow;
use serde::{Deserialize, Serialize};

/// Reminder urgency, declared in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn name(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }
}

/// Which day counts a row applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMatch {
    Exactly(u32),
    /// Open-ended terminal row.
    AtLeast(u32),
}

impl DayMatch {
    pub fn matches(&self, days: u32) -> bool {
        match *self {
            DayMatch::Exactly(n) => days == n,
            DayMatch::AtLeast(n) => days >= n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationRow {
    pub days: DayMatch,
    pub window: HourWindow,
    pub urgency: Urgency,
    /// `{days}` is replaced with the day count.
    pub template: String,
}

/// Rows ordered by ascending day count, then time of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationTable {
    pub rows: Vec<EscalationRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EscalationDecision {
    pub should_notify: bool,
    pub urgency: Urgency,
    pub message: String,
}

impl EscalationDecision {
    pub fn silent() -> Self {
        Self {
            should_notify: false,
            urgency: Urgency::Low,
            message: String::new(),
        }
    }
}
