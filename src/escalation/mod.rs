//! Reminder escalation: how loudly to nudge a user who has stopped checking in.
//!
//! Decisions only. Delivery belongs to a `NotificationDispatcher`.

pub mod data;
pub mod logic;
pub mod types;

pub use logic::compute_escalation;
pub use types::{DayMatch, EscalationDecision, EscalationRow, EscalationTable, Urgency};
