use super::types::{DayMatch, EscalationDecision, EscalationRow, EscalationTable};
use crate::core::time_window::check_hour;
use crate::error::{ProgressionError, Result};
use tracing::debug;

impl EscalationTable {
    pub fn validate(&self) -> Result<()> {
        if self.rows.is_empty() {
            return Err(ProgressionError::invalid_table("escalation table is empty"));
        }
        for row in &self.rows {
            row.window.validate()?;
        }
        if !self
            .rows
            .iter()
            .any(|r| matches!(r.days, DayMatch::AtLeast(_)))
        {
            return Err(ProgressionError::invalid_table(
                "escalation table needs an open-ended terminal row",
            ));
        }
        Ok(())
    }

    /// Highest-urgency row matching the day count and hour; ties keep the first row.
    pub fn compute_escalation(&self, days_since_last_checkin: i64, current_hour: u32) -> Result<EscalationDecision> {
        let days = u32::try_from(days_since_last_checkin).map_err(|_| {
            ProgressionError::invalid_input(format!(
                "days since last check-in must be non-negative, got {}",
                days_since_last_checkin
            ))
        })?;
        let hour = check_hour(current_hour)?;

        let mut best: Option<&EscalationRow> = None;
        for row in &self.rows {
            if !row.days.matches(days) || !row.window.contains(hour) {
                continue;
            }
            if best.map_or(true, |b| row.urgency > b.urgency) {
                best = Some(row);
            }
        }

        match best {
            Some(row) => {
                debug!(days, hour, urgency = row.urgency.name(), "escalation row matched");
                Ok(EscalationDecision {
                    should_notify: true,
                    urgency: row.urgency,
                    message: render_template(&row.template, days),
                })
            }
            None => Ok(EscalationDecision::silent()),
        }
    }
}

fn render_template(template: &str, days: u32) -> String {
    template.replace("{days}", &days.to_string())
}

/// `EscalationTable::compute_escalation` against the default table.
pub fn compute_escalation(days_since_last_checkin: i64, current_hour: u32) -> Result<EscalationDecision> {
    EscalationTable::default().compute_escalation(days_since_last_checkin, current_hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time_window::HourWindow;
    use crate::escalation::types::Urgency;

    #[test]
    fn test_day_zero_evening_is_low() {
        let d = compute_escalation(0, 20).unwrap();
        assert!(d.should_notify);
        assert_eq!(d.urgency, Urgency::Low);
    }

    #[test]
    fn test_day_zero_afternoon_is_silent() {
        let d = compute_escalation(0, 14).unwrap();
        assert!(!d.should_notify);
        assert!(d.message.is_empty());
    }

    #[test]
    fn test_template_renders_days() {
        let d = compute_escalation(2, 12).unwrap();
        assert_eq!(d.urgency, Urgency::High);
        assert_eq!(
            d.message,
            "2 days without a check-in. Your companion is starting to worry."
        );
    }

    #[test]
    fn test_overlapping_rows_take_highest_urgency() {
        // day 3 has an all-day high row and an evening critical row
        assert_eq!(compute_escalation(3, 10).unwrap().urgency, Urgency::High);
        assert_eq!(compute_escalation(3, 19).unwrap().urgency, Urgency::Critical);
    }

    #[test]
    fn test_terminal_row_holds_for_large_gaps() {
        let terminal = compute_escalation(7, 20).unwrap();
        let far = compute_escalation(100, 20).unwrap();
        assert!(far.should_notify);
        assert_eq!(far.urgency, terminal.urgency);
        assert_eq!(far.urgency, Urgency::Critical);
        assert!(far.message.contains("100 days"));
    }

    #[test]
    fn test_quiet_hours_respected() {
        assert!(!compute_escalation(100, 3).unwrap().should_notify);
        assert!(!compute_escalation(1, 14).unwrap().should_notify);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            compute_escalation(-1, 10),
            Err(ProgressionError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_escalation(1, 24),
            Err(ProgressionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_equal_urgency_keeps_first_row() {
        let table = EscalationTable {
            rows: vec![
                EscalationRow {
                    days: DayMatch::AtLeast(0),
                    window: HourWindow::ALL_DAY,
                    urgency: Urgency::Medium,
                    template: "first".to_string(),
                },
                EscalationRow {
                    days: DayMatch::AtLeast(0),
                    window: HourWindow::ALL_DAY,
                    urgency: Urgency::Medium,
                    template: "second".to_string(),
                },
            ],
        };
        assert_eq!(table.compute_escalation(5, 5).unwrap().message, "first");
    }

    #[test]
    fn test_validate() {
        assert!(EscalationTable::default().validate().is_ok());
        assert!(EscalationTable { rows: vec![] }.validate().is_err());

        let mut no_terminal = EscalationTable::default();
        no_terminal.rows.pop();
        assert!(no_terminal.validate().is_err());
    }
}
