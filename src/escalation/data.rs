//! Default escalation table (day 0/1/2/3/7 policy).
//!
//! Days are whole local days without a check-in: day 0 is a user who checked
//! in yesterday but not yet today.

use super::types::{DayMatch, EscalationRow, EscalationTable, Urgency};
use crate::core::time_window::HourWindow;

fn row(days: DayMatch, start: u32, end: u32, urgency: Urgency, template: &str) -> EscalationRow {
    EscalationRow {
        days,
        window: HourWindow::new(start, end),
        urgency,
        template: template.to_string(),
    }
}

impl Default for EscalationTable {
    fn default() -> Self {
        use DayMatch::{AtLeast, Exactly};
        use Urgency::{Critical, High, Low, Medium};

        let rows = vec![
            row(
                Exactly(0),
                19,
                22,
                Low,
                "Haven't checked in today yet? A minute is all it takes.",
            ),
            row(
                Exactly(1),
                9,
                11,
                Medium,
                "You missed yesterday's check-in. Start fresh this morning?",
            ),
            row(
                Exactly(1),
                18,
                21,
                Medium,
                "No check-in yesterday. How are you feeling tonight?",
            ),
            row(
                Exactly(2),
                10,
                20,
                High,
                "{days} days without a check-in. Your companion is starting to worry.",
            ),
            row(
                Exactly(3),
                9,
                21,
                High,
                "{days} days away. A quick check-in helps you get back on track.",
            ),
            row(
                Exactly(3),
                18,
                21,
                Critical,
                "It's been {days} days. We miss you, please check in when you can.",
            ),
            row(
                Exactly(4),
                12,
                20,
                High,
                "{days} days without a check-in. Small steps still count.",
            ),
            row(
                Exactly(5),
                12,
                20,
                High,
                "{days} days without a check-in. Small steps still count.",
            ),
            row(
                Exactly(6),
                12,
                20,
                High,
                "{days} days without a check-in. Small steps still count.",
            ),
            row(
                AtLeast(7),
                9,
                21,
                Critical,
                "{days} days without a check-in. Whenever you're ready, we're here for you.",
            ),
        ];
        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_terminal_row_last() {
        let table = EscalationTable::default();
        let last = table.rows.last().unwrap();
        assert_eq!(last.days, DayMatch::AtLeast(7));
        assert_eq!(last.urgency, Urgency::Critical);
    }

    #[test]
    fn test_rows_ascend_by_day() {
        let table = EscalationTable::default();
        let first_day = |m: &DayMatch| match *m {
            DayMatch::Exactly(n) | DayMatch::AtLeast(n) => n,
        };
        for pair in table.rows.windows(2) {
            assert!(first_day(&pair[0].days) <= first_day(&pair[1].days));
        }
    }
}
