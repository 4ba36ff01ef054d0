//! Periodic reminder scheduling.
//!
//! `ReminderLoop` is one poll: snapshot, evaluate, dispatch whatever is due
//! and not yet sent today. `ReminderScheduler` drives it on a background
//! thread until stopped.

use super::dispatcher::NotificationDispatcher;
use super::payload::NotificationPayload;
use crate::core::constants::DEFAULT_POLL_INTERVAL_SECS;
use crate::core::time_window::local_date;
use crate::core::UserProgressionState;
use crate::engine::ProgressionEngine;
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Supplies the current snapshot on each poll.
pub trait SnapshotSource: Send + Sync {
    fn snapshot(&self) -> Result<UserProgressionState>;
}

impl<F> SnapshotSource for F
where
    F: Fn() -> Result<UserProgressionState> + Send + Sync,
{
    fn snapshot(&self) -> Result<UserProgressionState> {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub poll_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

pub struct ReminderLoop {
    engine: Arc<ProgressionEngine>,
    source: Arc<dyn SnapshotSource>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    current_day: Option<NaiveDate>,
    sent_today: HashSet<String>,
}

impl ReminderLoop {
    pub fn new(
        engine: Arc<ProgressionEngine>,
        source: Arc<dyn SnapshotSource>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            engine,
            source,
            dispatcher,
            current_day: None,
            sent_today: HashSet::new(),
        }
    }

    /// Runs one poll at `now` and returns the payloads that were dispatched.
    ///
    /// Each tag goes out at most once per local calendar day. A payload whose
    /// dispatch fails is not marked as sent and is retried on the next poll.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Result<Vec<NotificationPayload>> {
        let state = self.source.snapshot()?;
        let evaluation = self.engine.evaluate(&state, now)?;

        let today = local_date(now, self.engine.offset());
        if self.current_day != Some(today) {
            self.current_day = Some(today);
            self.sent_today.clear();
        }

        let mut dispatched = Vec::new();
        let due = evaluation
            .streak_warning
            .into_iter()
            .chain(evaluation.notification);
        for payload in due {
            if self.sent_today.contains(&payload.tag) {
                continue;
            }
            match self.dispatcher.dispatch(&payload) {
                Ok(()) => {
                    self.sent_today.insert(payload.tag.clone());
                    dispatched.push(payload);
                }
                Err(e) => warn!(tag = %payload.tag, error = %e, "dispatch failed"),
            }
        }

        debug!(user = %state.user_id, sent = dispatched.len(), "reminder poll");
        Ok(dispatched)
    }
}

/// Background reminder thread. Polls immediately, then once per interval.
pub struct ReminderScheduler {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn start(
        engine: Arc<ProgressionEngine>,
        source: Arc<dyn SnapshotSource>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        config: SchedulerConfig,
    ) -> Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let mut reminder_loop = ReminderLoop::new(engine, source, dispatcher);
        let interval = config.poll_interval;

        let handle = thread::Builder::new()
            .name("mindcare-reminders".to_string())
            .spawn(move || loop {
                if let Err(e) = reminder_loop.poll(Utc::now()) {
                    warn!(error = %e, "reminder poll failed");
                }
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        info!(interval_secs = interval.as_secs_f64(), "reminder scheduler started");
        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the worker and waits for the in-flight poll to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("reminder thread panicked");
            }
            info!("reminder scheduler stopped");
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterId;
    use crate::error::ProgressionError;
    use crate::escalation::Urgency;
    use crate::notifications::RecordingDispatcher;
    use chrono::{Duration as ChronoDuration, TimeZone};

    fn lapsed_state(last: DateTime<Utc>) -> UserProgressionState {
        let mut state = UserProgressionState::new("u", CharacterId::Luna);
        state.streak_days = 4;
        state.last_checkin_at = Some(last);
        state
    }

    fn source_for(last: DateTime<Utc>) -> Arc<dyn SnapshotSource> {
        Arc::new(move || -> Result<UserProgressionState> { Ok(lapsed_state(last)) })
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_poll_dedupes_within_a_day() {
        let engine = Arc::new(ProgressionEngine::with_defaults().unwrap());
        let source = source_for(at(1, 8));
        let recorder = Arc::new(RecordingDispatcher::new());
        let mut reminders = ReminderLoop::new(engine, source, recorder.clone());

        // Nothing on the 2nd or 3rd: two missed days, inside the 10-20 window
        let first = reminders.poll(at(4, 10)).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].urgency, Urgency::High);

        let again = reminders.poll(at(4, 11)).unwrap();
        assert!(again.is_empty(), "same tag should not repeat on the same day");
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_poll_sends_again_next_day() {
        let engine = Arc::new(ProgressionEngine::with_defaults().unwrap());
        let source = source_for(at(1, 8));
        let recorder = Arc::new(RecordingDispatcher::new());
        let mut reminders = ReminderLoop::new(engine, source, recorder.clone());

        reminders.poll(at(4, 10)).unwrap();
        let next = reminders.poll(at(5, 10)).unwrap();
        assert_eq!(next.len(), 1);
        assert_ne!(recorder.sent()[0].tag, recorder.sent()[1].tag);
    }

    #[test]
    fn test_poll_outside_window_is_quiet() {
        let engine = Arc::new(ProgressionEngine::with_defaults().unwrap());
        let source = source_for(at(1, 8));
        let recorder = Arc::new(RecordingDispatcher::new());
        let mut reminders = ReminderLoop::new(engine, source, recorder.clone());

        assert!(reminders.poll(at(4, 3)).unwrap().is_empty());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_no_reminder_after_todays_checkin() {
        let engine = Arc::new(ProgressionEngine::with_defaults().unwrap());
        let source = source_for(at(4, 8));
        let recorder = Arc::new(RecordingDispatcher::new());
        let mut reminders = ReminderLoop::new(engine, source, recorder.clone());

        for hour in [19, 20, 21, 22] {
            assert!(reminders.poll(at(4, hour)).unwrap().is_empty());
        }
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_source_error_propagates() {
        let engine = Arc::new(ProgressionEngine::with_defaults().unwrap());
        let source: Arc<dyn SnapshotSource> =
            Arc::new(|| -> Result<UserProgressionState> {
                Err(ProgressionError::InvalidInput("offline".to_string()))
            });
        let mut reminders = ReminderLoop::new(engine, source, Arc::new(RecordingDispatcher::new()));
        assert!(reminders.poll(at(3, 10)).is_err());
    }

    #[test]
    fn test_future_checkin_is_rejected_by_poll() {
        let engine = Arc::new(ProgressionEngine::with_defaults().unwrap());
        let future = at(3, 10) + ChronoDuration::hours(2);
        let source = source_for(future);
        let mut reminders = ReminderLoop::new(engine, source, Arc::new(RecordingDispatcher::new()));
        assert!(reminders.poll(at(3, 10)).is_err());
    }
}
