//! Delivery seam for reminders. Real transports live outside the engine.

use super::payload::NotificationPayload;
use crate::error::Result;
use std::sync::Mutex;
use tracing::info;

pub trait NotificationDispatcher: Send + Sync {
    fn dispatch(&self, payload: &NotificationPayload) -> Result<()>;
}

/// Writes each payload to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDispatcher;

impl NotificationDispatcher for LogDispatcher {
    fn dispatch(&self, payload: &NotificationPayload) -> Result<()> {
        info!(
            tag = %payload.tag,
            urgency = payload.urgency.name(),
            character = %payload.character,
            "{}: {}",
            payload.title,
            payload.body
        );
        Ok(())
    }
}

/// Keeps every dispatched payload in memory.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<NotificationPayload>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<NotificationPayload> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn dispatch(&self, payload: &NotificationPayload) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(payload.clone());
        Ok(())
    }
}
