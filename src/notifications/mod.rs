//! Reminder payloads, delivery and scheduling.

pub mod dispatcher;
pub mod payload;
pub mod scheduler;

pub use dispatcher::{LogDispatcher, NotificationDispatcher, RecordingDispatcher};
pub use payload::NotificationPayload;
pub use scheduler::{ReminderLoop, ReminderScheduler, SchedulerConfig, SnapshotSource};
