//! Reminder notification rendering and dispatch.
//!
//! # Responsibility
//! - Render a reminder into the payload posted by the platform.
//! - Define the dispatcher seam the geofence handler posts through.
//!
//! # Invariants
//! - Rendering is a pure function of the reminder.
//! - A failed post is never retried.

use crate::model::reminder::{Reminder, ReminderId};
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

/// User-visible notification for a reminder whose geofence was entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderNotification {
    pub title: String,
    pub body: String,
    /// Opaque deep-link target; the platform resolves it to the reminder
    /// detail screen.
    pub tap_action: ReminderId,
}

impl ReminderNotification {
    /// Renders `reminder` into a notification payload.
    ///
    /// The body carries the location label, followed by the description
    /// when one was entered.
    pub fn for_reminder(reminder: &Reminder) -> Self {
        let body = if reminder.description.is_empty() {
            reminder.location.clone()
        } else {
            format!("{}\n{}", reminder.location, reminder.description)
        };
        Self {
            title: reminder.title.clone(),
            body,
            tap_action: reminder.id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    Unavailable(String),
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "notification surface unavailable: {reason}"),
        }
    }
}

impl Error for DispatchError {}

/// Posts rendered notifications to a user-visible surface.
pub trait NotificationDispatcher: Send + Sync {
    fn dispatch(&self, notification: ReminderNotification) -> Result<(), DispatchError>;
}

/// In-process dispatcher that buffers notifications until the platform
/// drains and posts them.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Mutex<Vec<ReminderNotification>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every buffered notification in dispatch order.
    pub fn drain(&self) -> Vec<ReminderNotification> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.lock().map_or(0, |pending| pending.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationDispatcher for NotificationQueue {
    fn dispatch(&self, notification: ReminderNotification) -> Result<(), DispatchError> {
        let mut pending = self
            .pending
            .lock()
            .map_err(|_| DispatchError::Unavailable("notification queue poisoned".to_string()))?;
        info!(
            "event=notification_queued module=notification status=ok reminder_id={}",
            notification.tap_action
        );
        pending.push(notification);
        Ok(())
    }
}
