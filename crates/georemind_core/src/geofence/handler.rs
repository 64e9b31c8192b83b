//! Geofence transition handling.
//!
//! # Responsibility
//! - Decide whether a transition signal concerns a stored reminder.
//! - Look the reminder up and hand it to notification dispatch.
//!
//! # Invariants
//! - Error signals are logged and dropped; nothing is retried.
//! - Only `Enter` transitions are processed, and only for the first
//!   triggering geofence id.
//! - Each spawned event runs in its own task; one failing lookup never
//!   affects another.

use crate::geofence::event::{geofence_error_message, GeofenceEvent, TransitionType};
use crate::model::reminder::ReminderId;
use crate::notification::{NotificationDispatcher, ReminderNotification};
use crate::service::reminder_repository::ReminderDataSource;
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Where processing of one geofence event stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// The location service reported an error instead of a transition.
    ServiceError { code: i32, message: &'static str },
    /// Transition kinds other than `Enter` are not acted upon.
    Ignored(TransitionType),
    NoTriggeringGeofence,
    BlankRequestId,
    /// Lookup failed; the message is the repository error.
    ReminderUnavailable {
        reminder_id: ReminderId,
        message: String,
    },
    DispatchFailed {
        reminder_id: ReminderId,
        message: String,
    },
    Notified { reminder_id: ReminderId },
}

impl TransitionOutcome {
    pub fn is_notified(&self) -> bool {
        matches!(self, Self::Notified { .. })
    }
}

enum Triage {
    Idle(TransitionOutcome),
    Process(ReminderId),
}

/// Reacts to geofence signals by notifying the user about the reminder
/// registered for the entered region.
#[derive(Clone)]
pub struct GeofenceEventHandler {
    data_source: Arc<dyn ReminderDataSource>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl GeofenceEventHandler {
    pub fn new(
        data_source: Arc<dyn ReminderDataSource>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            data_source,
            dispatcher,
        }
    }

    /// Processes `event` on its own task.
    ///
    /// Must be called from within a tokio runtime. A panic inside the task
    /// surfaces only through the returned handle.
    pub fn spawn(&self, event: GeofenceEvent) -> JoinHandle<TransitionOutcome> {
        let handler = self.clone();
        tokio::spawn(async move { handler.handle_event(event).await })
    }

    /// Processes `event` to completion on the current task.
    pub async fn handle_event(&self, event: GeofenceEvent) -> TransitionOutcome {
        let reminder_id = match triage(&event) {
            Triage::Idle(outcome) => return outcome,
            Triage::Process(reminder_id) => reminder_id,
        };

        let reminder = match self.data_source.get_reminder(&reminder_id).await {
            Ok(reminder) => reminder,
            Err(err) => {
                warn!(
                    "event=geofence_transition module=geofence status=dropped reason=lookup_failed reminder_id={reminder_id} error={err}"
                );
                return TransitionOutcome::ReminderUnavailable {
                    reminder_id,
                    message: err.to_string(),
                };
            }
        };

        match self
            .dispatcher
            .dispatch(ReminderNotification::for_reminder(&reminder))
        {
            Ok(()) => {
                info!(
                    "event=geofence_transition module=geofence status=ok reminder_id={reminder_id}"
                );
                TransitionOutcome::Notified { reminder_id }
            }
            Err(err) => {
                error!(
                    "event=geofence_transition module=geofence status=error reason=dispatch_failed reminder_id={reminder_id} error={err}"
                );
                TransitionOutcome::DispatchFailed {
                    reminder_id,
                    message: err.to_string(),
                }
            }
        }
    }
}

fn triage(event: &GeofenceEvent) -> Triage {
    if event.has_error {
        let message = geofence_error_message(event.error_code);
        error!(
            "event=geofence_transition module=geofence status=error error_code={} error={message}",
            event.error_code
        );
        return Triage::Idle(TransitionOutcome::ServiceError {
            code: event.error_code,
            message,
        });
    }

    if event.transition_type != TransitionType::Enter {
        debug!(
            "event=geofence_transition module=geofence status=ignored transition={}",
            event.transition_type.as_str()
        );
        return Triage::Idle(TransitionOutcome::Ignored(event.transition_type));
    }

    let Some(first) = event.triggering_ids.first() else {
        error!("event=geofence_transition module=geofence status=dropped reason=no_triggering_geofence");
        return Triage::Idle(TransitionOutcome::NoTriggeringGeofence);
    };

    if first.trim().is_empty() {
        return Triage::Idle(TransitionOutcome::BlankRequestId);
    }

    debug!(
        "event=geofence_transition module=geofence status=start reminder_id={first} triggered={}",
        event.triggering_ids.len()
    );
    Triage::Process(first.clone())
}
