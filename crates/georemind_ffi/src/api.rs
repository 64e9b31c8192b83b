//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose reminder, geofence and notification use cases to Dart via FRB.
//! - Flatten core results into simple response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Async core work runs on one process-wide tokio runtime; exported
//!   functions block the FRB worker thread, never the UI thread.

use georemind_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_repository,
    CoreConfig, GeofenceEvent, GeofenceEventHandler, GeofenceRequest, NotificationQueue,
    Reminder, ReminderDataItem, ReminderDataSource, ReminderNotification,
    RemindersListViewModel, SaveError, SaveReminderViewModel, TransitionOutcome,
    TransitionType, REMINDER_SAVED_TOAST,
};
use log::warn;
use once_cell::sync::{Lazy, OnceCell};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Runtime;

static CONFIG: OnceCell<CoreConfig> = OnceCell::new();
static RUNTIME: OnceCell<Runtime> = OnceCell::new();
static NOTIFICATIONS: Lazy<Arc<NotificationQueue>> =
    Lazy::new(|| Arc::new(NotificationQueue::new()));

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Reminder as displayed by list and detail screens.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Response envelope for the reminder list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderListResponse {
    pub ok: bool,
    pub items: Vec<ReminderItem>,
    /// True when the empty-state placeholder should be shown.
    pub show_no_data: bool,
    pub message: String,
}

/// Response envelope for a single reminder lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderResponse {
    pub ok: bool,
    pub item: Option<ReminderItem>,
    pub message: String,
}

/// Circular region the platform must register after a save.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceItem {
    pub request_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f32,
}

/// Response envelope for save and edit flows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSaveResponse {
    pub ok: bool,
    pub reminder_id: Option<String>,
    /// `missing title` / `missing location` when form validation failed.
    pub error_code: Option<String>,
    pub geofence: Option<GeofenceItem>,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

/// Result of handing one geofence callback to core.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceEventResponse {
    pub notified: bool,
    pub reminder_id: Option<String>,
    pub message: String,
}

/// Notification the platform should post.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationItem {
    pub title: String,
    pub body: String,
    /// Reminder id to open when the notification is tapped.
    pub tap_action: String,
}

/// Loads every reminder for the list screen.
pub fn reminders_list() -> ReminderListResponse {
    let failure = |message: String| ReminderListResponse {
        ok: false,
        items: Vec::new(),
        show_no_data: true,
        message,
    };
    let data_source = match open_data_source() {
        Ok(data_source) => data_source,
        Err(err) => return failure(err),
    };

    let outcome = block_on(async move {
        let view_model = RemindersListViewModel::new(data_source);
        view_model.load_reminders().await;
        (
            view_model.reminders.get(),
            view_model.show_no_data.get(),
            view_model.show_error_message.get(),
        )
    });

    match outcome {
        Ok((items, show_no_data, None)) => {
            let items = items.into_iter().map(data_item_to_item).collect::<Vec<_>>();
            let message = format!("Loaded {} reminder(s).", items.len());
            ReminderListResponse {
                ok: true,
                items,
                show_no_data,
                message,
            }
        }
        Ok((_, _, Some(message))) => failure(message),
        Err(err) => failure(err),
    }
}

/// Loads one reminder for the detail screen.
pub fn reminder_get(id: String) -> ReminderResponse {
    let result = open_data_source().and_then(|data_source| {
        block_on(async move { data_source.get_reminder(id.trim()).await })
    });

    match result {
        Ok(Ok(reminder)) => ReminderResponse {
            ok: true,
            item: Some(reminder_to_item(reminder)),
            message: String::new(),
        },
        Ok(Err(err)) => ReminderResponse {
            ok: false,
            item: None,
            message: err.to_string(),
        },
        Err(err) => ReminderResponse {
            ok: false,
            item: None,
            message: err,
        },
    }
}

/// Validates and saves a new reminder.
///
/// `id` may be supplied by callers that pre-allocate ids; a fresh id is
/// generated otherwise.
pub fn reminder_save(
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    location: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> ReminderSaveResponse {
    let item = match id.filter(|value| !value.trim().is_empty()) {
        Some(id) => ReminderDataItem::with_id(id, title, description, location, latitude, longitude),
        None => ReminderDataItem::new(title, description, location, latitude, longitude),
    };
    run_save(item, false)
}

/// Replaces the reminder `id` with the submitted form, keeping its id.
pub fn reminder_update(
    id: String,
    title: Option<String>,
    description: Option<String>,
    location: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> ReminderSaveResponse {
    let item = ReminderDataItem::with_id(id, title, description, location, latitude, longitude);
    run_save(item, true)
}

/// Deletes one reminder. Unknown ids succeed without effect.
pub fn reminder_delete(id: String) -> ActionResponse {
    run_action("Reminder deleted.", move |data_source| async move {
        data_source.delete_reminder(id.trim()).await
    })
}

/// Deletes every reminder.
pub fn reminders_delete_all() -> ActionResponse {
    run_action("All reminders deleted.", |data_source| async move {
        data_source.delete_all_reminders().await
    })
}

/// Handles one geofencing callback from the platform location service.
///
/// `transition_type` uses the platform constants (enter=1, exit=2,
/// dwell=4). Notifications produced here are picked up with
/// `notifications_drain`.
pub fn geofence_handle_event(
    has_error: bool,
    error_code: i32,
    transition_type: i32,
    triggering_ids: Vec<String>,
) -> GeofenceEventResponse {
    let failure = |message: String| GeofenceEventResponse {
        notified: false,
        reminder_id: None,
        message,
    };

    let Some(transition_type) = TransitionType::from_code(transition_type) else {
        if !has_error {
            return failure(format!("unsupported transition type {transition_type}"));
        }
        return handle_event(GeofenceEvent::error(error_code));
    };

    let event = if has_error {
        GeofenceEvent {
            transition_type,
            ..GeofenceEvent::error(error_code)
        }
    } else {
        GeofenceEvent::transition(transition_type, triggering_ids)
    };
    handle_event(event)
}

/// Removes and returns every notification waiting to be posted.
#[flutter_rust_bridge::frb(sync)]
pub fn notifications_drain() -> Vec<NotificationItem> {
    NOTIFICATIONS
        .drain()
        .into_iter()
        .map(to_notification_item)
        .collect()
}

fn handle_event(event: GeofenceEvent) -> GeofenceEventResponse {
    let data_source = match open_data_source() {
        Ok(data_source) => data_source,
        Err(message) => {
            return GeofenceEventResponse {
                notified: false,
                reminder_id: None,
                message,
            }
        }
    };
    let dispatcher = Arc::clone(&*NOTIFICATIONS);
    let handler = GeofenceEventHandler::new(data_source, dispatcher);

    let joined = block_on(async move { handler.spawn(event).await });
    match joined {
        Ok(Ok(outcome)) => outcome_to_response(outcome),
        Ok(Err(err)) => {
            warn!("event=geofence_transition module=ffi status=error error={err}");
            GeofenceEventResponse {
                notified: false,
                reminder_id: None,
                message: format!("geofence task failed: {err}"),
            }
        }
        Err(message) => GeofenceEventResponse {
            notified: false,
            reminder_id: None,
            message,
        },
    }
}

fn outcome_to_response(outcome: TransitionOutcome) -> GeofenceEventResponse {
    let (notified, reminder_id, message) = match outcome {
        TransitionOutcome::Notified { reminder_id } => {
            (true, Some(reminder_id), "Notification queued.".to_string())
        }
        TransitionOutcome::ServiceError { code, message } => {
            (false, None, format!("geofence error {code}: {message}"))
        }
        TransitionOutcome::Ignored(kind) => {
            (false, None, format!("{} transition ignored.", kind.as_str()))
        }
        TransitionOutcome::NoTriggeringGeofence => {
            (false, None, "No triggering geofence.".to_string())
        }
        TransitionOutcome::BlankRequestId => (false, None, "Blank geofence id.".to_string()),
        TransitionOutcome::ReminderUnavailable {
            reminder_id,
            message,
        }
        | TransitionOutcome::DispatchFailed {
            reminder_id,
            message,
        } => (false, Some(reminder_id), message),
    };
    GeofenceEventResponse {
        notified,
        reminder_id,
        message,
    }
}

fn run_save(item: ReminderDataItem, replace: bool) -> ReminderSaveResponse {
    let failure = |error_code: Option<String>, message: String| ReminderSaveResponse {
        ok: false,
        reminder_id: None,
        error_code,
        geofence: None,
        message,
    };
    let config = match resolve_config() {
        Ok(config) => config,
        Err(err) => return failure(None, err),
    };
    let data_source = match open_data_source() {
        Ok(data_source) => data_source,
        Err(err) => return failure(None, err),
    };

    let result = block_on(async move {
        let view_model = SaveReminderViewModel::new(data_source, config.geofence_radius_meters);
        if replace {
            view_model.update_reminder(item).await
        } else {
            view_model.validate_and_save_reminder(item).await
        }
    });

    match result {
        Ok(Ok(request)) => ReminderSaveResponse {
            ok: true,
            reminder_id: Some(request.request_id.clone()),
            error_code: None,
            geofence: Some(to_geofence_item(request)),
            message: REMINDER_SAVED_TOAST.to_string(),
        },
        Ok(Err(SaveError::Invalid(err))) => failure(Some(err.code().to_string()), err.to_string()),
        Ok(Err(err)) => failure(None, err.to_string()),
        Err(err) => failure(None, err),
    }
}

fn run_action<F, Fut>(success_message: &str, action: F) -> ActionResponse
where
    F: FnOnce(Arc<dyn ReminderDataSource>) -> Fut,
    Fut: Future<Output = georemind_core::RepoResult<()>> + Send + 'static,
{
    let result = open_data_source().and_then(|data_source| block_on(action(data_source)));
    match result {
        Ok(Ok(())) => ActionResponse {
            ok: true,
            message: success_message.to_string(),
        },
        Ok(Err(err)) => ActionResponse {
            ok: false,
            message: err.to_string(),
        },
        Err(message) => ActionResponse { ok: false, message },
    }
}

fn block_on<F>(future: F) -> Result<F::Output, String>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let runtime = RUNTIME.get_or_try_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("georemind-core")
            .build()
            .map_err(|err| format!("core runtime start failed: {err}"))
    })?;
    Ok(runtime.block_on(future))
}

fn resolve_config() -> Result<&'static CoreConfig, String> {
    CONFIG.get_or_try_init(|| CoreConfig::from_env().map_err(|err| err.to_string()))
}

fn open_data_source() -> Result<Arc<dyn ReminderDataSource>, String> {
    let config = resolve_config()?;
    let repository = open_repository(&config.db_path)
        .map_err(|err| format!("reminder DB open failed: {err}"))?;
    Ok(Arc::new(repository))
}

fn reminder_to_item(reminder: Reminder) -> ReminderItem {
    ReminderItem {
        id: reminder.id,
        title: reminder.title,
        description: reminder.description,
        location: reminder.location,
        latitude: reminder.latitude,
        longitude: reminder.longitude,
    }
}

fn data_item_to_item(item: ReminderDataItem) -> ReminderItem {
    ReminderItem {
        id: item.id,
        title: item.title.unwrap_or_default(),
        description: item.description.unwrap_or_default(),
        location: item.location.unwrap_or_default(),
        latitude: item.latitude.unwrap_or_default(),
        longitude: item.longitude.unwrap_or_default(),
    }
}

fn to_geofence_item(request: GeofenceRequest) -> GeofenceItem {
    GeofenceItem {
        request_id: request.request_id,
        latitude: request.latitude,
        longitude: request.longitude,
        radius_meters: request.radius_meters,
    }
}

fn to_notification_item(notification: ReminderNotification) -> NotificationItem {
    NotificationItem {
        title: notification.title,
        body: notification.body,
        tap_action: notification.tap_action,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        block_on, core_version, geofence_handle_event, init_logging, notifications_drain,
        reminder_delete, reminder_get, reminder_save, reminder_update, reminders_list,
        resolve_config,
    };
    use georemind_core::{open_repository, Reminder, ReminderDataSource};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn reminder_save_then_get_and_list() {
        let token = unique_token("save");
        let saved = reminder_save(
            Some(token.clone()),
            Some("Tour".to_string()),
            Some("Take Photos".to_string()),
            Some("Big Ben".to_string()),
            Some(51.5),
            Some(0.12),
        );
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(saved.reminder_id.as_deref(), Some(token.as_str()));
        let geofence = saved.geofence.expect("save should describe a geofence");
        assert_eq!(geofence.request_id, token);
        assert_eq!(geofence.radius_meters, 100.0);

        let loaded = reminder_get(token.clone());
        assert!(loaded.ok, "{}", loaded.message);
        assert_eq!(loaded.item.expect("item").location, "Big Ben");

        let listed = reminders_list();
        assert!(listed.ok, "{}", listed.message);
        assert!(!listed.show_no_data);
        assert!(listed.items.iter().any(|item| item.id == token));
    }

    #[test]
    fn reminders_list_includes_stored_reminder_without_title() {
        let token = unique_token("untitled");
        let config = resolve_config().expect("config");
        let repository = open_repository(&config.db_path).expect("repository");
        let reminder =
            Reminder::with_id(token.clone(), "", "Take Photos", "Big Ben", 51.5, 0.12).unwrap();
        block_on(async move { repository.save_reminder(reminder).await })
            .unwrap()
            .unwrap();

        let listed = reminders_list();
        assert!(listed.ok, "{}", listed.message);
        assert!(!listed.show_no_data);
        assert!(!listed.items.is_empty());
        let item = listed
            .items
            .iter()
            .find(|item| item.id == token)
            .expect("untitled reminder is listed");
        assert_eq!(item.title, "");
        assert_eq!(item.location, "Big Ben");
    }

    #[test]
    fn reminder_save_reports_validation_code() {
        let response = reminder_save(
            None,
            Some(String::new()),
            None,
            Some("Big Ben".to_string()),
            Some(51.5),
            Some(0.12),
        );
        assert!(!response.ok);
        assert_eq!(response.error_code.as_deref(), Some("missing title"));

        let response = reminder_save(None, Some("Tour".to_string()), None, None, None, None);
        assert_eq!(response.error_code.as_deref(), Some("missing location"));
    }

    #[test]
    fn reminder_update_keeps_id() {
        let token = unique_token("update");
        let saved = reminder_save(
            Some(token.clone()),
            Some("Tour".to_string()),
            None,
            Some("Big Ben".to_string()),
            Some(51.5),
            Some(0.12),
        );
        assert!(saved.ok, "{}", saved.message);

        let updated = reminder_update(
            token.clone(),
            Some("Climb".to_string()),
            None,
            Some("Eiffel Tower".to_string()),
            Some(48.86),
            Some(2.29),
        );
        assert!(updated.ok, "{}", updated.message);

        let loaded = reminder_get(token).item.expect("updated reminder");
        assert_eq!(loaded.title, "Climb");
        assert_eq!(loaded.location, "Eiffel Tower");
    }

    #[test]
    fn reminder_get_unknown_id_returns_not_found_message() {
        let response = reminder_get(unique_token("missing"));
        assert!(!response.ok);
        assert_eq!(response.message, "Reminder not found!");
    }

    #[test]
    fn reminder_delete_unknown_id_succeeds() {
        let response = reminder_delete(unique_token("never-saved"));
        assert!(response.ok, "{}", response.message);
    }

    #[test]
    fn geofence_enter_queues_notification() {
        let token = unique_token("geofence");
        let saved = reminder_save(
            Some(token.clone()),
            Some("Tour".to_string()),
            Some("Take Photos".to_string()),
            Some("Big Ben".to_string()),
            Some(51.5),
            Some(0.12),
        );
        assert!(saved.ok, "{}", saved.message);

        let response = geofence_handle_event(false, 0, 1, vec![token.clone()]);
        assert!(response.notified, "{}", response.message);
        assert_eq!(response.reminder_id.as_deref(), Some(token.as_str()));

        let drained = notifications_drain();
        assert!(drained.iter().any(|item| item.tap_action == token));
    }

    #[test]
    fn geofence_error_and_unknown_transition_do_not_notify() {
        let response = geofence_handle_event(true, 1000, 1, Vec::new());
        assert!(!response.notified);
        assert!(response.message.contains("not available"));

        let response = geofence_handle_event(false, 0, 3, vec!["x".to_string()]);
        assert!(!response.notified);
        assert!(response.message.contains("unsupported transition"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
