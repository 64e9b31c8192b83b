//! Core domain logic for GeoRemind location reminders.
//! This crate owns reminder persistence, geofence handling and the
//! view-model state shown by the mobile UI.

pub mod config;
pub mod db;
pub mod geofence;
pub mod logging;
pub mod model;
pub mod notification;
pub mod repo;
pub mod service;
pub mod viewmodel;

pub use config::{ConfigError, CoreConfig};
pub use geofence::event::{geofence_error_message, GeofenceEvent, TransitionType};
pub use geofence::handler::{GeofenceEventHandler, TransitionOutcome};
pub use geofence::request::{GeofenceRequest, DEFAULT_GEOFENCE_RADIUS_METERS};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::data_item::{EntryValidationError, ReminderDataItem};
pub use model::outcome::Outcome;
pub use model::reminder::{Reminder, ReminderId, ReminderValidationError};
pub use notification::{
    DispatchError, NotificationDispatcher, NotificationQueue, ReminderNotification,
};
pub use repo::reminder_store::{ReminderStore, SqliteReminderStore, StoreError, StoreResult};
pub use service::reminder_repository::{
    LocalReminderRepository, ReminderDataSource, RepoError, RepoResult,
    REMINDER_NOT_FOUND_MESSAGE,
};
pub use viewmodel::list::RemindersListViewModel;
pub use viewmodel::save::{SaveError, SaveReminderViewModel, REMINDER_SAVED_TOAST};
pub use viewmodel::signal::Signal;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opens the reminder database at `path` and wraps it in the async
/// repository used by view models and the geofence handler.
pub fn open_repository(
    path: impl AsRef<std::path::Path>,
) -> db::DbResult<LocalReminderRepository<SqliteReminderStore>> {
    let conn = db::open_db(path)?;
    Ok(LocalReminderRepository::new(SqliteReminderStore::new(conn)))
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
