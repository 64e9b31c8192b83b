//! Async reminder repository over a blocking record store.
//!
//! # Responsibility
//! - Expose every store operation as a non-blocking async call.
//! - Translate point-lookup absence into `RepoError::NotFound`.
//!
//! # Invariants
//! - Store calls only ever run on the tokio blocking pool.
//! - An empty store is a successful empty list, never an error.
//! - `RepoError::NotFound` always renders as `REMINDER_NOT_FOUND_MESSAGE`.

use crate::model::reminder::{Reminder, ReminderId};
use crate::repo::reminder_store::{ReminderStore, StoreError, StoreResult};
use async_trait::async_trait;
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// User-facing message for a missing reminder.
pub const REMINDER_NOT_FOUND_MESSAGE: &str = "Reminder not found!";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository-level error carrying a human-readable message.
#[derive(Debug)]
pub enum RepoError {
    NotFound(ReminderId),
    Store(StoreError),
    /// The background task running the store call did not complete.
    Interrupted(String),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(_) => f.write_str(REMINDER_NOT_FOUND_MESSAGE),
            Self::Store(err) => write!(f, "{err}"),
            Self::Interrupted(message) => write!(f, "reminder store task failed: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::Interrupted(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Async data-source contract consumed by view models and the geofence
/// handler.
#[async_trait]
pub trait ReminderDataSource: Send + Sync {
    async fn get_reminders(&self) -> RepoResult<Vec<Reminder>>;
    async fn get_reminder(&self, id: &str) -> RepoResult<Reminder>;
    /// Upserts by id. Callers may discard the result.
    async fn save_reminder(&self, reminder: Reminder) -> RepoResult<()>;
    async fn delete_reminder(&self, id: &str) -> RepoResult<()>;
    async fn delete_all_reminders(&self) -> RepoResult<()>;
}

/// Repository backed by a local record store.
pub struct LocalReminderRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for LocalReminderRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ReminderStore + 'static> LocalReminderRepository<S> {
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Shares a store already owned elsewhere.
    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn run_blocking<T, F>(&self, operation: &'static str, f: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let joined = tokio::task::spawn_blocking(move || f(store.as_ref())).await;

        let result = match joined {
            Ok(result) => result.map_err(RepoError::from),
            Err(err) => Err(RepoError::Interrupted(err.to_string())),
        };
        match &result {
            Ok(_) => debug!("event={operation} module=repository status=ok"),
            Err(err) => error!("event={operation} module=repository status=error error={err}"),
        }
        result
    }
}

#[async_trait]
impl<S: ReminderStore + 'static> ReminderDataSource for LocalReminderRepository<S> {
    async fn get_reminders(&self) -> RepoResult<Vec<Reminder>> {
        self.run_blocking("reminders_get", |store| store.get_reminders())
            .await
    }

    async fn get_reminder(&self, id: &str) -> RepoResult<Reminder> {
        let lookup_id = id.to_owned();
        let found = self
            .run_blocking("reminder_get", move |store| {
                store.get_reminder_by_id(&lookup_id)
            })
            .await?;

        found.ok_or_else(|| RepoError::NotFound(id.to_owned()))
    }

    async fn save_reminder(&self, reminder: Reminder) -> RepoResult<()> {
        self.run_blocking("reminder_save", move |store| store.save_reminder(&reminder))
            .await
    }

    async fn delete_reminder(&self, id: &str) -> RepoResult<()> {
        let id = id.to_owned();
        self.run_blocking("reminder_delete", move |store| {
            store.delete_reminder_by_id(&id)
        })
        .await
    }

    async fn delete_all_reminders(&self) -> RepoResult<()> {
        self.run_blocking("reminders_delete_all", |store| {
            store.delete_all_reminders()
        })
        .await
    }
}
