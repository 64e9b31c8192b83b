//! Reminder record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide upsert/lookup/delete primitives over the `reminders` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Reminder::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Absence is never an error at this layer.
//! - `get_reminders` returns rows in insertion order; an upsert keeps the
//!   original position of the replaced row.

use crate::db::DbError;
use crate::model::reminder::{Reminder, ReminderValidationError};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

const REMINDER_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    location,
    latitude,
    longitude
FROM reminders";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by reminder store implementations.
#[derive(Debug)]
pub enum StoreError {
    Validation(ReminderValidationError),
    Db(DbError),
    InvalidData(String),
    /// A previous holder of the connection panicked mid-operation.
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted reminder data: {message}"),
            Self::Poisoned => write!(f, "reminder store connection is poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::Poisoned => None,
        }
    }
}

impl From<ReminderValidationError> for StoreError {
    fn from(value: ReminderValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable storage of reminder records.
///
/// Implementations are blocking; async callers go through
/// `LocalReminderRepository`, which moves every call onto the blocking pool.
pub trait ReminderStore: Send + Sync {
    /// Inserts a reminder or replaces the one with the same id.
    fn save_reminder(&self, reminder: &Reminder) -> StoreResult<()>;
    fn get_reminders(&self) -> StoreResult<Vec<Reminder>>;
    fn get_reminder_by_id(&self, id: &str) -> StoreResult<Option<Reminder>>;
    /// Removes one reminder. Missing ids are a no-op.
    fn delete_reminder_by_id(&self, id: &str) -> StoreResult<()>;
    fn delete_all_reminders(&self) -> StoreResult<()>;
}

/// SQLite-backed reminder store.
///
/// Owns its connection so it can be shared across background tasks; writes
/// to the same id are serialized by the connection mutex.
pub struct SqliteReminderStore {
    conn: Mutex<Connection>,
}

impl SqliteReminderStore {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl ReminderStore for SqliteReminderStore {
    fn save_reminder(&self, reminder: &Reminder) -> StoreResult<()> {
        reminder.validate()?;

        self.conn()?.execute(
            "INSERT INTO reminders (
                id,
                title,
                description,
                location,
                latitude,
                longitude
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                location = excluded.location,
                latitude = excluded.latitude,
                longitude = excluded.longitude;",
            params![
                reminder.id.as_str(),
                reminder.title.as_str(),
                reminder.description.as_str(),
                reminder.location.as_str(),
                reminder.latitude,
                reminder.longitude,
            ],
        )?;

        debug!(
            "event=reminder_save module=store status=ok reminder_id={}",
            reminder.id
        );
        Ok(())
    }

    fn get_reminders(&self) -> StoreResult<Vec<Reminder>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{REMINDER_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut reminders = Vec::new();

        while let Some(row) = rows.next()? {
            reminders.push(parse_reminder_row(row)?);
        }

        Ok(reminders)
    }

    fn get_reminder_by_id(&self, id: &str) -> StoreResult<Option<Reminder>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{REMINDER_SELECT_SQL} WHERE id = ?1;"))?;
        let raw = stmt.query_row([id], read_raw_row).optional()?;

        raw.map(RawReminderRow::into_reminder).transpose()
    }

    fn delete_reminder_by_id(&self, id: &str) -> StoreResult<()> {
        let removed = self
            .conn()?
            .execute("DELETE FROM reminders WHERE id = ?1;", [id])?;
        debug!("event=reminder_delete module=store status=ok reminder_id={id} removed={removed}");
        Ok(())
    }

    fn delete_all_reminders(&self) -> StoreResult<()> {
        let removed = self.conn()?.execute("DELETE FROM reminders;", [])?;
        debug!("event=reminder_delete_all module=store status=ok removed={removed}");
        Ok(())
    }
}

struct RawReminderRow {
    id: String,
    title: String,
    description: String,
    location: String,
    latitude: f64,
    longitude: f64,
}

impl RawReminderRow {
    fn into_reminder(self) -> StoreResult<Reminder> {
        let reminder = Reminder {
            id: self.id,
            title: self.title,
            description: self.description,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
        };
        reminder.validate().map_err(|err| {
            StoreError::InvalidData(format!("reminders row `{}`: {err}", reminder.id))
        })?;
        Ok(reminder)
    }
}

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawReminderRow> {
    Ok(RawReminderRow {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        location: row.get("location")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
    })
}

fn parse_reminder_row(row: &Row<'_>) -> StoreResult<Reminder> {
    read_raw_row(row)?.into_reminder()
}
