//! Save/edit reminder view model.
//!
//! # Invariants
//! - Invalid form input never reaches the repository.
//! - Edits keep the identifier carried by the submitted item.

use crate::geofence::request::GeofenceRequest;
use crate::model::data_item::{EntryValidationError, ReminderDataItem};
use crate::model::reminder::Reminder;
use crate::service::reminder_repository::{ReminderDataSource, RepoError};
use crate::viewmodel::signal::Signal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Toast shown after a reminder was persisted.
pub const REMINDER_SAVED_TOAST: &str = "Reminder Saved !";

#[derive(Debug)]
pub enum SaveError {
    Invalid(EntryValidationError),
    Repository(RepoError),
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Repository(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repository(err) => Some(err),
        }
    }
}

impl From<EntryValidationError> for SaveError {
    fn from(value: EntryValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<RepoError> for SaveError {
    fn from(value: RepoError) -> Self {
        Self::Repository(value)
    }
}

/// Backs the save/edit reminder screen.
pub struct SaveReminderViewModel {
    data_source: Arc<dyn ReminderDataSource>,
    geofence_radius_meters: f32,
    pub show_loading: Signal<bool>,
    pub show_toast: Signal<Option<String>>,
    /// Field-specific error of the last failed validation.
    pub show_validation_error: Signal<Option<EntryValidationError>>,
    pub show_error_message: Signal<Option<String>>,
}

impl SaveReminderViewModel {
    pub fn new(data_source: Arc<dyn ReminderDataSource>, geofence_radius_meters: f32) -> Self {
        Self {
            data_source,
            geofence_radius_meters,
            show_loading: Signal::new(false),
            show_toast: Signal::default(),
            show_validation_error: Signal::default(),
            show_error_message: Signal::default(),
        }
    }

    /// Checks the required fields, surfacing the failing field's code.
    /// A passing check clears any previously surfaced code.
    pub fn validate_entered_data(&self, item: &ReminderDataItem) -> bool {
        match item.validate() {
            Ok(()) => {
                self.show_validation_error.set(None);
                true
            }
            Err(err) => {
                self.show_validation_error.set(Some(err));
                false
            }
        }
    }

    /// Persists a validated reminder and shows the saved toast.
    pub async fn save_reminder(&self, reminder: Reminder) -> Result<(), SaveError> {
        self.show_loading.set(true);
        let result = self.data_source.save_reminder(reminder).await;
        self.show_loading.set(false);

        match result {
            Ok(()) => {
                self.show_toast.set(Some(REMINDER_SAVED_TOAST.to_string()));
                Ok(())
            }
            Err(err) => {
                self.show_error_message.set(Some(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Validates the form, saves it and returns the geofence to register.
    pub async fn validate_and_save_reminder(
        &self,
        item: ReminderDataItem,
    ) -> Result<GeofenceRequest, SaveError> {
        let reminder = self.validated(item)?;
        let request = GeofenceRequest::for_reminder(&reminder, self.geofence_radius_meters);
        self.save_reminder(reminder).await?;
        Ok(request)
    }

    /// Replaces the reminder carrying `item.id`.
    ///
    /// The old record is deleted and recreated under the same identifier;
    /// the returned request replaces the old geofence on registration.
    pub async fn update_reminder(
        &self,
        item: ReminderDataItem,
    ) -> Result<GeofenceRequest, SaveError> {
        let reminder = self.validated(item)?;
        if let Err(err) = self.data_source.delete_reminder(&reminder.id).await {
            self.show_error_message.set(Some(err.to_string()));
            return Err(err.into());
        }
        let request = GeofenceRequest::for_reminder(&reminder, self.geofence_radius_meters);
        self.save_reminder(reminder).await?;
        Ok(request)
    }

    /// Resets every feedback signal, e.g. when the screen is left.
    pub fn on_clear(&self) {
        self.show_loading.set(false);
        self.show_toast.set(None);
        self.show_validation_error.set(None);
        self.show_error_message.set(None);
    }

    fn validated(&self, item: ReminderDataItem) -> Result<Reminder, SaveError> {
        item.into_reminder().map_err(|err| {
            self.show_validation_error.set(Some(err));
            SaveError::Invalid(err)
        })
    }
}
