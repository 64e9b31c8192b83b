//! UI-facing reminder form shape.
//!
//! # Responsibility
//! - Carry possibly incomplete form input between screens and view models.
//! - Validate required fields before anything reaches persistence.
//!
//! # Invariants
//! - `id` is always present: generated for new reminders, preserved on edit.
//! - Conversion into `Reminder` only succeeds after `validate()` passes.

use crate::model::reminder::{new_reminder_id, Reminder, ReminderId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-specific validation failure for the save form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryValidationError {
    MissingTitle,
    MissingLocation,
}

impl EntryValidationError {
    /// Stable error code surfaced to the UI.
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingTitle => "missing title",
            Self::MissingLocation => "missing location",
        }
    }
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl Error for EntryValidationError {}

/// Reminder as edited and displayed by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderDataItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub id: ReminderId,
}

impl ReminderDataItem {
    /// Creates a form item for a new reminder with a generated identifier.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        location: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        Self::with_id(
            new_reminder_id(),
            title,
            description,
            location,
            latitude,
            longitude,
        )
    }

    /// Creates a form item bound to an existing reminder identifier.
    pub fn with_id(
        id: impl Into<ReminderId>,
        title: Option<String>,
        description: Option<String>,
        location: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        Self {
            title,
            description,
            location,
            latitude,
            longitude,
            id: id.into(),
        }
    }

    /// Checks the required form fields.
    ///
    /// The title is checked first. Coordinates are picked together with the
    /// location label, so absent coordinates count as a missing location.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if is_blank(self.title.as_deref()) {
            return Err(EntryValidationError::MissingTitle);
        }
        if is_blank(self.location.as_deref())
            || self.latitude.is_none()
            || self.longitude.is_none()
        {
            return Err(EntryValidationError::MissingLocation);
        }
        Ok(())
    }

    /// Validates and converts into a storable reminder.
    pub fn into_reminder(self) -> Result<Reminder, EntryValidationError> {
        self.validate()?;
        match (self.title, self.location, self.latitude, self.longitude) {
            (Some(title), Some(location), Some(latitude), Some(longitude)) => Ok(Reminder {
                id: self.id,
                title,
                description: self.description.unwrap_or_default(),
                location,
                latitude,
                longitude,
            }),
            (None, ..) => Err(EntryValidationError::MissingTitle),
            _ => Err(EntryValidationError::MissingLocation),
        }
    }
}

impl From<Reminder> for ReminderDataItem {
    fn from(reminder: Reminder) -> Self {
        Self {
            title: Some(reminder.title),
            description: Some(reminder.description),
            location: Some(reminder.location),
            latitude: Some(reminder.latitude),
            longitude: Some(reminder.longitude),
            id: reminder.id,
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::{EntryValidationError, ReminderDataItem};

    fn item(title: Option<&str>, location: Option<&str>) -> ReminderDataItem {
        ReminderDataItem::new(
            title.map(str::to_string),
            Some("Description".to_string()),
            location.map(str::to_string),
            Some(51.5),
            Some(0.12),
        )
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(EntryValidationError::MissingTitle.code(), "missing title");
        assert_eq!(
            EntryValidationError::MissingLocation.code(),
            "missing location"
        );
    }

    #[test]
    fn title_is_checked_before_location() {
        let err = item(None, None).validate().unwrap_err();
        assert_eq!(err, EntryValidationError::MissingTitle);
    }

    #[test]
    fn missing_coordinates_count_as_missing_location() {
        let mut form = item(Some("Title"), Some("Big Ben"));
        form.longitude = None;
        assert_eq!(form.validate(), Err(EntryValidationError::MissingLocation));
    }

    #[test]
    fn into_reminder_defaults_description_and_keeps_id() {
        let mut form = item(Some("Title"), Some("Big Ben"));
        form.description = None;
        let id = form.id.clone();

        let reminder = form.into_reminder().unwrap();
        assert_eq!(reminder.id, id);
        assert_eq!(reminder.description, "");
        assert_eq!(reminder.location, "Big Ben");
    }
}
