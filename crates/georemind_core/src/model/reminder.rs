//! Reminder domain model.
//!
//! # Responsibility
//! - Define the canonical record stored for each location reminder.
//! - Provide validation shared by store write and read paths.
//!
//! # Invariants
//! - `id` is non-blank and immutable once assigned.
//! - `latitude` is finite and within `[-90, 90]`.
//! - `longitude` is finite and within `[-180, 180]`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a reminder.
///
/// Kept as a plain string because the same value is used as the geofence
/// request id registered with the platform location service.
pub type ReminderId = String;

/// Generates a fresh reminder identifier.
pub fn new_reminder_id() -> ReminderId {
    Uuid::new_v4().to_string()
}

/// Validation errors for reminder records.
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderValidationError {
    BlankId,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl Display for ReminderValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "reminder id cannot be blank"),
            Self::LatitudeOutOfRange(value) => {
                write!(f, "latitude {value} is outside [-90, 90]")
            }
            Self::LongitudeOutOfRange(value) => {
                write!(f, "longitude {value} is outside [-180, 180]")
            }
        }
    }
}

impl Error for ReminderValidationError {}

/// A location-tagged reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    pub description: String,
    /// Human-readable label of the picked place, e.g. a point of interest.
    pub location: String,
    /// Decimal degrees.
    pub latitude: f64,
    /// Decimal degrees.
    pub longitude: f64,
}

impl Reminder {
    /// Creates a reminder with a generated identifier.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: new_reminder_id(),
            title: title.into(),
            description: description.into(),
            location: location.into(),
            latitude,
            longitude,
        }
    }

    /// Creates a reminder with a caller-provided identifier.
    ///
    /// Used by the edit flow, where the identifier of the replaced reminder
    /// must be preserved.
    pub fn with_id(
        id: impl Into<ReminderId>,
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ReminderValidationError> {
        let reminder = Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            location: location.into(),
            latitude,
            longitude,
        };
        reminder.validate()?;
        Ok(reminder)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ReminderValidationError> {
        if self.id.trim().is_empty() {
            return Err(ReminderValidationError::BlankId);
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ReminderValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ReminderValidationError::LongitudeOutOfRange(
                self.longitude,
            ));
        }
        Ok(())
    }
}
