//! Geofence registration request derived from a saved reminder.

use crate::geofence::event::TransitionType;
use crate::model::reminder::{Reminder, ReminderId};
use serde::{Deserialize, Serialize};

/// Radius of the circular region registered around each reminder.
pub const DEFAULT_GEOFENCE_RADIUS_METERS: f32 = 100.0;

/// Circular geofence the platform should register for a reminder.
///
/// Registering a request whose `request_id` is already registered replaces
/// the previous region, which is how edits move a reminder's geofence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceRequest {
    pub request_id: ReminderId,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f32,
    pub transition_type: TransitionType,
    /// `None` means the geofence never expires.
    pub expiration_ms: Option<i64>,
    /// Fire immediately when the device is already inside the region.
    pub initial_trigger_on_enter: bool,
}

impl GeofenceRequest {
    pub fn for_reminder(reminder: &Reminder, radius_meters: f32) -> Self {
        Self {
            request_id: reminder.id.clone(),
            latitude: reminder.latitude,
            longitude: reminder.longitude,
            radius_meters,
            transition_type: TransitionType::Enter,
            expiration_ms: None,
            initial_trigger_on_enter: true,
        }
    }
}
