//! Geofence transition signal as delivered by the location service.

use serde::{Deserialize, Serialize};

/// Platform status code: geofencing is unavailable (e.g. location off).
pub const GEOFENCE_NOT_AVAILABLE: i32 = 1000;
/// Platform status code: the app registered too many geofences.
pub const GEOFENCE_TOO_MANY_GEOFENCES: i32 = 1001;
/// Platform status code: too many pending intents were provided.
pub const GEOFENCE_TOO_MANY_PENDING_INTENTS: i32 = 1002;

/// Kind of boundary crossing reported for a geofence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    Enter,
    Exit,
    Dwell,
}

impl TransitionType {
    /// Maps the platform transition constant (1, 2, 4).
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Enter),
            2 => Some(Self::Exit),
            4 => Some(Self::Dwell),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Enter => 1,
            Self::Exit => 2,
            Self::Dwell => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Exit => "exit",
            Self::Dwell => "dwell",
        }
    }
}

/// One geofencing callback from the location service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeofenceEvent {
    pub has_error: bool,
    /// Meaningful only when `has_error` is set.
    pub error_code: i32,
    pub transition_type: TransitionType,
    /// Request ids of the triggering geofences, in platform order.
    pub triggering_ids: Vec<String>,
}

impl GeofenceEvent {
    /// Builds a successful transition for the given geofence ids.
    pub fn transition(
        transition_type: TransitionType,
        triggering_ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            has_error: false,
            error_code: 0,
            transition_type,
            triggering_ids: triggering_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds an error signal carrying a platform status code.
    pub fn error(error_code: i32) -> Self {
        Self {
            has_error: true,
            error_code,
            transition_type: TransitionType::Enter,
            triggering_ids: Vec::new(),
        }
    }
}

/// Human-readable message for a geofencing status code.
pub fn geofence_error_message(error_code: i32) -> &'static str {
    match error_code {
        GEOFENCE_NOT_AVAILABLE => "Geofence service is not available now",
        GEOFENCE_TOO_MANY_GEOFENCES => "Your app has registered too many geofences",
        GEOFENCE_TOO_MANY_PENDING_INTENTS => {
            "You have provided too many PendingIntents to the addGeofences() call"
        }
        _ => "Unknown geofence error",
    }
}
