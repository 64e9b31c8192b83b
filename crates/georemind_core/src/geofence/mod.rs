//! Geofence signal intake and registration requests.
//!
//! # Responsibility
//! - Model the transition signal produced by the platform location service.
//! - Turn entry transitions into reminder notifications.
//! - Describe the geofence to register for each saved reminder.
//!
//! # Invariants
//! - Geofence request ids are reminder ids.
//! - Only the first triggering geofence of an event is processed.

pub mod event;
pub mod handler;
pub mod request;
